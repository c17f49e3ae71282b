//! Flag helpers over a plain `u32`. Bit indices must be in `0..32`.

pub const fn generate_mask(bit: u32) -> u32 {
    1 << bit
}

pub const fn is_set(flags: u32, bit: u32) -> bool {
    let mask = generate_mask(bit);
    flags & mask == mask
}

pub const fn set_bit(flags: u32, bit: u32) -> u32 {
    flags | generate_mask(bit)
}

pub const fn clear_bit(flags: u32, bit: u32) -> u32 {
    flags & !generate_mask(bit)
}
