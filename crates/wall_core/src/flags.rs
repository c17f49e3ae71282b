use crate::bitset;

/// Independent conditions that block polling while set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Flag {
    /// Startup guard; cleared once setup completes.
    Init,
    ManualPause,
    BossMode,
    TabHidden,
    WindowUnfocused,
    ScrolledAway,
    GalleryOpen,
}

impl Flag {
    pub const ALL: [Flag; 7] = [
        Flag::Init,
        Flag::ManualPause,
        Flag::BossMode,
        Flag::TabHidden,
        Flag::WindowUnfocused,
        Flag::ScrolledAway,
        Flag::GalleryOpen,
    ];

    pub const fn bit(self) -> u32 {
        match self {
            Flag::Init => 0,
            Flag::ManualPause => 1,
            Flag::BossMode => 2,
            Flag::TabHidden => 3,
            Flag::WindowUnfocused => 4,
            Flag::ScrolledAway => 5,
            Flag::GalleryOpen => 6,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Flag::Init => "init",
            Flag::ManualPause => "manual",
            Flag::BossMode => "boss",
            Flag::TabHidden => "hidden",
            Flag::WindowUnfocused => "unfocused",
            Flag::ScrolledAway => "scroll",
            Flag::GalleryOpen => "gallery",
        }
    }
}

/// Bit-packed blocking conditions. Polling is allowed only while no bit is set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StateFlags {
    bits: u32,
}

impl Default for StateFlags {
    fn default() -> Self {
        Self::initial()
    }
}

impl StateFlags {
    /// Startup value: only the init guard is set.
    pub const fn initial() -> Self {
        Self {
            bits: bitset::generate_mask(Flag::Init.bit()),
        }
    }

    pub const fn bits(self) -> u32 {
        self.bits
    }

    pub const fn is_active(self) -> bool {
        self.bits == 0
    }

    pub const fn get(self, flag: Flag) -> bool {
        bitset::is_set(self.bits, flag.bit())
    }

    pub fn iter_set(self) -> impl Iterator<Item = Flag> {
        Flag::ALL.into_iter().filter(move |flag| self.get(*flag))
    }

    pub(crate) fn apply(&mut self, flag: Flag, value: bool) -> Transition {
        let was_active = self.is_active();
        self.bits = if value {
            bitset::set_bit(self.bits, flag.bit())
        } else {
            bitset::clear_bit(self.bits, flag.bit())
        };
        Transition {
            was_active,
            is_active: self.is_active(),
        }
    }
}

/// Aggregate activity before and after a single flag change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transition {
    pub was_active: bool,
    pub is_active: bool,
}

impl Transition {
    pub const fn flipped(self) -> bool {
        self.was_active != self.is_active
    }
}
