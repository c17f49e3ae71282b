use std::collections::VecDeque;

use crate::DisplayedImage;

pub const DEFAULT_CAPACITY: usize = 50;
pub const LEGACY_CAPACITY: usize = 100;

/// Bounded, most-recent-first list of attached images.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageWall {
    items: VecDeque<DisplayedImage>,
    capacity: usize,
}

impl Default for ImageWall {
    fn default() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }
}

impl ImageWall {
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            items: VecDeque::with_capacity(capacity + 1),
            capacity,
        }
    }

    /// Inserts at the front and returns whatever fell off the back, oldest first.
    pub fn push(&mut self, image: DisplayedImage) -> Vec<DisplayedImage> {
        self.items.push_front(image);
        let mut evicted = Vec::new();
        while self.items.len() > self.capacity {
            if let Some(oldest) = self.pop() {
                evicted.push(oldest);
            }
        }
        evicted
    }

    /// Removes the oldest entry.
    pub fn pop(&mut self) -> Option<DisplayedImage> {
        self.items.pop_back()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Newest first.
    pub fn iter(&self) -> impl Iterator<Item = &DisplayedImage> {
        self.items.iter()
    }
}
