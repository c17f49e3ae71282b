use crate::{ReschedulePolicy, DEFAULT_CAPACITY, LEGACY_CAPACITY, MIN_POLL_INTERVAL_SECONDS};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WallSettings {
    pub capacity: usize,
    pub policy: ReschedulePolicy,
    pub min_interval_seconds: u32,
    pub max_interval_seconds: u32,
}

impl Default for WallSettings {
    fn default() -> Self {
        Self {
            capacity: DEFAULT_CAPACITY,
            policy: ReschedulePolicy::AfterSuccess,
            min_interval_seconds: MIN_POLL_INTERVAL_SECONDS,
            max_interval_seconds: 60,
        }
    }
}

impl WallSettings {
    /// Behaviour of the older timer-driven client: larger wall, unconditional reschedule.
    pub fn legacy() -> Self {
        Self {
            capacity: LEGACY_CAPACITY,
            policy: ReschedulePolicy::Always,
            ..Self::default()
        }
    }

    pub fn clamp_interval(&self, seconds: u32) -> u32 {
        let min = self.min_interval_seconds.max(MIN_POLL_INTERVAL_SECONDS);
        let max = self.max_interval_seconds.max(min);
        seconds.clamp(min, max)
    }
}
