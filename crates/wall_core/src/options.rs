use std::time::Duration;

use serde::{Deserialize, Deserializer, Serialize};

pub const DEFAULT_POLL_INTERVAL_SECONDS: u32 = 10;
pub const MIN_POLL_INTERVAL_SECONDS: u32 = 1;

/// User preferences mirrored to persistent storage on every change.
///
/// Field names on the wire are the ones already found in existing stores:
/// `{"interval": 10, "playInBackground": false}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Options {
    #[serde(rename = "interval", deserialize_with = "interval_from_number_or_text")]
    pub poll_interval_seconds: u32,
    #[serde(rename = "playInBackground")]
    pub play_in_background: bool,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            poll_interval_seconds: DEFAULT_POLL_INTERVAL_SECONDS,
            play_in_background: false,
        }
    }
}

impl Options {
    pub fn poll_interval(&self) -> Duration {
        let seconds = self.poll_interval_seconds.max(MIN_POLL_INTERVAL_SECONDS);
        Duration::from_secs(u64::from(seconds))
    }
}

// Older stores hold the interval as the raw form-field text, e.g. "15".
fn interval_from_number_or_text<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Number(u32),
        Text(String),
    }

    match Raw::deserialize(deserializer)? {
        Raw::Number(value) => Ok(value),
        Raw::Text(text) => text.trim().parse().map_err(serde::de::Error::custom),
    }
}
