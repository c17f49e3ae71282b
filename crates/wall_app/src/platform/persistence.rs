use std::path::Path;

use wall_core::Options;
use wall_engine::{storage_factory, KeyValueStorage};
use wall_logging::{wall_debug, wall_info, wall_warn};

/// Storage key of the serialized options.
pub(crate) const OPTIONS_KEY: &str = "np_store";

/// Options persisted as JSON under [`OPTIONS_KEY`]. Storage problems are logged, never surfaced.
pub(crate) struct OptionsStore {
    storage: Box<dyn KeyValueStorage>,
}

impl OptionsStore {
    pub(crate) fn open(path: &Path) -> Self {
        Self::with_storage(storage_factory(path))
    }

    pub(crate) fn with_storage(storage: Box<dyn KeyValueStorage>) -> Self {
        Self { storage }
    }

    pub(crate) fn load(&self) -> Options {
        let text = match self.storage.get_item(OPTIONS_KEY) {
            Ok(Some(text)) => text,
            Ok(None) => {
                wall_debug!("no stored options, using defaults");
                return Options::default();
            }
            Err(err) => {
                wall_warn!("Failed to read stored options: {}", err);
                return Options::default();
            }
        };

        match serde_json::from_str(&text) {
            Ok(options) => {
                wall_info!("Loaded stored options {:?}", options);
                options
            }
            Err(err) => {
                wall_warn!("Stored options do not match the schema ({}), using defaults", err);
                Options::default()
            }
        }
    }

    pub(crate) fn save(&mut self, options: &Options) {
        let text = match serde_json::to_string(options) {
            Ok(text) => text,
            Err(err) => {
                wall_warn!("Failed to serialize options: {}", err);
                return;
            }
        };
        if let Err(err) = self.storage.set_item(OPTIONS_KEY, &text) {
            wall_warn!("Failed to store options: {}", err);
        }
    }
}
