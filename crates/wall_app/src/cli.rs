use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use url::Url;
use wall_core::WallSettings;
use wall_engine::FetchSettings;

use crate::platform::logging::LogDestination;

#[derive(Parser, Debug)]
#[command(name = "wall", about = "Image wall that keeps polling an image server")]
pub struct Cli {
    /// Base URL of the image server; `get`, `reset` and `flush` live below it
    #[arg(long, default_value = "http://127.0.0.1:5000/")]
    pub server: Url,

    /// File holding the persisted options
    #[arg(long, default_value = "wall_store.ron")]
    pub store: PathBuf,

    /// Old client behaviour: 100 images, reschedule after every poll
    #[arg(long)]
    pub legacy: bool,

    /// Number of images kept on the wall
    #[arg(long, value_parser = parse_capacity)]
    pub capacity: Option<usize>,

    /// Keep polling while the window is unfocused
    #[arg(long)]
    pub play_in_background: bool,

    #[arg(long, value_enum, default_value_t = LogTarget::File)]
    pub log: LogTarget,

    /// Log at debug level
    #[arg(short, long)]
    pub verbose: bool,
}

const MAX_CAPACITY: usize = 1000;

fn parse_capacity(text: &str) -> Result<usize, String> {
    let capacity: usize = text
        .parse()
        .map_err(|err| format!("`{text}` is not a number: {err}"))?;
    if (1..=MAX_CAPACITY).contains(&capacity) {
        Ok(capacity)
    } else {
        Err(format!("capacity must be between 1 and {MAX_CAPACITY}"))
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum LogTarget {
    /// ./wall.log
    File,
    Terminal,
    Both,
}

impl From<LogTarget> for LogDestination {
    fn from(target: LogTarget) -> Self {
        match target {
            LogTarget::File => LogDestination::File,
            LogTarget::Terminal => LogDestination::Terminal,
            LogTarget::Both => LogDestination::Both,
        }
    }
}

/// Everything the app needs once the command line is parsed.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub fetch: FetchSettings,
    pub wall: WallSettings,
    pub store_path: PathBuf,
    pub play_in_background: bool,
}

impl Cli {
    pub fn into_config(self) -> AppConfig {
        let mut wall = if self.legacy {
            WallSettings::legacy()
        } else {
            WallSettings::default()
        };
        if let Some(capacity) = self.capacity {
            wall.capacity = capacity;
        }

        AppConfig {
            fetch: FetchSettings::default().with_base_url(self.server),
            wall,
            store_path: self.store,
            play_in_background: self.play_in_background,
        }
    }
}
