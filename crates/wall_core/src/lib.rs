//! Image wall core: pure state machine, poll bookkeeping and view-model helpers.
pub mod bitset;
mod control;
mod effect;
mod flags;
mod image;
mod msg;
mod options;
mod poll;
mod settings;
mod state;
mod update;
mod view_model;
mod wall;

pub use control::{ControlChannel, ControlPhase, DEFAULT_REENABLE_DELAY};
pub use effect::{Effect, PageClass};
pub use flags::{Flag, StateFlags, Transition};
pub use image::{cache_busted_uri, DisplayedImage, ImageId, IncomingImage};
pub use msg::{Msg, RequestFailed, SpeedStep, StartupSnapshot};
pub use options::{Options, DEFAULT_POLL_INTERVAL_SECONDS, MIN_POLL_INTERVAL_SECONDS};
pub use poll::{PollPhase, ReschedulePolicy, Ticket, TimerGeneration};
pub use settings::WallSettings;
pub use state::WallState;
pub use update::update;
pub use view_model::{ControlView, WallViewModel};
pub use wall::{ImageWall, DEFAULT_CAPACITY, LEGACY_CAPACITY};
