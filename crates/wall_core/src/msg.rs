use std::time::Duration;

use crate::{ControlChannel, DisplayedImage, Flag, ImageId, IncomingImage, Options, Ticket, TimerGeneration};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// One-time setup with persisted options and the initial platform state.
    Startup(StartupSnapshot),
    /// Raw flag write.
    SetFlag { flag: Flag, value: bool },
    WindowBlurred,
    WindowFocused,
    /// Vertical scroll offset of the wall, in pixels or lines.
    Scrolled { offset: u32 },
    VisibilityChanged { hidden: bool },
    GalleryChanged { open: bool },
    /// User picked a new poll interval, in seconds.
    PollIntervalChanged(u32),
    PlayInBackgroundChanged(bool),
    TogglePause,
    ToggleBossMode,
    SpeedStep(SpeedStep),
    /// Poll right away and restart the timer.
    FetchNow,
    TimerFired { generation: TimerGeneration },
    /// Content poll finished. `marker` seeds the cache-busting parameter of generic images.
    ContentFetched {
        ticket: Ticket,
        result: Result<IncomingImage, RequestFailed>,
        marker: u64,
    },
    ImageLoaded { image: DisplayedImage },
    ImageLoadFailed { id: ImageId },
    /// Removes the oldest image from the wall.
    DropOldest,
    ControlRequested(ControlChannel),
    /// Control request finished; `Ok` carries the re-enable delay.
    ControlCompleted {
        channel: ControlChannel,
        ticket: Ticket,
        result: Result<Duration, RequestFailed>,
    },
    ControlReenableDue(ControlChannel),
    /// UI/render tick to coalesce rendering.
    Tick,
    NoOp,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct StartupSnapshot {
    pub options: Options,
    pub scroll_offset: u32,
    pub tab_hidden: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpeedStep {
    /// Shorter interval.
    Faster,
    /// Longer interval.
    Slower,
}

/// Why a request produced nothing usable. Only ever logged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestFailed {
    pub reason: String,
}

impl RequestFailed {
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}
