use std::time::Duration;

use crate::{ControlChannel, DisplayedImage, ImageId, Options, Ticket, TimerGeneration};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Issue `GET ./get`; the completion must echo `ticket`.
    FetchContent { ticket: Ticket },
    /// Cancel the transport behind `ticket`.
    AbortContent { ticket: Ticket },
    /// Load the asset; report back with `ImageLoaded` or `ImageLoadFailed`.
    LoadImage { image: DisplayedImage },
    AttachImage { image: DisplayedImage },
    DetachImage { id: ImageId },
    /// Fire `TimerFired { generation }` after `delay`, replacing any pending timer.
    ArmTimer {
        generation: TimerGeneration,
        delay: Duration,
    },
    DisarmTimer,
    SetPageClass { class: PageClass, present: bool },
    /// Best effort; platforms that cannot blur ignore it.
    BlurWindow,
    SaveOptions(Options),
    SendControl { channel: ControlChannel, ticket: Ticket },
    ScheduleControlReenable {
        channel: ControlChannel,
        delay: Duration,
    },
}

/// Whole-page marker classes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum PageClass {
    Boss,
    AtTop,
}

impl PageClass {
    pub const fn name(self) -> &'static str {
        match self {
            PageClass::Boss => "boss",
            PageClass::AtTop => "atTop",
        }
    }
}
