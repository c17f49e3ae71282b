use crate::{ControlChannel, DisplayedImage, Flag, PageClass};

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct WallViewModel {
    pub active: bool,
    pub flags: Vec<Flag>,
    pub poll_interval_seconds: u32,
    pub play_in_background: bool,
    pub polling: bool,
    pub page_classes: Vec<PageClass>,
    /// Newest first.
    pub images: Vec<DisplayedImage>,
    pub image_capacity: usize,
    pub controls: Vec<ControlView>,
    pub dirty: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ControlView {
    pub channel: ControlChannel,
    pub enabled: bool,
}
