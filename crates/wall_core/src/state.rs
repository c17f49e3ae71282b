use std::collections::{BTreeMap, BTreeSet};

use wall_logging::{wall_debug, wall_info};

use crate::control::ControlSwitch;
use crate::poll::PollController;
use crate::view_model::{ControlView, WallViewModel};
use crate::{
    ControlChannel, ControlPhase, DisplayedImage, Effect, Flag, ImageId, ImageWall, IncomingImage,
    Options, PageClass, PollPhase, ReschedulePolicy, StateFlags, WallSettings,
};

/// Everything the viewer knows about itself. Flags change only through [`WallState::set_flag`],
/// options only through the option setters, both of which report the effects to run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WallState {
    settings: WallSettings,
    flags: StateFlags,
    options: Options,
    started: bool,
    poll: PollController,
    controls: BTreeMap<ControlChannel, ControlSwitch>,
    wall: ImageWall,
    page_classes: BTreeSet<PageClass>,
    last_image_id: ImageId,
    dirty: bool,
}

impl Default for WallState {
    fn default() -> Self {
        Self::new(WallSettings::default())
    }
}

impl WallState {
    pub fn new(settings: WallSettings) -> Self {
        Self {
            settings,
            flags: StateFlags::initial(),
            options: Options::default(),
            started: false,
            poll: PollController::default(),
            controls: ControlChannel::ALL
                .into_iter()
                .map(|channel| (channel, ControlSwitch::default()))
                .collect(),
            wall: ImageWall::with_capacity(settings.capacity),
            page_classes: BTreeSet::new(),
            last_image_id: 0,
            dirty: false,
        }
    }

    pub fn settings(&self) -> &WallSettings {
        &self.settings
    }

    pub fn flags(&self) -> StateFlags {
        self.flags
    }

    pub fn get_flag(&self, flag: Flag) -> bool {
        self.flags.get(flag)
    }

    pub fn is_active(&self) -> bool {
        self.flags.is_active()
    }

    pub fn is_started(&self) -> bool {
        self.started
    }

    pub fn options(&self) -> &Options {
        &self.options
    }

    pub fn poll_phase(&self) -> PollPhase {
        self.poll.phase()
    }

    pub fn timer_armed(&self) -> bool {
        self.poll.timer_armed()
    }

    pub fn control_phase(&self, channel: ControlChannel) -> ControlPhase {
        self.controls
            .get(&channel)
            .map(ControlSwitch::phase)
            .unwrap_or_default()
    }

    pub fn wall(&self) -> &ImageWall {
        &self.wall
    }

    pub fn has_page_class(&self, class: PageClass) -> bool {
        self.page_classes.contains(&class)
    }

    pub fn view(&self) -> WallViewModel {
        WallViewModel {
            active: self.is_active(),
            flags: self.flags.iter_set().collect(),
            poll_interval_seconds: self.options.poll_interval_seconds,
            play_in_background: self.options.play_in_background,
            polling: self.poll.is_in_flight(),
            page_classes: self.page_classes.iter().copied().collect(),
            images: self.wall.iter().cloned().collect(),
            image_capacity: self.wall.capacity(),
            controls: self
                .controls
                .iter()
                .map(|(channel, switch)| ControlView {
                    channel: *channel,
                    enabled: switch.is_enabled(),
                })
                .collect(),
            dirty: self.dirty,
        }
    }

    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    /// Returns `false` if startup already happened.
    pub(crate) fn begin_startup(&mut self, options: Options) -> bool {
        if self.started {
            return false;
        }
        self.started = true;
        self.options = Options {
            poll_interval_seconds: self.settings.clamp_interval(options.poll_interval_seconds),
            ..options
        };
        true
    }

    /// The only write path for the flag set.
    pub(crate) fn set_flag(&mut self, flag: Flag, value: bool) -> Vec<Effect> {
        let transition = self.flags.apply(flag, value);
        wall_debug!(
            "set_flag {}={} bits={:#b} active={}",
            flag.label(),
            value,
            self.flags.bits(),
            transition.is_active
        );
        self.dirty = true;

        let mut effects = Vec::new();
        match flag {
            Flag::BossMode => {
                effects.extend(self.set_page_class(PageClass::Boss, value));
                if value {
                    effects.push(Effect::BlurWindow);
                }
            }
            Flag::ScrolledAway => {
                effects.extend(self.set_page_class(PageClass::AtTop, !value));
            }
            _ => {}
        }

        if transition.flipped() {
            if transition.is_active {
                wall_info!("polling resumed");
                if self.settings.policy == ReschedulePolicy::AfterSuccess {
                    effects.push(self.arm_timer());
                }
                effects.extend(self.request_poll());
            } else {
                wall_info!("polling halted by {}", flag.label());
                if self.poll.disarm_timer() {
                    effects.push(Effect::DisarmTimer);
                }
                if let Some(ticket) = self.poll.abort() {
                    effects.push(Effect::AbortContent { ticket });
                }
            }
        }
        effects
    }

    fn set_page_class(&mut self, class: PageClass, present: bool) -> Option<Effect> {
        let changed = if present {
            self.page_classes.insert(class)
        } else {
            self.page_classes.remove(&class)
        };
        changed.then_some(Effect::SetPageClass { class, present })
    }

    pub(crate) fn request_poll(&mut self) -> Option<Effect> {
        match self.poll.begin() {
            Some(ticket) => {
                self.dirty = true;
                Some(Effect::FetchContent { ticket })
            }
            None => {
                wall_debug!("poll refused: request already in flight");
                None
            }
        }
    }

    pub(crate) fn complete_poll(&mut self, ticket: crate::Ticket) -> bool {
        let matched = self.poll.complete(ticket);
        if matched {
            self.dirty = true;
        }
        matched
    }

    pub(crate) fn arm_timer(&mut self) -> Effect {
        Effect::ArmTimer {
            generation: self.poll.arm_timer(),
            delay: self.options.poll_interval(),
        }
    }

    pub(crate) fn take_timer(&mut self, generation: crate::TimerGeneration) -> bool {
        self.poll.take_timer(generation)
    }

    /// Returns the stored value after clamping.
    pub(crate) fn set_poll_interval(&mut self, seconds: u32) -> u32 {
        let seconds = self.settings.clamp_interval(seconds);
        self.options.poll_interval_seconds = seconds;
        self.dirty = true;
        seconds
    }

    pub(crate) fn set_play_in_background(&mut self, value: bool) {
        self.options.play_in_background = value;
        self.dirty = true;
    }

    pub(crate) fn prepare_image(
        &mut self,
        incoming: IncomingImage,
        marker: u64,
    ) -> Option<DisplayedImage> {
        let image = DisplayedImage::prepare(self.last_image_id + 1, incoming, marker)?;
        self.last_image_id = image.id;
        Some(image)
    }

    /// Attaches the image and returns effects for it and for every evicted image.
    pub(crate) fn attach_image(&mut self, image: DisplayedImage) -> Vec<Effect> {
        let evicted = self.wall.push(image.clone());
        self.dirty = true;
        let mut effects = Vec::with_capacity(1 + evicted.len());
        effects.push(Effect::AttachImage { image });
        effects.extend(
            evicted
                .into_iter()
                .map(|old| Effect::DetachImage { id: old.id }),
        );
        effects
    }

    pub(crate) fn drop_oldest(&mut self) -> Option<Effect> {
        let oldest = self.wall.pop()?;
        self.dirty = true;
        Some(Effect::DetachImage { id: oldest.id })
    }

    pub(crate) fn control_mut(&mut self, channel: ControlChannel) -> &mut ControlSwitch {
        self.dirty = true;
        self.controls.entry(channel).or_default()
    }
}
