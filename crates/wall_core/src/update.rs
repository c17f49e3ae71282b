use wall_logging::{wall_debug, wall_info};

use crate::{Effect, Flag, Msg, ReschedulePolicy, SpeedStep, WallState};

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: WallState, msg: Msg) -> (WallState, Vec<Effect>) {
    let effects = match msg {
        Msg::Startup(snapshot) => {
            if !state.begin_startup(snapshot.options) {
                wall_debug!("startup ignored: already started");
                return (state, Vec::new());
            }
            let mut effects = state.set_flag(Flag::ScrolledAway, snapshot.scroll_offset > 0);
            effects.extend(state.set_flag(Flag::TabHidden, snapshot.tab_hidden));
            // Clearing the guard last lets the first poll see the complete initial state.
            effects.extend(state.set_flag(Flag::Init, false));
            effects
        }
        Msg::SetFlag { flag, value } => state.set_flag(flag, value),
        Msg::WindowBlurred => {
            if state.options().play_in_background {
                Vec::new()
            } else {
                state.set_flag(Flag::WindowUnfocused, true)
            }
        }
        Msg::WindowFocused => state.set_flag(Flag::WindowUnfocused, false),
        Msg::Scrolled { offset } => state.set_flag(Flag::ScrolledAway, offset > 0),
        Msg::VisibilityChanged { hidden } => state.set_flag(Flag::TabHidden, hidden),
        Msg::GalleryChanged { open } => state.set_flag(Flag::GalleryOpen, open),
        Msg::TogglePause => {
            let paused = state.get_flag(Flag::ManualPause);
            state.set_flag(Flag::ManualPause, !paused)
        }
        Msg::ToggleBossMode => {
            let boss = state.get_flag(Flag::BossMode);
            state.set_flag(Flag::BossMode, !boss)
        }
        Msg::PollIntervalChanged(seconds) => change_interval(&mut state, seconds),
        Msg::SpeedStep(step) => {
            let current = state.options().poll_interval_seconds;
            let next = match step {
                SpeedStep::Faster => current.saturating_sub(1),
                SpeedStep::Slower => current.saturating_add(1),
            };
            change_interval(&mut state, next)
        }
        Msg::PlayInBackgroundChanged(value) => {
            state.set_play_in_background(value);
            vec![Effect::SaveOptions(*state.options())]
        }
        Msg::FetchNow => {
            if state.is_active() {
                let mut effects: Vec<Effect> = state.request_poll().into_iter().collect();
                effects.push(state.arm_timer());
                effects
            } else {
                wall_debug!("fetch-now ignored while inactive");
                Vec::new()
            }
        }
        Msg::TimerFired { generation } => {
            if !state.take_timer(generation) {
                wall_debug!("stale timer {} ignored", generation);
                Vec::new()
            } else if !state.is_active() {
                Vec::new()
            } else {
                state.request_poll().into_iter().collect()
            }
        }
        Msg::ContentFetched {
            ticket,
            result,
            marker,
        } => {
            if !state.complete_poll(ticket) {
                wall_debug!("stale content completion {} ignored", ticket);
                return (state, Vec::new());
            }
            let policy = state.settings().policy;
            let mut effects = Vec::new();
            let succeeded = match result {
                Ok(incoming) => {
                    match state.prepare_image(incoming, marker) {
                        Some(image) => effects.push(Effect::LoadImage { image }),
                        None => wall_debug!("content without uri ignored"),
                    }
                    true
                }
                Err(failure) => {
                    wall_debug!("content poll {} failed: {}", ticket, failure.reason);
                    false
                }
            };
            let reschedule = match policy {
                ReschedulePolicy::AfterSuccess => succeeded,
                ReschedulePolicy::Always => true,
            };
            if reschedule && state.is_active() {
                effects.push(state.arm_timer());
            }
            effects
        }
        Msg::ImageLoaded { image } => {
            // A load that finishes after polling stopped must not show up.
            if state.is_active() {
                state.attach_image(image)
            } else {
                wall_debug!("image {} dropped: inactive when load finished", image.id);
                Vec::new()
            }
        }
        Msg::ImageLoadFailed { id } => {
            wall_debug!("image {} failed to load", id);
            Vec::new()
        }
        Msg::DropOldest => state.drop_oldest().into_iter().collect(),
        Msg::ControlRequested(channel) => match state.control_mut(channel).begin() {
            Some(ticket) => {
                wall_info!("{} requested", channel.path());
                vec![Effect::SendControl { channel, ticket }]
            }
            None => {
                wall_debug!("{} refused: control disabled", channel.path());
                Vec::new()
            }
        },
        Msg::ControlCompleted {
            channel,
            ticket,
            result,
        } => {
            if !state.control_mut(channel).complete(ticket) {
                wall_debug!("stale {} completion ignored", channel.path());
                return (state, Vec::new());
            }
            match result {
                Ok(delay) => vec![Effect::ScheduleControlReenable { channel, delay }],
                Err(failure) => {
                    // Nothing will re-enable the control later, so do it now.
                    wall_debug!("{} failed: {}", channel.path(), failure.reason);
                    state.control_mut(channel).reenable();
                    Vec::new()
                }
            }
        }
        Msg::ControlReenableDue(channel) => {
            state.control_mut(channel).reenable();
            Vec::new()
        }
        Msg::Tick | Msg::NoOp => Vec::new(),
    };

    (state, effects)
}

fn change_interval(state: &mut WallState, seconds: u32) -> Vec<Effect> {
    let stored = state.set_poll_interval(seconds);
    wall_debug!("poll interval set to {}s", stored);
    let mut effects = vec![Effect::SaveOptions(*state.options())];
    if state.settings().policy == ReschedulePolicy::AfterSuccess && state.is_active() {
        effects.push(state.arm_timer());
    }
    effects
}
