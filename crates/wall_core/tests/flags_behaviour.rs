use std::sync::Once;
use std::time::Duration;

use pretty_assertions::assert_eq;
use wall_core::{update, Effect, Flag, Msg, PageClass, StartupSnapshot, WallState};

fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(wall_logging::initialize_for_tests);
}

fn set(state: WallState, flag: Flag, value: bool) -> (WallState, Vec<Effect>) {
    update(state, Msg::SetFlag { flag, value })
}

fn started() -> WallState {
    let (state, _) = update(WallState::default(), Msg::Startup(StartupSnapshot::default()));
    state
}

#[test]
fn initial_state_blocks_polling() {
    init_logging();
    let state = WallState::default();
    assert!(!state.is_active());
    assert!(state.get_flag(Flag::Init));
    assert_eq!(state.flags().bits(), 1);
}

#[test]
fn clearing_init_polls_immediately() {
    init_logging();
    let (state, effects) = set(WallState::default(), Flag::Init, false);

    assert!(state.is_active());
    assert_eq!(
        effects,
        vec![
            Effect::ArmTimer {
                generation: 1,
                delay: Duration::from_secs(10),
            },
            Effect::FetchContent { ticket: 1 },
        ]
    );
}

#[test]
fn startup_sets_initial_conditions_then_clears_init() {
    init_logging();
    let (state, effects) = update(WallState::default(), Msg::Startup(StartupSnapshot::default()));

    assert!(state.is_started());
    assert!(state.is_active());
    assert!(state.has_page_class(PageClass::AtTop));
    assert_eq!(
        effects,
        vec![
            Effect::SetPageClass {
                class: PageClass::AtTop,
                present: true,
            },
            Effect::ArmTimer {
                generation: 1,
                delay: Duration::from_secs(10),
            },
            Effect::FetchContent { ticket: 1 },
        ]
    );
}

#[test]
fn startup_while_hidden_stays_inactive() {
    init_logging();
    let snapshot = StartupSnapshot {
        tab_hidden: true,
        scroll_offset: 40,
        ..StartupSnapshot::default()
    };
    let (state, effects) = update(WallState::default(), Msg::Startup(snapshot));

    assert!(!state.is_active());
    assert!(!state.get_flag(Flag::Init));
    assert!(state.get_flag(Flag::TabHidden));
    assert!(state.get_flag(Flag::ScrolledAway));
    assert!(!state.has_page_class(PageClass::AtTop));
    assert!(effects.is_empty());
}

#[test]
fn second_startup_is_ignored() {
    init_logging();
    let state = started();
    let (next, effects) = update(
        state.clone(),
        Msg::Startup(StartupSnapshot {
            tab_hidden: true,
            ..StartupSnapshot::default()
        }),
    );
    assert_eq!(next, state);
    assert!(effects.is_empty());
}

#[test]
fn get_flag_reflects_last_write_independently() {
    init_logging();
    let mut state = WallState::default();
    let writes = [
        (Flag::ManualPause, true),
        (Flag::GalleryOpen, true),
        (Flag::ManualPause, false),
        (Flag::TabHidden, true),
        (Flag::GalleryOpen, true),
        (Flag::Init, false),
        (Flag::TabHidden, false),
    ];
    let mut expected = std::collections::BTreeMap::new();
    expected.insert(Flag::Init, true);

    for (flag, value) in writes {
        state = set(state, flag, value).0;
        expected.insert(flag, value);
        for (flag, value) in &expected {
            assert_eq!(state.get_flag(*flag), *value, "{flag:?}");
        }
    }
}

#[test]
fn active_exactly_when_no_flag_is_set() {
    init_logging();
    // Walk every subset of the seven flags.
    for subset in 0u32..(1 << Flag::ALL.len()) {
        let mut state = WallState::default();
        for (index, flag) in Flag::ALL.into_iter().enumerate() {
            state = set(state, flag, subset & (1 << index) != 0).0;
        }
        assert_eq!(state.flags().bits(), subset);
        assert_eq!(state.is_active(), subset == 0);
    }
}

#[test]
fn aggregate_stays_inactive_until_every_blocker_clears() {
    init_logging();
    let state = started();
    let (state, _) = set(state, Flag::ScrolledAway, true);
    let (state, _) = set(state, Flag::ManualPause, true);
    let (state, effects) = set(state, Flag::ScrolledAway, false);

    assert!(!state.is_active());
    assert!(!effects
        .iter()
        .any(|effect| matches!(effect, Effect::FetchContent { .. })));

    let (state, effects) = set(state, Flag::ManualPause, false);
    assert!(state.is_active());
    assert!(effects
        .iter()
        .any(|effect| matches!(effect, Effect::FetchContent { .. })));
}

#[test]
fn boss_mode_marks_page_and_blurs() {
    init_logging();
    let state = started();
    let (state, effects) = update(state, Msg::ToggleBossMode);

    assert!(state.get_flag(Flag::BossMode));
    assert_eq!(
        effects,
        vec![
            Effect::SetPageClass {
                class: PageClass::Boss,
                present: true,
            },
            Effect::BlurWindow,
            Effect::DisarmTimer,
            Effect::AbortContent { ticket: 1 },
        ]
    );

    let (state, effects) = update(state, Msg::ToggleBossMode);
    assert!(!state.has_page_class(PageClass::Boss));
    assert_eq!(
        effects[0],
        Effect::SetPageClass {
            class: PageClass::Boss,
            present: false,
        }
    );
    assert!(effects.contains(&Effect::FetchContent { ticket: 2 }));
}

#[test]
fn scrolling_toggles_at_top_marker() {
    init_logging();
    let state = started();
    let (state, effects) = update(state, Msg::Scrolled { offset: 120 });
    assert!(state.get_flag(Flag::ScrolledAway));
    assert_eq!(
        effects[0],
        Effect::SetPageClass {
            class: PageClass::AtTop,
            present: false,
        }
    );

    // Repeated scroll events do not repeat the class change.
    let (state, effects) = update(state, Msg::Scrolled { offset: 200 });
    assert!(effects.is_empty());

    let (state, effects) = update(state, Msg::Scrolled { offset: 0 });
    assert!(state.has_page_class(PageClass::AtTop));
    assert_eq!(
        effects[0],
        Effect::SetPageClass {
            class: PageClass::AtTop,
            present: true,
        }
    );
}

#[test]
fn window_blur_respects_play_in_background() {
    init_logging();
    let state = started();
    let (state, effects) = update(state, Msg::WindowBlurred);
    assert!(state.get_flag(Flag::WindowUnfocused));
    assert!(effects.contains(&Effect::AbortContent { ticket: 1 }));

    let (state, _) = update(state, Msg::WindowFocused);
    assert!(state.is_active());

    let (state, effects) = update(state, Msg::PlayInBackgroundChanged(true));
    assert_eq!(effects.len(), 1);
    assert!(matches!(&effects[0], Effect::SaveOptions(options) if options.play_in_background));

    let (state, effects) = update(state, Msg::WindowBlurred);
    assert!(!state.get_flag(Flag::WindowUnfocused));
    assert!(effects.is_empty());
}

#[test]
fn gallery_and_visibility_block_polling() {
    init_logging();
    let state = started();
    let (state, _) = update(state, Msg::GalleryChanged { open: true });
    assert!(state.get_flag(Flag::GalleryOpen));
    let (state, _) = update(state, Msg::VisibilityChanged { hidden: true });
    let (state, _) = update(state, Msg::GalleryChanged { open: false });
    assert!(!state.is_active());
    let (state, _) = update(state, Msg::VisibilityChanged { hidden: false });
    assert!(state.is_active());
}
