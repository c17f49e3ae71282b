use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{mpsc, Arc};
use std::thread;
use std::time::Duration;

use wall_core::{update, Msg, StartupSnapshot, WallState};
use wall_logging::wall_info;

use super::effects::EffectRunner;
use super::input::{self, HELP};
use super::persistence::OptionsStore;
use super::render;
use crate::cli::AppConfig;

const TICK_INTERVAL: Duration = Duration::from_millis(250);

pub fn run_app(config: AppConfig) -> anyhow::Result<()> {
    let (msg_tx, msg_rx) = mpsc::channel::<Msg>();
    let quit = Arc::new(AtomicBool::new(false));

    let store = OptionsStore::open(&config.store_path);
    let mut options = store.load();
    if config.play_in_background {
        options.play_in_background = true;
    }

    wall_info!(
        "wall starting: server={} policy={:?} capacity={}",
        config.fetch.base_url,
        config.wall.policy,
        config.wall.capacity
    );
    let mut runner = EffectRunner::new(config.fetch, store, msg_tx.clone())?;
    let mut app = App {
        state: WallState::new(config.wall),
    };

    input::spawn_reader(msg_tx.clone(), quit.clone());

    // Background tick to coalesce rendering.
    let tick_tx = msg_tx.clone();
    thread::spawn(move || {
        while tick_tx.send(Msg::Tick).is_ok() {
            thread::sleep(TICK_INTERVAL);
        }
    });
    drop(msg_tx);

    println!("{HELP}");
    app.dispatch(
        Msg::Startup(StartupSnapshot {
            options,
            scroll_offset: 0,
            tab_hidden: false,
        }),
        &mut runner,
    );

    while let Ok(msg) = msg_rx.recv() {
        if quit.load(Ordering::SeqCst) {
            break;
        }
        app.dispatch(msg, &mut runner);
    }

    wall_info!("wall stopped");
    Ok(())
}

struct App {
    state: WallState,
}

impl App {
    fn dispatch(&mut self, msg: Msg, runner: &mut EffectRunner) {
        let state = std::mem::take(&mut self.state);
        let (mut state, effects) = update(state, msg);
        runner.enqueue(effects);
        if state.consume_dirty() {
            println!("{}", render::status_line(&state.view()));
        }
        self.state = state;
    }
}
