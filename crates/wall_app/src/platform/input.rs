use std::io::{self, BufRead};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{mpsc, Arc};
use std::thread;

use wall_core::{ControlChannel, Msg, SpeedStep};
use wall_logging::wall_debug;

pub const HELP: &str = "\
commands: p pause | b boss | + faster | - slower | n next | r reset | f flush
          hide | show | blur | focus | scroll <n> | gallery open|close
          interval <s> | background on|off | drop | q quit";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Send(Msg),
    Help,
    Quit,
}

/// Maps one line of terminal input to a command. `None` for anything unrecognised.
pub fn parse_command(line: &str) -> Option<Command> {
    let mut words = line.split_whitespace();
    let head = words.next()?;
    let arg = words.next();

    let msg = match (head, arg) {
        ("q" | "quit", _) => return Some(Command::Quit),
        ("?" | "h" | "help", _) => return Some(Command::Help),
        ("p" | "pause", None) => Msg::TogglePause,
        ("b" | "boss", None) => Msg::ToggleBossMode,
        ("+" | "faster", None) => Msg::SpeedStep(SpeedStep::Faster),
        ("-" | "slower", None) => Msg::SpeedStep(SpeedStep::Slower),
        ("n" | "next", None) => Msg::FetchNow,
        ("r" | "reset", None) => Msg::ControlRequested(ControlChannel::Reset),
        ("f" | "flush", None) => Msg::ControlRequested(ControlChannel::Flush),
        ("hide", None) => Msg::VisibilityChanged { hidden: true },
        ("show", None) => Msg::VisibilityChanged { hidden: false },
        ("blur", None) => Msg::WindowBlurred,
        ("focus", None) => Msg::WindowFocused,
        ("drop", None) => Msg::DropOldest,
        ("scroll", Some(offset)) => Msg::Scrolled {
            offset: offset.parse().ok()?,
        },
        ("gallery", Some("open")) => Msg::GalleryChanged { open: true },
        ("gallery", Some("close")) => Msg::GalleryChanged { open: false },
        ("interval", Some(seconds)) => Msg::PollIntervalChanged(seconds.parse().ok()?),
        ("background", Some("on")) => Msg::PlayInBackgroundChanged(true),
        ("background", Some("off")) => Msg::PlayInBackgroundChanged(false),
        _ => return None,
    };
    Some(Command::Send(msg))
}

/// Reads stdin on its own thread. Quit or end of input raises `quit` and wakes the loop.
pub fn spawn_reader(msg_tx: mpsc::Sender<Msg>, quit: Arc<AtomicBool>) {
    thread::spawn(move || {
        let stdin = io::stdin();
        for line in stdin.lock().lines() {
            let Ok(line) = line else { break };
            match parse_command(&line) {
                Some(Command::Send(msg)) => {
                    if msg_tx.send(msg).is_err() {
                        return;
                    }
                }
                Some(Command::Help) => println!("{HELP}"),
                Some(Command::Quit) => break,
                None if line.trim().is_empty() => {}
                None => {
                    wall_debug!("unknown input {:?}", line);
                    println!("{HELP}");
                }
            }
        }
        quit.store(true, Ordering::SeqCst);
        let _ = msg_tx.send(Msg::NoOp);
    });
}

#[cfg(test)]
mod tests {
    use wall_core::{ControlChannel, Msg, SpeedStep};

    use super::{parse_command, Command};

    fn sent(line: &str) -> Option<Msg> {
        match parse_command(line)? {
            Command::Send(msg) => Some(msg),
            _ => None,
        }
    }

    #[test]
    fn hotkeys_map_to_messages() {
        assert_eq!(sent("p"), Some(Msg::TogglePause));
        assert_eq!(sent("b"), Some(Msg::ToggleBossMode));
        assert_eq!(sent(" + "), Some(Msg::SpeedStep(SpeedStep::Faster)));
        assert_eq!(sent("slower"), Some(Msg::SpeedStep(SpeedStep::Slower)));
        assert_eq!(sent("n"), Some(Msg::FetchNow));
        assert_eq!(
            sent("flush"),
            Some(Msg::ControlRequested(ControlChannel::Flush))
        );
    }

    #[test]
    fn arguments_are_parsed() {
        assert_eq!(sent("scroll 120"), Some(Msg::Scrolled { offset: 120 }));
        assert_eq!(sent("interval 5"), Some(Msg::PollIntervalChanged(5)));
        assert_eq!(
            sent("gallery open"),
            Some(Msg::GalleryChanged { open: true })
        );
        assert_eq!(
            sent("background off"),
            Some(Msg::PlayInBackgroundChanged(false))
        );
        assert_eq!(sent("scroll up"), None);
        assert_eq!(sent("interval"), None);
        assert_eq!(sent("pause now"), None);
    }

    #[test]
    fn quit_help_and_garbage() {
        assert_eq!(parse_command("q"), Some(Command::Quit));
        assert_eq!(parse_command("help"), Some(Command::Help));
        assert_eq!(parse_command("dance"), None);
        assert_eq!(parse_command("   "), None);
    }
}
