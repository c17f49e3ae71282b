#![deny(missing_docs)]
//! Shared logging utilities for the image wall workspace.
//!
//! This crate provides the `wall_*` logging macros used across the codebase,
//! a per-thread poll cycle counter that log lines can carry, and a minimal
//! test initializer for the global logger.

use std::cell::Cell;

thread_local! {
    /// Number of content polls issued from the current thread.
    static POLL_CYCLE: Cell<u64> = const { Cell::new(0) };
}

/// Advances the poll cycle counter for the current thread and returns the new value.
/// The app's event loop calls this once per issued content poll.
pub fn next_poll_cycle() -> u64 {
    POLL_CYCLE.with(|v| {
        let next = v.get().wrapping_add(1);
        v.set(next);
        next
    })
}

/// Retrieves the poll cycle counter for the current thread.
/// Returns 0 if no poll has been issued yet.
pub fn poll_cycle() -> u64 {
    POLL_CYCLE.with(|v| v.get())
}

/// Logs a trace-level message using the global logging facade.
#[macro_export]
macro_rules! wall_trace {
    ($($arg:tt)*) => {{
        log::trace!($($arg)*);
    }};
}

/// Logs a debug-level message using the global logging facade.
#[macro_export]
macro_rules! wall_debug {
    ($($arg:tt)*) => {{
        log::debug!($($arg)*);
    }};
}

/// Logs an info-level message using the global logging facade.
#[macro_export]
macro_rules! wall_info {
    ($($arg:tt)*) => {{
        log::info!($($arg)*);
    }};
}

/// Logs a warn-level message using the global logging facade.
#[macro_export]
macro_rules! wall_warn {
    ($($arg:tt)*) => {{
        log::warn!($($arg)*);
    }};
}

/// Logs an error-level message using the global logging facade.
#[macro_export]
macro_rules! wall_error {
    ($($arg:tt)*) => {{
        log::error!($($arg)*);
    }};
}

/// Initializes a simple terminal logger for use in tests.
///
/// Safe to call from every test: a second initialization is ignored.
pub fn initialize_for_tests() {
    use simplelog::{ColorChoice, Config, TermLogger, TerminalMode};

    let level = if cfg!(debug_assertions) {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Info
    };

    let _ = TermLogger::init(level, Config::default(), TerminalMode::Mixed, ColorChoice::Auto);
}
