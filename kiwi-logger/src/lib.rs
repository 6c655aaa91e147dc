// Copyright 2025 Accenture.
//
// SPDX-License-Identifier: Apache-2.0

//! The kiwi-logger
//!
//! Console logger for the `log` facade used by the kiwi binaries.

use log::{LevelFilter, Log, Metadata, Record};
use std::io;
use std::str::FromStr;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::SystemTime;

pub mod fmt;
mod thread;

const ENV_RUST_LOG: &str = "RUST_LOG";

/// Initialize the logger.
///
/// A valid level passed as `RUST_LOG` environment variable overrides `level`.
/// Enable output to `stdout` via `console`.
pub fn init(level: LevelFilter, console: bool) {
    let logger = Logger::new(console);

    // Set the maximum log level the log subsystem will forward to this logger impl.
    log::set_max_level(level_from_env().unwrap_or(level));
    // Set the logger in the global subsystem.
    log::set_boxed_logger(Box::new(logger)).expect("failed to set logger")
}

/// The kiwi logger.
#[derive(Debug)]
pub struct Logger {
    console: bool,
    /// Set once a failed console write has been reported
    write_failed: AtomicBool,
}

impl Logger {
    /// Create a new logger.
    pub fn new(console: bool) -> Self {
        Self {
            console,
            write_failed: AtomicBool::new(false),
        }
    }

    /// Report the first failed console write on `stderr`. Returns whether it was reported.
    fn report(&self, result: io::Result<()>) -> bool {
        match result {
            Err(e) if !self.write_failed.swap(true, Ordering::Relaxed) => {
                eprintln!("failed to write to console: {e}");
                true
            }
            _ => false,
        }
    }
}

impl Log for Logger {
    /// Check if a log message with the specified metadata would be logged.
    fn enabled(&self, metadata: &Metadata) -> bool {
        self.console && metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }

        let line = fmt::Line {
            timestamp: SystemTime::now(),
            level: record.level(),
            target: record.target(),
            file: record.file(),
            line: record.line(),
            tgid: std::process::id(),
            tid: thread::id(),
            args: record.args(),
        };

        self.report(fmt::format(&line, io::stdout().lock()));
    }

    fn flush(&self) {}
}

/// Try to parse the log level from the environment variable `RUST_LOG`.
fn level_from_env() -> Option<LevelFilter> {
    std::env::var(ENV_RUST_LOG).ok().and_then(|s| {
        LevelFilter::from_str(&s)
            .inspect_err(|_| eprintln!("Failed to parse log level from `RUST_LOG={s}`"))
            .ok()
    })
}
