// Copyright 2025 Accenture.
//
// SPDX-License-Identifier: Apache-2.0

//! Line format of the console output
//!
//! `HH:MM:SS.mmm target (pid tid): LEVEL: message`, with the source location added on
//! trace level. Targets and ids are padded to the widest value seen so far.

use console::{style, Color, StyledObject};
use log::Level;
use std::io::{self, Write};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::SystemTime;
use time::format_description::FormatItem;
use time::macros::format_description;
use time::OffsetDateTime;

const TIMESTAMP_FORMAT: &[FormatItem<'static>] =
    format_description!("[hour]:[minute]:[second].[subsecond digits:3]");

static TARGET_WIDTH: AtomicUsize = AtomicUsize::new(12);
static ID_WIDTH: AtomicUsize = AtomicUsize::new(4);

/// A single log line
#[derive(Debug)]
pub struct Line<'a> {
    pub timestamp: SystemTime,
    pub level: Level,
    pub target: &'a str,
    pub file: Option<&'a str>,
    pub line: Option<u32>,
    pub tgid: u32,
    pub tid: u32,
    pub args: &'a std::fmt::Arguments<'a>,
}

pub fn format<W: Write>(line: &Line, mut writer: W) -> io::Result<()> {
    let timestamp = OffsetDateTime::from(line.timestamp)
        .format(TIMESTAMP_FORMAT)
        .map_err(io::Error::other)?;

    let level = style(line.level).bold().fg(level_color(line.level));
    let target = padded(line.target, &TARGET_WIDTH, true);
    let tgid = padded(&format!("{:x}", line.tgid), &ID_WIDTH, true);
    let tid = padded(&format!("{:x}", line.tid), &ID_WIDTH, false);
    let args = line.args;

    if line.level == Level::Trace {
        let file = line.file.unwrap_or("file unknown");
        let file = style(file).fg(hash_color(file));
        let number = line.line.unwrap_or(0);
        writeln!(
            writer,
            "{timestamp} {target} ({tgid} {tid}): {level:<5}: {file}:{number}: {args}"
        )
    } else {
        writeln!(
            writer,
            "{timestamp} {target} ({tgid} {tid}): {level:<5}: {args}"
        )
    }
}

fn level_color(level: Level) -> Color {
    match level {
        Level::Error => Color::Red,
        Level::Warn => Color::Yellow,
        Level::Info => Color::Green,
        Level::Debug => Color::Color256(243),
        Level::Trace => Color::White,
    }
}

/// Stable color derived from the text so that the same target is always colored the same.
fn hash_color(text: &str) -> Color {
    let hash = text.bytes().fold(42u8, |c, x| c ^ x);
    // Skip the darkest shades, they vanish on dark terminals.
    let hash = match hash {
        c @ 0..=1 => c + 2,
        c @ 16..=21 => c + 6,
        c @ 232..=240 => c + 9,
        c => c,
    };
    Color::Color256(hash)
}

/// Pad `text` to the widest value recorded in `width`, widening it if needed.
fn padded(text: &str, width: &AtomicUsize, align_left: bool) -> StyledObject<String> {
    let len = width.fetch_max(text.len(), Ordering::Relaxed).max(text.len());
    let text = if align_left {
        format!("{text:<len$}")
    } else {
        format!("{text:>len$}")
    };
    let color = hash_color(text.trim());
    style(text).fg(color)
}
