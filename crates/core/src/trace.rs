// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Call-site capture for adapted calls
//!
//! A call that completes through a callback loses its original stack: by the
//! time the failure surfaces, only the completion machinery is on the stack.
//! [`CallSite`] records where the call was made, before the gap.

use serde::Deserialize;
use std::backtrace::{Backtrace, BacktraceStatus};
use std::fmt;
use std::panic::Location;

/// How much of the call stack to record when an adapted call starts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TraceCapture {
    /// Only the caller's source location
    #[default]
    Caller,
    /// Caller location, plus a backtrace when `RUST_BACKTRACE` or
    /// `RUST_LIB_BACKTRACE` enable one
    Env,
    /// Caller location plus an unconditional backtrace
    Force,
}

/// Symbol fragments identifying frames of the adaptation machinery itself
const INTERNAL_FRAMES: &[&str] = &[
    "cog_core::adapter",
    "cog_core::trace",
    "std::backtrace",
    "backtrace_rs",
];

/// Snapshot of where an adapted call was made
#[derive(Debug, Clone)]
pub struct CallSite {
    location: &'static Location<'static>,
    frames: Vec<String>,
}

impl CallSite {
    /// Record the caller's location and, depending on `mode`, its backtrace.
    ///
    /// Frames belonging to the adapter are dropped so the result reads as if
    /// the caller had invoked the wrapped operation directly.
    #[track_caller]
    pub fn capture(mode: TraceCapture) -> Self {
        Self::capture_hiding(mode, &[])
    }

    /// Like [`CallSite::capture`], also dropping frames whose symbol contains
    /// any of `hidden` (the wrappers that installed an adapted operation)
    #[track_caller]
    pub fn capture_hiding(mode: TraceCapture, hidden: &[&str]) -> Self {
        let location = Location::caller();
        let frames = match mode {
            TraceCapture::Caller => Vec::new(),
            TraceCapture::Env => external_frames(&Backtrace::capture(), hidden),
            TraceCapture::Force => external_frames(&Backtrace::force_capture(), hidden),
        };
        Self { location, frames }
    }

    /// Source location of the call
    pub fn location(&self) -> &'static Location<'static> {
        self.location
    }

    /// Rendered backtrace frames with adapter frames removed
    pub fn frames(&self) -> &[String] {
        &self.frames
    }
}

impl fmt::Display for CallSite {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "at {}", self.location)?;
        for frame in &self.frames {
            writeln!(f, "{}", frame)?;
        }
        Ok(())
    }
}

fn external_frames(backtrace: &Backtrace, hidden: &[&str]) -> Vec<String> {
    if backtrace.status() != BacktraceStatus::Captured {
        return Vec::new();
    }
    filter_frames(&backtrace.to_string(), hidden)
}

/// Split a rendered backtrace into frames and drop the adapter's own, plus
/// any matching `hidden`
pub(crate) fn filter_frames(rendered: &str, hidden: &[&str]) -> Vec<String> {
    let mut frames: Vec<String> = Vec::new();
    for line in rendered.lines() {
        match frames.last_mut() {
            // Source lines ("at file:line") belong to the preceding frame
            Some(last) if !is_frame_header(line) => {
                last.push('\n');
                last.push_str(line);
            }
            _ => frames.push(line.to_string()),
        }
    }

    frames
        .into_iter()
        .filter(|frame| {
            !INTERNAL_FRAMES
                .iter()
                .chain(hidden)
                .any(|internal| frame.contains(internal))
        })
        .collect()
}

/// Source location where a failure was raised
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FailureSite(&'static Location<'static>);

impl FailureSite {
    /// The location of the caller
    #[track_caller]
    pub fn here() -> Self {
        Self(Location::caller())
    }

    pub fn location(&self) -> &'static Location<'static> {
        self.0
    }
}

impl fmt::Display for FailureSite {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "raised at {}", self.0)
    }
}

fn is_frame_header(line: &str) -> bool {
    match line.trim_start().split_once(": ") {
        Some((index, _)) => !index.is_empty() && index.chars().all(|c| c.is_ascii_digit()),
        None => false,
    }
}

#[cfg(test)]
#[path = "trace_tests.rs"]
mod tests;
