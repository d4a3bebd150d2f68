// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Failures relayed from finish operations, with their call-site context

use crate::trace::CallSite;
use std::fmt;

/// Marker line separating a failure's own trace from the call site
pub const CALLED_FROM_MARKER: &str = "--- Called from: ---";

/// Errors that may carry a trace recorded where they were raised
pub trait TracedError {
    fn trace(&self) -> Option<String> {
        None
    }
}

/// Outcome of an adapted call: the finish operation's value, or its failure
pub type Settlement<T, E> = Result<T, Rejection<E>>;

/// Trace of a rejected call, kept as separate segments
#[derive(Debug, Clone)]
pub struct StitchedTrace {
    failure: Option<String>,
    called_from: CallSite,
}

impl StitchedTrace {
    /// A blank failure trace counts as none
    pub fn new(failure: Option<String>, called_from: CallSite) -> Self {
        Self {
            failure: failure.filter(|trace| !trace.trim().is_empty()),
            called_from,
        }
    }

    /// Trace recorded by the failure itself, if it had one
    pub fn failure(&self) -> Option<&str> {
        self.failure.as_deref()
    }

    /// Where the adapted call was made
    pub fn called_from(&self) -> &CallSite {
        &self.called_from
    }
}

impl fmt::Display for StitchedTrace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.failure {
            Some(failure) => {
                f.write_str(failure)?;
                if !failure.ends_with('\n') {
                    f.write_str("\n")?;
                }
                write!(f, "{}\n{}", CALLED_FROM_MARKER, self.called_from)
            }
            None => write!(f, "{}", self.called_from),
        }
    }
}

/// A finish-operation failure, unchanged, plus the stitched trace
///
/// Displays exactly as the wrapped error and reports it as its `source()`,
/// so callers can match on the original failure.
#[derive(Debug)]
pub struct Rejection<E> {
    error: E,
    trace: StitchedTrace,
}

impl<E: TracedError> Rejection<E> {
    pub fn new(error: E, called_from: CallSite) -> Self {
        let failure = error.trace();
        Self {
            error,
            trace: StitchedTrace::new(failure, called_from),
        }
    }
}

impl<E> Rejection<E> {
    pub fn error(&self) -> &E {
        &self.error
    }

    pub fn into_error(self) -> E {
        self.error
    }

    pub fn trace(&self) -> &StitchedTrace {
        &self.trace
    }

    /// Text form of the trace, segments joined by [`CALLED_FROM_MARKER`]
    pub fn render_trace(&self) -> String {
        self.trace.to_string()
    }
}

impl<E: fmt::Display> fmt::Display for Rejection<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.error, f)
    }
}

impl<E> std::error::Error for Rejection<E>
where
    E: std::error::Error + 'static,
{
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.error)
    }
}

#[cfg(test)]
#[path = "rejection_tests.rs"]
mod tests;
