// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Adaptation of two-phase (start + finish) operations into promises
//!
//! A two-phase operation begins work in `start`, which later invokes a
//! completion callback with a source object and an in-flight handle; the
//! caller then passes the handle to `finish` to obtain the result. [`Adapted`]
//! wraps such an operation and offers two entry points:
//!
//! - [`Adapted::start_with_callback`] forwards to the original untouched.
//! - [`Adapted::start`] returns a [`Promise`] of the finish result, with the
//!   call site preserved on failure.

use crate::promise::{self, Promise};
use crate::rejection::{Rejection, TracedError};
use crate::registry::OperationPair;
use crate::trace::{CallSite, TraceCapture};
use std::fmt;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::Arc;

/// Callback handed to a start operation; invoked once with the source object
/// and the in-flight result handle
pub type Completion<S, H> = Box<dyn FnOnce(&S, H) + Send + 'static>;

/// A start/finish operation pair on some target type
pub trait TwoPhaseOperation: Send + Sync + 'static {
    /// Object the start operation is called on
    type Target: ?Sized;
    /// Arguments of the start operation, minus the completion callback
    type Args;
    /// Object the completion callback receives
    type Source: 'static;
    /// In-flight result handle passed to `finish`
    type Handle: 'static;
    type Output: Send + 'static;
    type Error: TracedError + Send + 'static;

    /// Symbol fragments of the wrappers exposing this operation; their frames
    /// are left out of captured call sites
    const HIDDEN_FRAMES: &'static [&'static str] = &[];

    /// Begin the operation; `completion` must be invoked exactly once
    fn start(
        &self,
        target: &Self::Target,
        args: Self::Args,
        completion: Completion<Self::Source, Self::Handle>,
    );

    /// Extract the outcome of a completed operation
    fn finish(
        &self,
        source: &Self::Source,
        handle: Self::Handle,
    ) -> Result<Self::Output, Self::Error>;
}

/// Promise-returning decorator over a [`TwoPhaseOperation`]
pub struct Adapted<Op> {
    pair: OperationPair,
    op: Arc<Op>,
    capture: TraceCapture,
}

impl<Op: TwoPhaseOperation> Adapted<Op> {
    pub fn new(pair: OperationPair, op: Op, capture: TraceCapture) -> Self {
        Self {
            pair,
            op: Arc::new(op),
            capture,
        }
    }

    pub fn pair(&self) -> &OperationPair {
        &self.pair
    }

    /// Call the original start operation with an explicit callback
    pub fn start_with_callback(
        &self,
        target: &Op::Target,
        args: Op::Args,
        completion: Completion<Op::Source, Op::Handle>,
    ) {
        self.op.start(target, args, completion)
    }

    /// Start the operation and return a promise of its finish result.
    ///
    /// The call site is captured before the operation starts. A failure from
    /// `finish` rejects the promise with that failure and its stitched trace;
    /// a panic in `finish` resumes wherever the promise is awaited.
    #[track_caller]
    pub fn start(&self, target: &Op::Target, args: Op::Args) -> Promise<Op::Output, Op::Error> {
        let called_from = CallSite::capture_hiding(self.capture, Op::HIDDEN_FRAMES);
        let (resolver, promise) = promise::pending();

        tracing::trace!(
            operation = %self.pair,
            location = %called_from.location(),
            "starting adapted call"
        );

        let op = Arc::clone(&self.op);
        let completion: Completion<Op::Source, Op::Handle> =
            Box::new(move |source: &Op::Source, handle: Op::Handle| {
                match catch_unwind(AssertUnwindSafe(|| op.finish(source, handle))) {
                    Ok(Ok(output)) => resolver.settle(Ok(output)),
                    Ok(Err(error)) => resolver.settle(Err(Rejection::new(error, called_from))),
                    Err(payload) => resolver.relay_panic(payload),
                }
            });
        self.op.start(target, args, completion);

        promise
    }
}

impl<Op> fmt::Debug for Adapted<Op> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Adapted")
            .field("pair", &self.pair)
            .field("capture", &self.capture)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
#[path = "adapter_tests.rs"]
mod tests;
