// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Single-shot promise settled by a completion callback

use crate::rejection::Settlement;
use std::any::Any;
use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};
use tokio::sync::oneshot;

enum Outcome<T, E> {
    Settled(Settlement<T, E>),
    Panicked(Box<dyn Any + Send + 'static>),
}

/// Future of an adapted call's settlement
///
/// Settles once, when the wrapped operation's completion callback runs. If
/// the callback is dropped without running, the promise never settles.
#[must_use = "futures do nothing unless polled"]
pub struct Promise<T, E> {
    rx: oneshot::Receiver<Outcome<T, E>>,
    abandoned: bool,
}

/// Settling half of a [`Promise`], owned by the completion callback
pub(crate) struct Resolver<T, E> {
    tx: oneshot::Sender<Outcome<T, E>>,
}

/// Create a pending promise and the resolver that settles it
pub(crate) fn pending<T, E>() -> (Resolver<T, E>, Promise<T, E>) {
    let (tx, rx) = oneshot::channel();
    (
        Resolver { tx },
        Promise {
            rx,
            abandoned: false,
        },
    )
}

impl<T, E> Resolver<T, E> {
    pub(crate) fn settle(self, settlement: Settlement<T, E>) {
        // Receiver gone means the caller dropped the promise; nobody to tell
        let _ = self.tx.send(Outcome::Settled(settlement));
    }

    /// Hand a panic from the finish operation to whoever awaits the promise
    pub(crate) fn relay_panic(self, payload: Box<dyn Any + Send + 'static>) {
        let _ = self.tx.send(Outcome::Panicked(payload));
    }
}

impl<T, E> Future for Promise<T, E> {
    type Output = Settlement<T, E>;

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        if self.abandoned {
            return Poll::Pending;
        }

        match Pin::new(&mut self.rx).poll(cx) {
            Poll::Ready(Ok(Outcome::Settled(settlement))) => Poll::Ready(settlement),
            Poll::Ready(Ok(Outcome::Panicked(payload))) => std::panic::resume_unwind(payload),
            Poll::Ready(Err(_)) => {
                tracing::warn!("completion callback dropped without running, promise will not settle");
                self.abandoned = true;
                Poll::Pending
            }
            Poll::Pending => Poll::Pending,
        }
    }
}

impl<T, E> std::fmt::Debug for Promise<T, E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Promise")
            .field("abandoned", &self.abandoned)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
#[path = "promise_tests.rs"]
mod tests;
