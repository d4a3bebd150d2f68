// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Library initialization and shutdown
//!
//! Call [`init_default`] once before creating clients and [`shutdown`] once
//! when done. Neither may be repeated.

use std::sync::Mutex;
use thiserror::Error;
use tracing_subscriber::EnvFilter;

/// Errors from lifecycle transitions
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LifecycleError {
    #[error("library is already initialized")]
    AlreadyInitialized,
    #[error("library is not initialized")]
    NotInitialized,
    #[error("library has been shut down")]
    ShutDown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LifecycleState {
    Uninitialized,
    Initialized,
    ShutDown,
}

/// Init/shutdown state machine
#[derive(Debug)]
pub struct Lifecycle {
    state: Mutex<LifecycleState>,
}

impl Lifecycle {
    pub const fn new() -> Self {
        Self {
            state: Mutex::new(LifecycleState::Uninitialized),
        }
    }

    pub fn state(&self) -> LifecycleState {
        *self.state.lock().unwrap_or_else(|e| e.into_inner())
    }

    pub fn init(&self) -> Result<(), LifecycleError> {
        let mut state = self.state.lock().unwrap_or_else(|e| e.into_inner());
        match *state {
            LifecycleState::Uninitialized => {
                *state = LifecycleState::Initialized;
                Ok(())
            }
            LifecycleState::Initialized => Err(LifecycleError::AlreadyInitialized),
            LifecycleState::ShutDown => Err(LifecycleError::ShutDown),
        }
    }

    pub fn is_inited(&self) -> bool {
        self.state() == LifecycleState::Initialized
    }

    pub fn shutdown(&self) -> Result<(), LifecycleError> {
        let mut state = self.state.lock().unwrap_or_else(|e| e.into_inner());
        match *state {
            LifecycleState::Initialized => {
                *state = LifecycleState::ShutDown;
                Ok(())
            }
            LifecycleState::Uninitialized => Err(LifecycleError::NotInitialized),
            LifecycleState::ShutDown => Err(LifecycleError::ShutDown),
        }
    }
}

impl Default for Lifecycle {
    fn default() -> Self {
        Self::new()
    }
}

static LIBRARY: Lifecycle = Lifecycle::new();

/// Initialize the library with default options, including default logging.
///
/// Logging goes to stderr, filtered by `RUST_LOG` (default `info`). If the
/// application already installed a subscriber, that one is kept.
pub fn init_default() -> Result<(), LifecycleError> {
    LIBRARY.init()?;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let installed = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
        .is_ok();

    tracing::info!(default_logging = installed, "initialized");
    Ok(())
}

/// Whether [`init_default`] has run and [`shutdown`] has not
pub fn is_inited() -> bool {
    LIBRARY.is_inited()
}

/// Shut down the library; no other calls are allowed afterwards
pub fn shutdown() -> Result<(), LifecycleError> {
    LIBRARY.shutdown()?;
    tracing::info!("shut down");
    Ok(())
}

#[cfg(test)]
#[path = "lifecycle_tests.rs"]
mod tests;
