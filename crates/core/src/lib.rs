// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! cog-core: promise adaptation for two-phase asynchronous operations
//!
//! This crate provides:
//! - The adapter turning start/finish operation pairs into promises
//! - Call-site capture and trace stitching across the completion gap
//! - A registry of adapted operation pairs
//! - Library lifecycle, client configuration, and identity request types

pub mod adapter;
pub mod config;
pub mod lifecycle;
pub mod promise;
pub mod registry;
pub mod rejection;
pub mod trace;
pub mod types;
pub mod validate;

pub use adapter::{Adapted, Completion, TwoPhaseOperation};
pub use config::{ClientConfig, ConfigError, Region};
pub use lifecycle::{init_default, is_inited, shutdown, Lifecycle, LifecycleError, LifecycleState};
pub use promise::Promise;
pub use registry::{OperationPair, Registry, RegistryError};
pub use rejection::{Rejection, Settlement, StitchedTrace, TracedError, CALLED_FROM_MARKER};
pub use trace::{CallSite, FailureSite, TraceCapture};
pub use types::{
    Attributes, AuthFlow, AuthRequest, AuthenticationResult, CodeDeliveryDetails, DeliveryMedium,
    InitiateAuthResult, ServiceErrorCode, SignUpRequest, SignUpResult, UpdateAttributesResult,
    User,
};
pub use validate::ValidationError;
