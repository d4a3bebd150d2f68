// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]
// Enable coverage(off) attribute for excluding test infrastructure
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! Identity provider clients and their promise-returning facade

pub mod client;
pub mod identity;
pub mod operations;
pub mod traced;

#[cfg(test)]
mod log_capture;

pub use client::{Client, IdentityService};
pub use identity::{ClientError, IdentityClient, InFlight};
pub use operations::{
    register_client_operations, GetUser, InitiateAuth, SignUp, UpdateUserAttributes, CLIENT,
};
pub use traced::TracedIdentityClient;

// Test support - only compiled for tests or when explicitly requested
#[cfg(any(test, feature = "test-support"))]
pub use identity::{FakeIdentityClient, FakeOperation, FakeUser, IdentityCall};
