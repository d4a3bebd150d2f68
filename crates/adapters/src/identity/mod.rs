// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Identity provider clients (two-phase callback convention)

// Test support - only compiled for tests or when explicitly requested
#[cfg(any(test, feature = "test-support"))]
mod fake;
#[cfg(any(test, feature = "test-support"))]
pub use fake::{FakeIdentityClient, FakeOperation, FakeUser, IdentityCall};

use cog_core::{
    Attributes, AuthRequest, Completion, FailureSite, InitiateAuthResult, ServiceErrorCode,
    SignUpRequest, SignUpResult, TracedError, UpdateAttributesResult, User, ValidationError,
};
use std::fmt;
use thiserror::Error;

/// Handle to the outcome of a started operation, redeemed with `*_finish`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct InFlight(u64);

impl InFlight {
    pub fn new(id: u64) -> Self {
        Self(id)
    }

    pub fn id(self) -> u64 {
        self.0
    }
}

impl fmt::Display for InFlight {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Errors from identity operations
///
/// Every error records the site it was raised at, which serves as its trace
/// unless a service trace was attached.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ClientError {
    #[error("{message}")]
    Service {
        code: ServiceErrorCode,
        message: String,
        /// Trace recorded where the service failure was raised
        trace: Option<String>,
        raised_at: FailureSite,
    },
    #[error("{source}")]
    Invalid {
        source: ValidationError,
        raised_at: FailureSite,
    },
    #[error("unknown in-flight result: {result}")]
    UnknownResult {
        result: InFlight,
        raised_at: FailureSite,
    },
}

impl ClientError {
    #[track_caller]
    pub fn service(code: ServiceErrorCode, message: impl Into<String>) -> Self {
        Self::Service {
            code,
            message: message.into(),
            trace: None,
            raised_at: FailureSite::here(),
        }
    }

    #[track_caller]
    pub fn unknown_result(result: InFlight) -> Self {
        Self::UnknownResult {
            result,
            raised_at: FailureSite::here(),
        }
    }

    /// Attach a failure-site trace to a service error; other kinds are unchanged
    pub fn with_trace(mut self, trace: impl Into<String>) -> Self {
        if let Self::Service { trace: slot, .. } = &mut self {
            *slot = Some(trace.into());
        }
        self
    }

    pub fn code(&self) -> Option<ServiceErrorCode> {
        match self {
            Self::Service { code, .. } => Some(*code),
            _ => None,
        }
    }

    pub fn raised_at(&self) -> FailureSite {
        match self {
            Self::Service { raised_at, .. }
            | Self::Invalid { raised_at, .. }
            | Self::UnknownResult { raised_at, .. } => *raised_at,
        }
    }
}

impl From<ValidationError> for ClientError {
    #[track_caller]
    fn from(source: ValidationError) -> Self {
        Self::Invalid {
            source,
            raised_at: FailureSite::here(),
        }
    }
}

impl TracedError for ClientError {
    fn trace(&self) -> Option<String> {
        match self {
            Self::Service {
                trace: Some(trace), ..
            } => Some(trace.clone()),
            _ => Some(self.raised_at().to_string()),
        }
    }
}

/// Identity provider client using the two-phase convention: each
/// `*_async` call invokes its callback once, later, with the client and an
/// [`InFlight`] handle to pass to the matching `*_finish`.
pub trait IdentityClient: Clone + Send + Sync + 'static {
    /// Fetch the user owning an access token
    fn get_user_async(&self, access_token: &str, callback: Completion<Self, InFlight>);
    fn get_user_finish(&self, result: InFlight) -> Result<User, ClientError>;

    /// Begin an authentication flow
    fn initiate_auth_async(&self, request: AuthRequest, callback: Completion<Self, InFlight>);
    fn initiate_auth_finish(&self, result: InFlight) -> Result<InitiateAuthResult, ClientError>;

    /// Register a new account
    fn sign_up_async(&self, request: SignUpRequest, callback: Completion<Self, InFlight>);
    fn sign_up_finish(&self, result: InFlight) -> Result<SignUpResult, ClientError>;

    /// Update attributes of the user owning an access token
    fn update_user_attributes_async(
        &self,
        access_token: &str,
        attributes: Attributes,
        callback: Completion<Self, InFlight>,
    );
    fn update_user_attributes_finish(
        &self,
        result: InFlight,
    ) -> Result<UpdateAttributesResult, ClientError>;
}
