// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Traced client wrapper for consistent observability

use crate::identity::{ClientError, IdentityClient, InFlight};
use cog_core::{
    Attributes, AuthRequest, Completion, InitiateAuthResult, SignUpRequest, SignUpResult,
    UpdateAttributesResult, User,
};
use std::time::Instant;

/// Wrapper that adds tracing to any IdentityClient
#[derive(Clone)]
pub struct TracedIdentityClient<C> {
    inner: C,
}

impl<C> TracedIdentityClient<C> {
    pub fn new(inner: C) -> Self {
        Self { inner }
    }

    pub fn inner(&self) -> &C {
        &self.inner
    }
}

impl<C: IdentityClient> TracedIdentityClient<C> {
    /// Re-point the inner client's callback at this wrapper, logging completion
    fn relay(&self, callback: Completion<Self, InFlight>) -> Completion<C, InFlight> {
        let traced = self.clone();
        let span = tracing::Span::current();
        let start = Instant::now();
        Box::new(move |_source: &C, result: InFlight| {
            let _guard = span.enter();
            tracing::debug!(
                %result,
                elapsed_ms = start.elapsed().as_millis() as u64,
                "completed"
            );
            callback(&traced, result)
        })
    }
}

impl<C: IdentityClient> IdentityClient for TracedIdentityClient<C> {
    fn get_user_async(&self, access_token: &str, callback: Completion<Self, InFlight>) {
        let span = tracing::info_span!("identity.get_user");
        let _guard = span.enter();

        tracing::info!("starting");
        self.inner.get_user_async(access_token, self.relay(callback));
    }

    fn get_user_finish(&self, result: InFlight) -> Result<User, ClientError> {
        let outcome = self.inner.get_user_finish(result);
        match &outcome {
            Ok(user) => tracing::info!(username = %user.username, "user fetched"),
            Err(e) => tracing::error!(%result, error = %e, "get_user failed"),
        }
        outcome
    }

    fn initiate_auth_async(&self, request: AuthRequest, callback: Completion<Self, InFlight>) {
        let span = tracing::info_span!(
            "identity.initiate_auth",
            flow = ?request.flow,
            client_id = %request.client_id
        );
        let _guard = span.enter();

        tracing::info!("starting");
        self.inner.initiate_auth_async(request, self.relay(callback));
    }

    fn initiate_auth_finish(&self, result: InFlight) -> Result<InitiateAuthResult, ClientError> {
        let outcome = self.inner.initiate_auth_finish(result);
        match &outcome {
            Ok(auth) => tracing::info!(
                challenge = auth.challenge_name.as_deref(),
                authenticated = auth.authentication.is_some(),
                "auth initiated"
            ),
            Err(e) => tracing::error!(%result, error = %e, "initiate_auth failed"),
        }
        outcome
    }

    fn sign_up_async(&self, request: SignUpRequest, callback: Completion<Self, InFlight>) {
        let span = tracing::info_span!(
            "identity.sign_up",
            username = %request.username,
            client_id = %request.client_id
        );
        let _guard = span.enter();

        tracing::info!(attribute_count = request.attributes.len(), "starting");
        self.inner.sign_up_async(request, self.relay(callback));
    }

    fn sign_up_finish(&self, result: InFlight) -> Result<SignUpResult, ClientError> {
        let outcome = self.inner.sign_up_finish(result);
        match &outcome {
            Ok(signed_up) => tracing::info!(
                user_sub = %signed_up.user_sub,
                confirmed = signed_up.user_confirmed,
                "account registered"
            ),
            Err(e) => tracing::error!(%result, error = %e, "sign_up failed"),
        }
        outcome
    }

    fn update_user_attributes_async(
        &self,
        access_token: &str,
        attributes: Attributes,
        callback: Completion<Self, InFlight>,
    ) {
        let span = tracing::info_span!("identity.update_user_attributes");
        let _guard = span.enter();

        tracing::info!(attribute_count = attributes.len(), "starting");
        self.inner
            .update_user_attributes_async(access_token, attributes, self.relay(callback));
    }

    fn update_user_attributes_finish(
        &self,
        result: InFlight,
    ) -> Result<UpdateAttributesResult, ClientError> {
        let outcome = self.inner.update_user_attributes_finish(result);
        match &outcome {
            Ok(updated) => tracing::info!(
                deliveries = updated.code_delivery.len(),
                "attributes updated"
            ),
            Err(e) => tracing::error!(%result, error = %e, "update_user_attributes failed"),
        }
        outcome
    }
}

#[cfg(test)]
#[path = "traced_tests.rs"]
mod tests;
