// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Promise-returning client over any [`IdentityClient`]

use crate::identity::{ClientError, IdentityClient, InFlight};
use crate::operations::{
    register_client_operations, GetUser, InitiateAuth, SignUp, UpdateUserAttributes, CLIENT,
    GET_USER_ASYNC, INITIATE_AUTH_ASYNC, SIGN_UP_ASYNC, UPDATE_USER_ATTRIBUTES_ASYNC,
};
use async_trait::async_trait;
use cog_core::{
    Adapted, Attributes, AuthRequest, ClientConfig, Completion, InitiateAuthResult, Promise,
    Region, Registry, RegistryError, Settlement, SignUpRequest, SignUpResult,
    UpdateAttributesResult, User,
};
use std::sync::Arc;

/// Frames of the promise-returning methods below, which stand in for the
/// wrapped operations in captured call sites
pub(crate) const CLIENT_FRAMES: &[&str] = &[module_path!()];

/// Identity client offering both calling conventions.
///
/// Each verb has a promise-returning method (`get_user`) and a
/// callback-taking method (`get_user_async`) that behaves exactly like the
/// underlying client's.
pub struct Client<C> {
    inner: C,
    config: ClientConfig,
    get_user: Arc<Adapted<GetUser<C>>>,
    initiate_auth: Arc<Adapted<InitiateAuth<C>>>,
    sign_up: Arc<Adapted<SignUp<C>>>,
    update_user_attributes: Arc<Adapted<UpdateUserAttributes<C>>>,
}

impl<C: IdentityClient> Client<C> {
    /// Wrap `inner`, adapting its operations with the configured trace capture
    pub fn new(inner: C, config: ClientConfig) -> Result<Self, RegistryError> {
        let mut registry = Registry::with_capture(config.trace);
        register_client_operations::<C>(&mut registry)?;
        Self::from_registry(inner, config, &registry)
    }

    /// Wrap `inner` using adaptations already registered in `registry`
    pub fn from_registry(
        inner: C,
        config: ClientConfig,
        registry: &Registry,
    ) -> Result<Self, RegistryError> {
        let client = Self {
            get_user: registry.adapted(CLIENT, GET_USER_ASYNC)?,
            initiate_auth: registry.adapted(CLIENT, INITIATE_AUTH_ASYNC)?,
            sign_up: registry.adapted(CLIENT, SIGN_UP_ASYNC)?,
            update_user_attributes: registry.adapted(CLIENT, UPDATE_USER_ATTRIBUTES_ASYNC)?,
            inner,
            config,
        };
        tracing::debug!(region = %client.config.region, "client created");
        Ok(client)
    }

    pub fn inner(&self) -> &C {
        &self.inner
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn region(&self) -> Region {
        self.config.region
    }

    #[track_caller]
    pub fn get_user(&self, access_token: &str) -> Promise<User, ClientError> {
        self.get_user.start(&self.inner, access_token.to_string())
    }

    pub fn get_user_async(&self, access_token: &str, callback: Completion<C, InFlight>) {
        self.get_user
            .start_with_callback(&self.inner, access_token.to_string(), callback)
    }

    pub fn get_user_finish(&self, result: InFlight) -> Result<User, ClientError> {
        self.inner.get_user_finish(result)
    }

    #[track_caller]
    pub fn initiate_auth(&self, request: AuthRequest) -> Promise<InitiateAuthResult, ClientError> {
        self.initiate_auth.start(&self.inner, request)
    }

    pub fn initiate_auth_async(&self, request: AuthRequest, callback: Completion<C, InFlight>) {
        self.initiate_auth
            .start_with_callback(&self.inner, request, callback)
    }

    pub fn initiate_auth_finish(&self, result: InFlight) -> Result<InitiateAuthResult, ClientError> {
        self.inner.initiate_auth_finish(result)
    }

    #[track_caller]
    pub fn sign_up(&self, request: SignUpRequest) -> Promise<SignUpResult, ClientError> {
        self.sign_up.start(&self.inner, request)
    }

    pub fn sign_up_async(&self, request: SignUpRequest, callback: Completion<C, InFlight>) {
        self.sign_up.start_with_callback(&self.inner, request, callback)
    }

    pub fn sign_up_finish(&self, result: InFlight) -> Result<SignUpResult, ClientError> {
        self.inner.sign_up_finish(result)
    }

    #[track_caller]
    pub fn update_user_attributes(
        &self,
        access_token: &str,
        attributes: Attributes,
    ) -> Promise<UpdateAttributesResult, ClientError> {
        self.update_user_attributes
            .start(&self.inner, (access_token.to_string(), attributes))
    }

    pub fn update_user_attributes_async(
        &self,
        access_token: &str,
        attributes: Attributes,
        callback: Completion<C, InFlight>,
    ) {
        self.update_user_attributes.start_with_callback(
            &self.inner,
            (access_token.to_string(), attributes),
            callback,
        )
    }

    pub fn update_user_attributes_finish(
        &self,
        result: InFlight,
    ) -> Result<UpdateAttributesResult, ClientError> {
        self.inner.update_user_attributes_finish(result)
    }
}

impl<C: Clone> Clone for Client<C> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
            config: self.config,
            get_user: Arc::clone(&self.get_user),
            initiate_auth: Arc::clone(&self.initiate_auth),
            sign_up: Arc::clone(&self.sign_up),
            update_user_attributes: Arc::clone(&self.update_user_attributes),
        }
    }
}

/// Future-returning identity operations, for callers that want a trait object
///
/// Call sites recorded through this trait point into the implementation;
/// use the inherent [`Client`] methods to record the caller's own location.
#[async_trait]
pub trait IdentityService: Send + Sync {
    async fn fetch_user(&self, access_token: &str) -> Settlement<User, ClientError>;

    async fn authenticate(&self, request: AuthRequest)
        -> Settlement<InitiateAuthResult, ClientError>;

    async fn register(&self, request: SignUpRequest) -> Settlement<SignUpResult, ClientError>;

    async fn update_attributes(
        &self,
        access_token: &str,
        attributes: Attributes,
    ) -> Settlement<UpdateAttributesResult, ClientError>;
}

#[async_trait]
impl<C: IdentityClient> IdentityService for Client<C> {
    async fn fetch_user(&self, access_token: &str) -> Settlement<User, ClientError> {
        self.get_user(access_token).await
    }

    async fn authenticate(
        &self,
        request: AuthRequest,
    ) -> Settlement<InitiateAuthResult, ClientError> {
        self.initiate_auth(request).await
    }

    async fn register(&self, request: SignUpRequest) -> Settlement<SignUpResult, ClientError> {
        self.sign_up(request).await
    }

    async fn update_attributes(
        &self,
        access_token: &str,
        attributes: Attributes,
    ) -> Settlement<UpdateAttributesResult, ClientError> {
        self.update_user_attributes(access_token, attributes).await
    }
}

#[cfg(test)]
#[path = "client_tests.rs"]
mod tests;
