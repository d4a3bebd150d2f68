// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Bindings of the identity client's start/finish pairs

use crate::client::CLIENT_FRAMES;
use crate::identity::{ClientError, IdentityClient, InFlight};
use cog_core::{
    Attributes, AuthRequest, Completion, InitiateAuthResult, Registry, RegistryError,
    SignUpRequest, SignUpResult, TwoPhaseOperation, UpdateAttributesResult, User,
};
use std::marker::PhantomData;

/// Owner name the client's operation pairs are registered under
pub const CLIENT: &str = "cog::Client";

pub const GET_USER_ASYNC: &str = "get_user_async";
pub const GET_USER_FINISH: &str = "get_user_finish";
pub const INITIATE_AUTH_ASYNC: &str = "initiate_auth_async";
pub const INITIATE_AUTH_FINISH: &str = "initiate_auth_finish";
pub const SIGN_UP_ASYNC: &str = "sign_up_async";
pub const SIGN_UP_FINISH: &str = "sign_up_finish";
pub const UPDATE_USER_ATTRIBUTES_ASYNC: &str = "update_user_attributes_async";
pub const UPDATE_USER_ATTRIBUTES_FINISH: &str = "update_user_attributes_finish";

macro_rules! binding {
    ($(#[$doc:meta])* $name:ident) => {
        $(#[$doc])*
        pub struct $name<C>(PhantomData<fn() -> C>);

        impl<C> $name<C> {
            pub fn new() -> Self {
                Self(PhantomData)
            }
        }

        impl<C> Default for $name<C> {
            fn default() -> Self {
                Self::new()
            }
        }
    };
}

binding!(
    /// Fetch-current-identity: `get_user_async` / `get_user_finish`
    GetUser
);
binding!(
    /// Begin-authentication: `initiate_auth_async` / `initiate_auth_finish`
    InitiateAuth
);
binding!(
    /// Register-new-account: `sign_up_async` / `sign_up_finish`
    SignUp
);
binding!(
    /// Update-profile-attributes: `update_user_attributes_async` /
    /// `update_user_attributes_finish`
    UpdateUserAttributes
);

impl<C: IdentityClient> TwoPhaseOperation for GetUser<C> {
    type Target = C;
    type Args = String;
    type Source = C;
    type Handle = InFlight;
    type Output = User;
    type Error = ClientError;

    const HIDDEN_FRAMES: &'static [&'static str] = CLIENT_FRAMES;

    fn start(&self, client: &C, access_token: String, completion: Completion<C, InFlight>) {
        client.get_user_async(&access_token, completion)
    }

    fn finish(&self, client: &C, result: InFlight) -> Result<User, ClientError> {
        client.get_user_finish(result)
    }
}

impl<C: IdentityClient> TwoPhaseOperation for InitiateAuth<C> {
    type Target = C;
    type Args = AuthRequest;
    type Source = C;
    type Handle = InFlight;
    type Output = InitiateAuthResult;
    type Error = ClientError;

    const HIDDEN_FRAMES: &'static [&'static str] = CLIENT_FRAMES;

    fn start(&self, client: &C, request: AuthRequest, completion: Completion<C, InFlight>) {
        client.initiate_auth_async(request, completion)
    }

    fn finish(&self, client: &C, result: InFlight) -> Result<InitiateAuthResult, ClientError> {
        client.initiate_auth_finish(result)
    }
}

impl<C: IdentityClient> TwoPhaseOperation for SignUp<C> {
    type Target = C;
    type Args = SignUpRequest;
    type Source = C;
    type Handle = InFlight;
    type Output = SignUpResult;
    type Error = ClientError;

    const HIDDEN_FRAMES: &'static [&'static str] = CLIENT_FRAMES;

    fn start(&self, client: &C, request: SignUpRequest, completion: Completion<C, InFlight>) {
        client.sign_up_async(request, completion)
    }

    fn finish(&self, client: &C, result: InFlight) -> Result<SignUpResult, ClientError> {
        client.sign_up_finish(result)
    }
}

impl<C: IdentityClient> TwoPhaseOperation for UpdateUserAttributes<C> {
    type Target = C;
    type Args = (String, Attributes);
    type Source = C;
    type Handle = InFlight;
    type Output = UpdateAttributesResult;
    type Error = ClientError;

    const HIDDEN_FRAMES: &'static [&'static str] = CLIENT_FRAMES;

    fn start(
        &self,
        client: &C,
        (access_token, attributes): (String, Attributes),
        completion: Completion<C, InFlight>,
    ) {
        client.update_user_attributes_async(&access_token, attributes, completion)
    }

    fn finish(&self, client: &C, result: InFlight) -> Result<UpdateAttributesResult, ClientError> {
        client.update_user_attributes_finish(result)
    }
}

/// Register the client's four operation pairs
pub fn register_client_operations<C: IdentityClient>(
    registry: &mut Registry,
) -> Result<(), RegistryError> {
    registry.register_adaptation(CLIENT, GET_USER_ASYNC, GET_USER_FINISH, GetUser::<C>::new())?;
    registry.register_adaptation(
        CLIENT,
        INITIATE_AUTH_ASYNC,
        INITIATE_AUTH_FINISH,
        InitiateAuth::<C>::new(),
    )?;
    registry.register_adaptation(CLIENT, SIGN_UP_ASYNC, SIGN_UP_FINISH, SignUp::<C>::new())?;
    registry.register_adaptation(
        CLIENT,
        UPDATE_USER_ATTRIBUTES_ASYNC,
        UPDATE_USER_ATTRIBUTES_FINISH,
        UpdateUserAttributes::<C>::new(),
    )?;
    Ok(())
}
