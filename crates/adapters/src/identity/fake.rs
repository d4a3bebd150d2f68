// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Fake identity client for testing
//!
//! Keeps an in-memory user pool. Every `*_async` call computes its outcome
//! immediately and invokes the callback on a later tokio turn, so a tokio
//! runtime must be running.
#![cfg_attr(coverage_nightly, coverage(off))]

use super::{ClientError, IdentityClient, InFlight};
use cog_core::{
    validate, Attributes, AuthFlow, AuthRequest, AuthenticationResult, CodeDeliveryDetails,
    Completion, DeliveryMedium, InitiateAuthResult, ServiceErrorCode, SignUpRequest,
    SignUpResult, UpdateAttributesResult, User,
};
use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};

/// Recorded identity call
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IdentityCall {
    GetUser {
        access_token: String,
    },
    InitiateAuth {
        request: AuthRequest,
    },
    SignUp {
        request: SignUpRequest,
    },
    UpdateUserAttributes {
        access_token: String,
        attributes: Attributes,
    },
}

/// Operations a failure can be injected into
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FakeOperation {
    GetUser,
    InitiateAuth,
    SignUp,
    UpdateUserAttributes,
}

/// Fake user pool entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FakeUser {
    pub username: String,
    pub password: String,
    pub attributes: Attributes,
    pub confirmed: bool,
    pub sub: String,
}

enum Pending {
    User(Result<User, ClientError>),
    Auth(Result<InitiateAuthResult, ClientError>),
    SignUp(Result<SignUpResult, ClientError>),
    Update(Result<UpdateAttributesResult, ClientError>),
}

#[derive(Default)]
struct FakeState {
    users: HashMap<String, FakeUser>,
    /// access token -> username
    access_tokens: HashMap<String, String>,
    /// refresh token -> username
    refresh_tokens: HashMap<String, String>,
    pending: HashMap<u64, Pending>,
    failures: HashMap<FakeOperation, VecDeque<ClientError>>,
    next_result: u64,
}

/// Fake identity client for testing
#[derive(Clone, Default)]
pub struct FakeIdentityClient {
    state: Arc<Mutex<FakeState>>,
    calls: Arc<Mutex<Vec<IdentityCall>>>,
}

impl FakeIdentityClient {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get all recorded calls
    pub fn calls(&self) -> Vec<IdentityCall> {
        self.calls.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }

    /// Add a confirmed user to the pool
    pub fn add_user(&self, username: &str, password: &str, attributes: Attributes) {
        let user = FakeUser {
            username: username.to_string(),
            password: password.to_string(),
            attributes,
            confirmed: true,
            sub: uuid::Uuid::new_v4().to_string(),
        };
        self.lock().users.insert(username.to_string(), user);
    }

    /// Get a user by username
    pub fn get_user(&self, username: &str) -> Option<FakeUser> {
        self.lock().users.get(username).cloned()
    }

    /// Mark a signed-up user as confirmed
    pub fn confirm(&self, username: &str) {
        if let Some(user) = self.lock().users.get_mut(username) {
            user.confirmed = true;
        }
    }

    /// Issue an access token for an existing user without authenticating
    pub fn issue_access_token(&self, username: &str) -> Option<String> {
        let mut state = self.lock();
        if !state.users.contains_key(username) {
            return None;
        }
        let token = uuid::Uuid::new_v4().to_string();
        state
            .access_tokens
            .insert(token.clone(), username.to_string());
        Some(token)
    }

    /// Make the next call of `operation` fail with `error`
    pub fn fail_next(&self, operation: FakeOperation, error: ClientError) {
        self.lock()
            .failures
            .entry(operation)
            .or_default()
            .push_back(error);
    }

    /// Number of started operations whose result was not yet finished
    pub fn unfinished(&self) -> usize {
        self.lock().pending.len()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, FakeState> {
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn record(&self, call: IdentityCall) {
        self.calls
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(call);
    }

    fn injected_failure(&self, operation: FakeOperation) -> Option<ClientError> {
        self.lock()
            .failures
            .get_mut(&operation)
            .and_then(VecDeque::pop_front)
    }

    /// Store the outcome and invoke the callback on a later turn
    fn complete(&self, outcome: Pending, callback: Completion<Self, InFlight>) {
        let handle = {
            let mut state = self.lock();
            state.next_result += 1;
            let id = state.next_result;
            state.pending.insert(id, outcome);
            InFlight::new(id)
        };

        let source = self.clone();
        tokio::spawn(async move {
            tokio::task::yield_now().await;
            callback(&source, handle);
        });
    }

    fn take(&self, result: InFlight) -> Option<Pending> {
        self.lock().pending.remove(&result.id())
    }
}

impl IdentityClient for FakeIdentityClient {
    fn get_user_async(&self, access_token: &str, callback: Completion<Self, InFlight>) {
        self.record(IdentityCall::GetUser {
            access_token: access_token.to_string(),
        });

        let outcome = match self.injected_failure(FakeOperation::GetUser) {
            Some(error) => Err(error),
            None => self.lock().get_user(access_token),
        };
        self.complete(Pending::User(outcome), callback);
    }

    fn get_user_finish(&self, result: InFlight) -> Result<User, ClientError> {
        match self.take(result) {
            Some(Pending::User(outcome)) => outcome,
            _ => Err(ClientError::unknown_result(result)),
        }
    }

    fn initiate_auth_async(&self, request: AuthRequest, callback: Completion<Self, InFlight>) {
        self.record(IdentityCall::InitiateAuth {
            request: request.clone(),
        });

        let outcome = match self.injected_failure(FakeOperation::InitiateAuth) {
            Some(error) => Err(error),
            None => self.lock().initiate_auth(&request),
        };
        self.complete(Pending::Auth(outcome), callback);
    }

    fn initiate_auth_finish(&self, result: InFlight) -> Result<InitiateAuthResult, ClientError> {
        match self.take(result) {
            Some(Pending::Auth(outcome)) => outcome,
            _ => Err(ClientError::unknown_result(result)),
        }
    }

    fn sign_up_async(&self, request: SignUpRequest, callback: Completion<Self, InFlight>) {
        self.record(IdentityCall::SignUp {
            request: request.clone(),
        });

        let outcome = match self.injected_failure(FakeOperation::SignUp) {
            Some(error) => Err(error),
            None => self.lock().sign_up(&request),
        };
        self.complete(Pending::SignUp(outcome), callback);
    }

    fn sign_up_finish(&self, result: InFlight) -> Result<SignUpResult, ClientError> {
        match self.take(result) {
            Some(Pending::SignUp(outcome)) => outcome,
            _ => Err(ClientError::unknown_result(result)),
        }
    }

    fn update_user_attributes_async(
        &self,
        access_token: &str,
        attributes: Attributes,
        callback: Completion<Self, InFlight>,
    ) {
        self.record(IdentityCall::UpdateUserAttributes {
            access_token: access_token.to_string(),
            attributes: attributes.clone(),
        });

        let outcome = match self.injected_failure(FakeOperation::UpdateUserAttributes) {
            Some(error) => Err(error),
            None => self.lock().update_user_attributes(access_token, attributes),
        };
        self.complete(Pending::Update(outcome), callback);
    }

    fn update_user_attributes_finish(
        &self,
        result: InFlight,
    ) -> Result<UpdateAttributesResult, ClientError> {
        match self.take(result) {
            Some(Pending::Update(outcome)) => outcome,
            _ => Err(ClientError::unknown_result(result)),
        }
    }
}

impl FakeState {
    fn username_for(&self, access_token: &str) -> Result<String, ClientError> {
        validate::access_token(access_token)?;
        self.access_tokens
            .get(access_token)
            .cloned()
            .ok_or_else(|| {
                ClientError::service(ServiceErrorCode::NotAuthorized, "Invalid Access Token")
            })
    }

    fn get_user(&self, access_token: &str) -> Result<User, ClientError> {
        let username = self.username_for(access_token)?;
        let user = self.users.get(&username).ok_or_else(user_not_found)?;
        Ok(User {
            username: user.username.clone(),
            attributes: user.attributes.clone(),
        })
    }

    fn initiate_auth(&mut self, request: &AuthRequest) -> Result<InitiateAuthResult, ClientError> {
        validate::client_id(&request.client_id)?;

        let username = match request.flow {
            AuthFlow::UserPasswordAuth => {
                let username = parameter(request, "USERNAME")?;
                let password = parameter(request, "PASSWORD")?;
                validate::username(username)?;
                validate::password(password)?;

                let user = self.users.get(username).ok_or_else(user_not_found)?;
                if user.password != password {
                    return Err(ClientError::service(
                        ServiceErrorCode::NotAuthorized,
                        "Incorrect username or password.",
                    ));
                }
                if !user.confirmed {
                    return Err(ClientError::service(
                        ServiceErrorCode::UserNotConfirmed,
                        "User is not confirmed.",
                    ));
                }
                username.to_string()
            }
            AuthFlow::RefreshTokenAuth => {
                let token = parameter(request, "REFRESH_TOKEN")?;
                let username = self.refresh_tokens.get(token).cloned().ok_or_else(|| {
                    ClientError::service(
                        ServiceErrorCode::NotAuthorized,
                        "Invalid Refresh Token",
                    )
                })?;
                let access_token = self.issue(&username);
                return Ok(InitiateAuthResult {
                    authentication: Some(AuthenticationResult {
                        refresh_token: None,
                        ..access_token
                    }),
                    ..InitiateAuthResult::default()
                });
            }
            AuthFlow::UserSrpAuth | AuthFlow::CustomAuth => {
                return Err(ClientError::service(
                    ServiceErrorCode::InvalidParameter,
                    format!("{:?} flow is not enabled for this client.", request.flow),
                ));
            }
        };

        let mut tokens = self.issue(&username);
        let refresh = uuid::Uuid::new_v4().to_string();
        self.refresh_tokens.insert(refresh.clone(), username);
        tokens.refresh_token = Some(refresh);
        Ok(InitiateAuthResult {
            authentication: Some(tokens),
            ..InitiateAuthResult::default()
        })
    }

    fn issue(&mut self, username: &str) -> AuthenticationResult {
        let access_token = uuid::Uuid::new_v4().to_string();
        self.access_tokens
            .insert(access_token.clone(), username.to_string());
        AuthenticationResult {
            access_token,
            id_token: uuid::Uuid::new_v4().to_string(),
            refresh_token: None,
            expires_in: 3600,
            token_type: "Bearer".to_string(),
        }
    }

    fn sign_up(&mut self, request: &SignUpRequest) -> Result<SignUpResult, ClientError> {
        validate::client_id(&request.client_id)?;
        validate::username(&request.username)?;
        validate::password(&request.password)?;
        if let Some(hash) = &request.secret_hash {
            validate::secret_hash(hash)?;
        }

        if self.users.contains_key(&request.username) {
            return Err(ClientError::service(
                ServiceErrorCode::UsernameExists,
                "User already exists",
            ));
        }

        let sub = uuid::Uuid::new_v4().to_string();
        let code_delivery = code_delivery_for(&request.attributes).into_iter().next();
        self.users.insert(
            request.username.clone(),
            FakeUser {
                username: request.username.clone(),
                password: request.password.clone(),
                attributes: request.attributes.clone(),
                confirmed: false,
                sub: sub.clone(),
            },
        );

        Ok(SignUpResult {
            user_confirmed: false,
            code_delivery,
            user_sub: sub,
        })
    }

    fn update_user_attributes(
        &mut self,
        access_token: &str,
        attributes: Attributes,
    ) -> Result<UpdateAttributesResult, ClientError> {
        let username = self.username_for(access_token)?;
        let user = self.users.get_mut(&username).ok_or_else(user_not_found)?;

        let code_delivery = code_delivery_for(&attributes);
        for details in &code_delivery {
            let verified = format!("{}_verified", details.attribute_name);
            user.attributes.insert(verified, "false".to_string());
        }
        user.attributes.extend(attributes);

        Ok(UpdateAttributesResult { code_delivery })
    }
}

fn parameter<'a>(request: &'a AuthRequest, name: &str) -> Result<&'a str, ClientError> {
    request
        .parameters
        .get(name)
        .map(String::as_str)
        .ok_or_else(|| {
            ClientError::service(
                ServiceErrorCode::InvalidParameter,
                format!("Missing required parameter {}", name),
            )
        })
}

fn user_not_found() -> ClientError {
    ClientError::service(ServiceErrorCode::UserNotFound, "User does not exist.")
}

/// Verification codes the service would send for changed contact attributes
fn code_delivery_for(attributes: &Attributes) -> Vec<CodeDeliveryDetails> {
    let mut deliveries = Vec::new();
    if let Some(email) = attributes.get("email") {
        deliveries.push(CodeDeliveryDetails {
            destination: mask_email(email),
            medium: DeliveryMedium::Email,
            attribute_name: "email".to_string(),
        });
    }
    if let Some(phone) = attributes.get("phone_number") {
        deliveries.push(CodeDeliveryDetails {
            destination: mask_phone(phone),
            medium: DeliveryMedium::Sms,
            attribute_name: "phone_number".to_string(),
        });
    }
    deliveries
}

fn mask_email(email: &str) -> String {
    match email.split_once('@') {
        Some((local, domain)) => {
            let first = local.chars().next().unwrap_or('*');
            format!("{}***@{}", first, domain)
        }
        None => "***".to_string(),
    }
}

fn mask_phone(phone: &str) -> String {
    let digits: Vec<char> = phone.chars().collect();
    let tail: String = digits[digits.len().saturating_sub(4)..].iter().collect();
    format!("+*******{}", tail)
}

#[cfg(test)]
#[path = "fake_tests.rs"]
mod tests;
