// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Request and result types of the identity operations

use std::collections::BTreeMap;
use thiserror::Error;

/// User attributes by name (`email`, `phone_number`, custom attributes...)
pub type Attributes = BTreeMap<String, String>;

/// A user as returned by fetch-current-identity
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub username: String,
    pub attributes: Attributes,
}

/// Authentication flows accepted by begin-authentication
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AuthFlow {
    UserSrpAuth,
    RefreshTokenAuth,
    CustomAuth,
    UserPasswordAuth,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthRequest {
    pub flow: AuthFlow,
    pub client_id: String,
    /// Flow parameters, e.g. `USERNAME` and `PASSWORD`
    pub parameters: BTreeMap<String, String>,
}

/// Tokens issued on successful authentication
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticationResult {
    pub access_token: String,
    pub id_token: String,
    pub refresh_token: Option<String>,
    pub expires_in: u32,
    pub token_type: String,
}

/// Outcome of begin-authentication: tokens, or a challenge to answer
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct InitiateAuthResult {
    pub challenge_name: Option<String>,
    pub session: Option<String>,
    pub authentication: Option<AuthenticationResult>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignUpRequest {
    pub client_id: String,
    pub secret_hash: Option<String>,
    pub username: String,
    pub password: String,
    pub attributes: Attributes,
}

/// Delivery medium for verification codes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DeliveryMedium {
    #[default]
    NotSet,
    Sms,
    Email,
}

/// Where a verification code was sent
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodeDeliveryDetails {
    pub destination: String,
    pub medium: DeliveryMedium,
    pub attribute_name: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignUpResult {
    pub user_confirmed: bool,
    pub code_delivery: Option<CodeDeliveryDetails>,
    pub user_sub: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct UpdateAttributesResult {
    pub code_delivery: Vec<CodeDeliveryDetails>,
}

/// Error codes reported by the identity provider service
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Error)]
pub enum ServiceErrorCode {
    #[error("request signature does not conform to AWS standards")]
    IncompleteSignature,
    #[error("request processing failed because of an unknown error")]
    InternalFailure,
    #[error("requested action is invalid")]
    InvalidAction,
    #[error("access key ID or certificate does not exist")]
    InvalidClientTokenId,
    #[error("parameters that must not be used together were used together")]
    InvalidParameterCombination,
    #[error("query string is malformed")]
    InvalidQueryParameter,
    #[error("invalid or out-of-range parameter value")]
    InvalidParameterValue,
    #[error("request is missing an action or a required parameter")]
    MissingAction,
    #[error("request must contain a valid access key ID or certificate")]
    MissingAuthenticationToken,
    #[error("required parameter is missing")]
    MissingParameter,
    #[error("access key ID needs a subscription for the service")]
    OptInRequired,
    #[error("request expired")]
    RequestExpired,
    #[error("service unavailable")]
    ServiceUnavailable,
    #[error("request was throttled")]
    Throttling,
    #[error("input fails to satisfy constraints")]
    Validation,
    #[error("access denied")]
    AccessDenied,
    #[error("requested resource not found")]
    ResourceNotFound,
    #[error("unrecognized client")]
    UnrecognizedClient,
    #[error("query string contains a syntax error")]
    MalformedQueryString,
    #[error("slow down")]
    SlowDown,
    #[error("request time too skewed")]
    RequestTimeTooSkewed,
    #[error("invalid signature")]
    InvalidSignature,
    #[error("signature does not match")]
    SignatureDoesNotMatch,
    #[error("invalid access key ID")]
    InvalidAccessKeyId,
    #[error("network connection failed")]
    NetworkConnection,
    #[error("unknown error")]
    Unknown,
    #[error("account with this email or phone number already exists")]
    AliasExists,
    #[error("verification code failed to deliver")]
    CodeDeliveryFailure,
    #[error("verification code does not match")]
    CodeMismatch,
    #[error("concurrent modification")]
    ConcurrentModification,
    #[error("duplicate provider")]
    DuplicateProvider,
    #[error("software token MFA must be enabled")]
    EnableSoftwareTokenMfa,
    #[error("verification code expired")]
    ExpiredCode,
    #[error("group already exists")]
    GroupExists,
    #[error("internal error")]
    InternalError,
    #[error("not allowed to use the email identity")]
    InvalidEmailRoleAccessPolicy,
    #[error("invalid lambda response")]
    InvalidLambdaResponse,
    #[error("invalid OAuth flow")]
    InvalidOAuthFlow,
    #[error("invalid parameter")]
    InvalidParameter,
    #[error("invalid password")]
    InvalidPassword,
    #[error("SMS role may not publish")]
    InvalidSmsRoleAccessPolicy,
    #[error("SMS role trust relationship is invalid")]
    InvalidSmsRoleTrustRelationship,
    #[error("user pool configuration is invalid")]
    InvalidUserPoolConfiguration,
    #[error("limit exceeded")]
    LimitExceeded,
    #[error("MFA method not found")]
    MfaMethodNotFound,
    #[error("not authorized")]
    NotAuthorized,
    #[error("password reset required")]
    PasswordResetRequired,
    #[error("precondition not met")]
    PreconditionNotMet,
    #[error("scope does not exist")]
    ScopeDoesNotExist,
    #[error("software token MFA not found")]
    SoftwareTokenMfaNotFound,
    #[error("too many failed attempts")]
    TooManyFailedAttempts,
    #[error("too many requests")]
    TooManyRequests,
    #[error("unexpected lambda exception")]
    UnexpectedLambda,
    #[error("unsupported identity provider")]
    UnsupportedIdentityProvider,
    #[error("unsupported user state")]
    UnsupportedUserState,
    #[error("username already exists")]
    UsernameExists,
    #[error("user import in progress")]
    UserImportInProgress,
    #[error("user validation failed in lambda")]
    UserLambdaValidation,
    #[error("user is not confirmed")]
    UserNotConfirmed,
    #[error("user not found")]
    UserNotFound,
    #[error("user pool add-on not enabled")]
    UserPoolAddOnNotEnabled,
    #[error("user pool tagging failed")]
    UserPoolTagging,
}
