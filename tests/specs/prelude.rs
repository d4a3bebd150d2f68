//! Shared helpers for specs

pub use cog_adapters::{
    Client, ClientError, FakeIdentityClient, FakeOperation, IdentityCall, IdentityClient,
    IdentityService, InFlight,
};
pub use cog_core::{
    Attributes, AuthFlow, AuthRequest, ClientConfig, Completion, Region, Registry,
    RegistryError, ServiceErrorCode, SignUpRequest, TraceCapture, TracedError, TwoPhaseOperation,
    CALLED_FROM_MARKER,
};

use std::collections::BTreeMap;
use std::time::Duration;
use tokio::sync::oneshot;

pub const USERNAME: &str = "alice";
pub const PASSWORD: &str = "hunter2!";
pub const CLIENT_ID: &str = "app_client";

/// A fake user pool with one confirmed user and a client over it
pub struct Pool {
    pub fake: FakeIdentityClient,
    pub client: Client<FakeIdentityClient>,
    pub token: String,
}

impl Pool {
    pub fn new() -> Self {
        Self::with_config(ClientConfig::new(Region::UsEast2))
    }

    pub fn with_config(config: ClientConfig) -> Self {
        let fake = FakeIdentityClient::new();
        fake.add_user(
            USERNAME,
            PASSWORD,
            attributes(&[("email", "alice@example.com"), ("name", "Alice")]),
        );
        let token = fake.issue_access_token(USERNAME).unwrap();
        let client = Client::new(fake.clone(), config).unwrap();
        Self {
            fake,
            client,
            token,
        }
    }
}

pub fn attributes(pairs: &[(&str, &str)]) -> Attributes {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

pub fn password_auth(username: &str, password: &str) -> AuthRequest {
    AuthRequest {
        flow: AuthFlow::UserPasswordAuth,
        client_id: CLIENT_ID.to_string(),
        parameters: BTreeMap::from([
            ("USERNAME".to_string(), username.to_string()),
            ("PASSWORD".to_string(), password.to_string()),
        ]),
    }
}

pub fn sign_up(username: &str) -> SignUpRequest {
    SignUpRequest {
        client_id: CLIENT_ID.to_string(),
        secret_hash: None,
        username: username.to_string(),
        password: "s3cret!".to_string(),
        attributes: attributes(&[("email", &format!("{username}@example.com"))]),
    }
}

/// Completion that hands the in-flight result back over a channel
pub fn forward() -> (
    Completion<FakeIdentityClient, InFlight>,
    oneshot::Receiver<InFlight>,
) {
    let (tx, rx) = oneshot::channel();
    let callback: Completion<FakeIdentityClient, InFlight> =
        Box::new(move |_source: &FakeIdentityClient, handle: InFlight| {
            let _ = tx.send(handle);
        });
    (callback, rx)
}

/// Failure raised by [`Delayed`], optionally carrying its own trace
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("{message}")]
pub struct Fault {
    pub message: String,
    pub trace: Option<String>,
}

impl TracedError for Fault {
    fn trace(&self) -> Option<String> {
        self.trace.clone()
    }
}

/// Object the delayed operation is started on; completes on a tokio timer
#[derive(Debug, Clone, Copy, Default)]
pub struct Timer;

/// Two-phase operation that completes after a delay with a scripted outcome
pub struct Delayed;

impl TwoPhaseOperation for Delayed {
    type Target = Timer;
    type Args = (Duration, Result<u32, Fault>);
    type Source = Timer;
    type Handle = Result<u32, Fault>;
    type Output = u32;
    type Error = Fault;

    fn start(
        &self,
        timer: &Timer,
        (delay, outcome): (Duration, Result<u32, Fault>),
        completion: Completion<Timer, Result<u32, Fault>>,
    ) {
        let timer = *timer;
        tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            completion(&timer, outcome);
        });
    }

    fn finish(&self, _timer: &Timer, handle: Result<u32, Fault>) -> Result<u32, Fault> {
        handle
    }
}

/// Registry with [`Delayed`] registered as `Timer.wait_async/wait_finish`
pub fn timer_registry(capture: TraceCapture) -> Registry {
    let mut registry = Registry::with_capture(capture);
    registry
        .register_adaptation("Timer", "wait_async", "wait_finish", Delayed)
        .unwrap();
    registry
}
