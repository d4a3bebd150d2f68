// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Argument validation for identity requests

use regex::Regex;
use std::sync::LazyLock;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid {field}")]
pub struct ValidationError {
    pub field: &'static str,
}

// Patterns are constant and valid
#[allow(clippy::expect_used)]
static ACCESS_TOKEN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9\-_=.]+$").expect("constant regex pattern is valid"));

#[allow(clippy::expect_used)]
static CLIENT_ID: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[\w+]+$").expect("constant regex pattern is valid"));

#[allow(clippy::expect_used)]
static PASSWORD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\S+$").expect("constant regex pattern is valid"));

#[allow(clippy::expect_used)]
static SECRET_HASH: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[\w+=/]+$").expect("constant regex pattern is valid"));

#[allow(clippy::expect_used)]
static USERNAME: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[\p{L}\p{M}\p{S}\p{N}\p{P}]+$").expect("constant regex pattern is valid")
});

fn check(pattern: &Regex, field: &'static str, value: &str) -> Result<(), ValidationError> {
    if pattern.is_match(value) {
        Ok(())
    } else {
        Err(ValidationError { field })
    }
}

pub fn access_token(value: &str) -> Result<(), ValidationError> {
    check(&ACCESS_TOKEN, "access token", value)
}

pub fn client_id(value: &str) -> Result<(), ValidationError> {
    check(&CLIENT_ID, "client id", value)
}

pub fn password(value: &str) -> Result<(), ValidationError> {
    check(&PASSWORD, "password", value)
}

pub fn secret_hash(value: &str) -> Result<(), ValidationError> {
    check(&SECRET_HASH, "secret hash", value)
}

pub fn username(value: &str) -> Result<(), ValidationError> {
    check(&USERNAME, "username", value)
}

#[cfg(test)]
#[path = "validate_tests.rs"]
mod tests;
