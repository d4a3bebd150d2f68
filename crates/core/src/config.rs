// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Client configuration
//!
//! ```toml
//! region = "us-east-2"
//! trace = "force"
//! ```

use crate::trace::TraceCapture;
use serde::Deserialize;
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use thiserror::Error;

/// Errors from loading configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("invalid config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("unknown region: {0}")]
    UnknownRegion(String),
}

macro_rules! regions {
    ($($variant:ident => $code:literal,)+) => {
        /// Service region the client talks to
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize)]
        #[serde(try_from = "String")]
        pub enum Region {
            #[default]
            $($variant,)+
        }

        impl Region {
            pub const ALL: &'static [Region] = &[$(Region::$variant,)+];

            /// Region code, e.g. `us-east-2`
            pub fn code(self) -> &'static str {
                match self {
                    $(Region::$variant => $code,)+
                }
            }
        }

        impl FromStr for Region {
            type Err = ConfigError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($code => Ok(Region::$variant),)+
                    other => Err(ConfigError::UnknownRegion(other.to_string())),
                }
            }
        }
    };
}

regions! {
    UsEast1 => "us-east-1",
    UsEast2 => "us-east-2",
    UsWest1 => "us-west-1",
    UsWest2 => "us-west-2",
    CaCentral1 => "ca-central-1",
    EuCentral1 => "eu-central-1",
    EuWest1 => "eu-west-1",
    EuWest2 => "eu-west-2",
    EuWest3 => "eu-west-3",
    ApSouth1 => "ap-south-1",
    ApNortheast1 => "ap-northeast-1",
    ApNortheast2 => "ap-northeast-2",
    ApSoutheast1 => "ap-southeast-1",
    ApSoutheast2 => "ap-southeast-2",
    SaEast1 => "sa-east-1",
}

impl TryFrom<String> for Region {
    type Error = ConfigError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Settings for constructing a client
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ClientConfig {
    pub region: Region,
    /// Call-site capture for promise-returning calls
    pub trace: TraceCapture,
}

impl ClientConfig {
    pub fn new(region: Region) -> Self {
        Self {
            region,
            ..Self::default()
        }
    }

    pub fn with_trace(mut self, trace: TraceCapture) -> Self {
        self.trace = trace;
        self
    }

    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    /// Load configuration from a TOML file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&content)
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
