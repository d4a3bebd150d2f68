// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Registry of adapted operation pairs
//!
//! Pairs are registered once, at initialization, and looked up by owner and
//! start-operation name afterwards. The wrapped types are never modified.

use crate::adapter::{Adapted, TwoPhaseOperation};
use crate::trace::TraceCapture;
use std::any::Any;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use thiserror::Error;

/// Errors from registering or looking up adaptations
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    #[error("operation name must not be empty")]
    EmptyName,
    #[error("start and finish operations must differ: {0}")]
    SameOperation(String),
    #[error("already registered: {0}")]
    AlreadyRegistered(String),
    #[error("not registered: {0}")]
    NotRegistered(String),
    #[error("registered with a different operation type: {0}")]
    TypeMismatch(String),
}

/// Names of a start/finish pair on an owning type
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct OperationPair {
    owner: String,
    start: String,
    finish: String,
}

impl OperationPair {
    pub fn new(
        owner: impl Into<String>,
        start: impl Into<String>,
        finish: impl Into<String>,
    ) -> Result<Self, RegistryError> {
        let (owner, start, finish) = (owner.into(), start.into(), finish.into());
        if owner.is_empty() || start.is_empty() || finish.is_empty() {
            return Err(RegistryError::EmptyName);
        }
        if start == finish {
            return Err(RegistryError::SameOperation(format!("{}.{}", owner, start)));
        }
        Ok(Self {
            owner,
            start,
            finish,
        })
    }

    pub fn owner(&self) -> &str {
        &self.owner
    }

    pub fn start(&self) -> &str {
        &self.start
    }

    pub fn finish(&self) -> &str {
        &self.finish
    }
}

impl fmt::Display for OperationPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}/{}", self.owner, self.start, self.finish)
    }
}

type Key = (String, String);

/// Adapted operations keyed by `(owner, start)`
pub struct Registry {
    capture: TraceCapture,
    entries: HashMap<Key, Arc<dyn Any + Send + Sync>>,
}

impl Registry {
    pub fn new() -> Self {
        Self::with_capture(TraceCapture::default())
    }

    /// Registry whose adaptations record call sites with `capture`
    pub fn with_capture(capture: TraceCapture) -> Self {
        Self {
            capture,
            entries: HashMap::new(),
        }
    }

    /// Wrap `op` as the adapted `start` operation of `owner`.
    ///
    /// Each `(owner, start)` can be registered once; wrapping twice would
    /// stack two adapters on the same operation.
    pub fn register_adaptation<Op: TwoPhaseOperation>(
        &mut self,
        owner: &str,
        start: &str,
        finish: &str,
        op: Op,
    ) -> Result<Arc<Adapted<Op>>, RegistryError> {
        let pair = OperationPair::new(owner, start, finish)?;
        let key = (owner.to_string(), start.to_string());
        if self.entries.contains_key(&key) {
            return Err(RegistryError::AlreadyRegistered(format!("{}.{}", owner, start)));
        }

        tracing::debug!(operation = %pair, capture = ?self.capture, "registered adaptation");
        let adapted = Arc::new(Adapted::new(pair, op, self.capture));
        self.entries.insert(key, adapted.clone());
        Ok(adapted)
    }

    /// Look up the adapted `start` operation of `owner`
    pub fn adapted<Op: TwoPhaseOperation>(
        &self,
        owner: &str,
        start: &str,
    ) -> Result<Arc<Adapted<Op>>, RegistryError> {
        let name = || format!("{}.{}", owner, start);
        let entry = self
            .entries
            .get(&(owner.to_string(), start.to_string()))
            .ok_or_else(|| RegistryError::NotRegistered(name()))?;

        Arc::clone(entry)
            .downcast::<Adapted<Op>>()
            .map_err(|_| RegistryError::TypeMismatch(name()))
    }

    /// Whether `(owner, start)` has been adapted
    pub fn contains(&self, owner: &str, start: &str) -> bool {
        self.entries
            .contains_key(&(owner.to_string(), start.to_string()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn capture(&self) -> TraceCapture {
        self.capture
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Registry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Registry")
            .field("capture", &self.capture)
            .field("len", &self.entries.len())
            .finish()
    }
}

#[cfg(test)]
#[path = "registry_tests.rs"]
mod tests;
