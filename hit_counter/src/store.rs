//! Versioned storage for a single counter value

use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Counter value together with the version it was read at
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CounterState {
    pub value: u64,
    /// Opaque version token; `None` when the store has no record of the key
    pub version: Option<String>,
}

impl CounterState {
    pub fn new(value: u64, version: Option<String>) -> Self {
        Self { value, version }
    }
}

/// Result of a compare-and-swap write
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WriteOutcome {
    /// The value was stored; carries the new version when the store reports one
    Written { version: Option<String> },
    /// Another writer got there first; the expected version is stale
    Conflict,
}

/// A remote integer protected by optimistic concurrency.
///
/// Reads never fail: an unreachable store or a missing key reads as zero.
pub trait CounterStore {
    fn read(&self) -> CounterState;

    /// Store `value` if the current version still equals `expected_version`
    fn write(&self, value: u64, expected_version: Option<&str>) -> Result<WriteOutcome>;
}

impl<S: CounterStore + ?Sized> CounterStore for &S {
    fn read(&self) -> CounterState {
        (**self).read()
    }

    fn write(&self, value: u64, expected_version: Option<&str>) -> Result<WriteOutcome> {
        (**self).write(value, expected_version)
    }
}

impl<S: CounterStore + ?Sized> CounterStore for Arc<S> {
    fn read(&self) -> CounterState {
        (**self).read()
    }

    fn write(&self, value: u64, expected_version: Option<&str>) -> Result<WriteOutcome> {
        (**self).write(value, expected_version)
    }
}

impl<S: CounterStore + ?Sized> CounterStore for Box<S> {
    fn read(&self) -> CounterState {
        (**self).read()
    }

    fn write(&self, value: u64, expected_version: Option<&str>) -> Result<WriteOutcome> {
        (**self).write(value, expected_version)
    }
}
