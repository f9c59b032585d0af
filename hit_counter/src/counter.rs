//! Read-increment-write over a [`CounterStore`]

use crate::store::{CounterStore, WriteOutcome};
use tracing::{debug, warn};

/// Page hit counter.
///
/// Counting is best effort: `increment` always reports a number, and a write
/// that fails or loses a version race is logged rather than returned.
#[derive(Debug, Clone)]
pub struct HitCounter<S> {
    store: S,
    max_conflict_retries: u32,
}

impl<S: CounterStore> HitCounter<S> {
    /// Counter that gives up after the first conflict
    pub fn new(store: S) -> Self {
        Self {
            store,
            max_conflict_retries: 0,
        }
    }

    /// Retry up to `retries` more times when another writer wins the race
    pub fn with_max_conflict_retries(mut self, retries: u32) -> Self {
        self.max_conflict_retries = retries;
        self
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn max_conflict_retries(&self) -> u32 {
        self.max_conflict_retries
    }

    /// Current stored value, without counting a hit
    pub fn current(&self) -> u64 {
        self.store.read().value
    }

    /// Count one hit and return the new total as computed locally.
    ///
    /// The returned value is `read + 1` even when the write was rejected, so
    /// two racing visitors can both see the same number.
    pub fn increment(&self) -> u64 {
        let mut attempt = 0;
        loop {
            let state = self.store.read();
            let next = state.value.saturating_add(1);

            match self.store.write(next, state.version.as_deref()) {
                Ok(WriteOutcome::Written { .. }) => {
                    debug!(value = next, attempt, "hit counted");
                    return next;
                }
                Ok(WriteOutcome::Conflict) if attempt < self.max_conflict_retries => {
                    attempt += 1;
                    debug!(attempt, "counter conflict, retrying");
                }
                Ok(WriteOutcome::Conflict) => {
                    warn!(value = next, attempt, "counter conflict, hit not recorded");
                    return next;
                }
                Err(err) => {
                    warn!(value = next, error = %err, "counter write failed");
                    return next;
                }
            }
        }
    }
}
