//! In-process counter store

use crate::error::Result;
use crate::store::{CounterState, CounterStore, WriteOutcome};
use std::sync::{Mutex, MutexGuard, PoisonError};
use tracing::debug;

#[derive(Debug, Default)]
struct Slot {
    value: u64,
    /// Bumped on every successful write; zero means the key was never written
    revision: u64,
}

impl Slot {
    fn version(&self) -> Option<String> {
        (self.revision > 0).then(|| format!("rev-{}", self.revision))
    }
}

/// Counter kept in memory with the same compare-and-swap rules as the remote store
#[derive(Debug, Default)]
pub struct MemoryStore {
    slot: Mutex<Slot>,
}

impl MemoryStore {
    /// Empty store: reads as zero with no version
    pub fn new() -> Self {
        Self::default()
    }

    /// Store that already holds `value` at its first revision
    pub fn with_value(value: u64) -> Self {
        Self {
            slot: Mutex::new(Slot { value, revision: 1 }),
        }
    }

    pub fn value(&self) -> u64 {
        self.lock().value
    }

    /// Number of successful writes, including the seeded value
    pub fn revision(&self) -> u64 {
        self.lock().revision
    }

    fn lock(&self) -> MutexGuard<'_, Slot> {
        self.slot.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl CounterStore for MemoryStore {
    fn read(&self) -> CounterState {
        let slot = self.lock();
        CounterState::new(slot.value, slot.version())
    }

    fn write(&self, value: u64, expected_version: Option<&str>) -> Result<WriteOutcome> {
        let mut slot = self.lock();
        if slot.version().as_deref() != expected_version {
            debug!(
                expected = ?expected_version,
                current = ?slot.version(),
                "memory store version conflict"
            );
            return Ok(WriteOutcome::Conflict);
        }

        slot.value = value;
        slot.revision += 1;
        Ok(WriteOutcome::Written {
            version: slot.version(),
        })
    }
}
