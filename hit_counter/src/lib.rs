//! # Hit Counter
//!
//! A single integer kept in a versioned remote file, updated with
//! compare-and-swap writes.
//!
//! ```no_run
//! use hit_counter::{CounterConfig, HitCounter, HttpCounterStore};
//!
//! let config = CounterConfig::new(
//!     "https://raw.example.com/site/main/count.txt",
//!     "https://api.example.com/repos/site/contents/count.txt",
//! )
//! .with_token("token");
//! let counter = HitCounter::new(HttpCounterStore::new(config)?);
//! println!("Visitors: {}", counter.increment());
//! # Ok::<(), hit_counter::CounterError>(())
//! ```

pub mod config;
pub mod counter;
pub mod error;
pub mod http;
pub mod memory;
pub mod store;

pub use crate::config::CounterConfig;
pub use crate::counter::HitCounter;
pub use crate::error::{CounterError, Result};
pub use crate::http::HttpCounterStore;
pub use crate::memory::MemoryStore;
pub use crate::store::{CounterState, CounterStore, WriteOutcome};
