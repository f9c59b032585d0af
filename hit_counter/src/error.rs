//! Error types for the hit_counter crate

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CounterError {
    /// The store could not be reached (DNS, connect, timeout)
    #[error("Counter store unavailable: {0}")]
    RemoteStoreUnavailable(String),

    /// The store answered with a status that is neither success nor conflict
    #[error("Unexpected status {status} from counter store: {body}")]
    UnexpectedStatus { status: u16, body: String },

    /// The stored value is not a non-negative integer
    #[error("Malformed counter value '{0}'")]
    MalformedValue(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, CounterError>;

impl From<reqwest::Error> for CounterError {
    fn from(err: reqwest::Error) -> Self {
        CounterError::RemoteStoreUnavailable(err.to_string())
    }
}
