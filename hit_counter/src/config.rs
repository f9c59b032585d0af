//! Counter store settings

use crate::error::{CounterError, Result};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

pub const DEFAULT_TIMEOUT_SECS: u64 = 10;
pub const DEFAULT_COMMIT_MESSAGE: &str = "Update hit counter";

/// Where the counter lives and how to talk to it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CounterConfig {
    /// Plaintext download URL of the counter file
    pub raw_url: String,
    /// Metadata/update URL of the counter file
    pub contents_url: String,
    /// Bearer credential sent with every read and write
    #[serde(default)]
    pub token: Option<String>,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    #[serde(default = "default_commit_message")]
    pub commit_message: String,
    /// Extra read-compute-write rounds after a version conflict
    #[serde(default)]
    pub max_conflict_retries: u32,
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

fn default_commit_message() -> String {
    DEFAULT_COMMIT_MESSAGE.to_string()
}

impl CounterConfig {
    pub fn new(raw_url: impl Into<String>, contents_url: impl Into<String>) -> Self {
        Self {
            raw_url: raw_url.into(),
            contents_url: contents_url.into(),
            token: None,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            commit_message: DEFAULT_COMMIT_MESSAGE.to_string(),
            max_conflict_retries: 0,
        }
    }

    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    /// Read the `HIT_COUNTER_*` environment variables.
    ///
    /// Returns `Ok(None)` when either URL is unset, meaning no counter is configured.
    pub fn from_env() -> Result<Option<Self>> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Like [`from_env`](Self::from_env) with a custom variable source
    pub fn from_lookup<F>(lookup: F) -> Result<Option<Self>>
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let (raw_url, contents_url) = match (
            non_empty("HIT_COUNTER_RAW_URL"),
            non_empty("HIT_COUNTER_CONTENTS_URL"),
        ) {
            (Some(raw), Some(contents)) => (raw, contents),
            _ => return Ok(None),
        };

        let mut config = Self::new(raw_url, contents_url);
        config.token = non_empty("HIT_COUNTER_TOKEN");
        if let Some(raw) = non_empty("HIT_COUNTER_TIMEOUT_SECS") {
            config.timeout_secs = parse_var("HIT_COUNTER_TIMEOUT_SECS", &raw)?;
        }
        if let Some(raw) = non_empty("HIT_COUNTER_MAX_RETRIES") {
            config.max_conflict_retries = parse_var("HIT_COUNTER_MAX_RETRIES", &raw)?;
        }
        if let Some(message) = non_empty("HIT_COUNTER_COMMIT_MESSAGE") {
            config.commit_message = message;
        }

        config.validate()?;
        Ok(Some(config))
    }

    pub fn validate(&self) -> Result<()> {
        for (name, url) in [("raw_url", &self.raw_url), ("contents_url", &self.contents_url)] {
            if !(url.starts_with("http://") || url.starts_with("https://")) {
                return Err(CounterError::Config(format!(
                    "{} must be an http(s) URL, got '{}'",
                    name, url
                )));
            }
        }
        if self.timeout_secs == 0 {
            return Err(CounterError::Config(
                "timeout_secs must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }
}

fn parse_var<T: FromStr>(name: &str, raw: &str) -> Result<T> {
    raw.trim()
        .parse()
        .map_err(|_| CounterError::Config(format!("{} has an invalid value '{}'", name, raw)))
}
