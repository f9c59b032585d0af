//! Counter stored as a file behind a contents-style HTTP API.
//!
//! The value is read as plaintext from `raw_url`. The version token is the
//! file's `sha`, read from the JSON metadata at `contents_url`. Writes `PUT`
//! the base64-encoded value to `contents_url` together with the `sha` they
//! expect to replace.

use crate::config::CounterConfig;
use crate::error::{CounterError, Result};
use crate::store::{CounterState, CounterStore, WriteOutcome};
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use reqwest::blocking::{Client, RequestBuilder};
use reqwest::header::{ACCEPT, AUTHORIZATION};
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, warn};

const USER_AGENT: &str = concat!("hit_counter/", env!("CARGO_PKG_VERSION"));

#[derive(Debug, Deserialize)]
struct FileMetadata {
    sha: String,
}

#[derive(Debug, Serialize)]
struct UpdateRequest<'a> {
    message: &'a str,
    content: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    sha: Option<&'a str>,
}

#[derive(Debug, Deserialize)]
struct UpdateResponse {
    content: Option<FileMetadata>,
}

/// Blocking HTTP client for the remote counter file
#[derive(Debug, Clone)]
pub struct HttpCounterStore {
    client: Client,
    config: CounterConfig,
}

impl HttpCounterStore {
    /// Build a client with the configured timeout
    pub fn new(config: CounterConfig) -> Result<Self> {
        config.validate()?;
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| CounterError::Config(format!("failed to build HTTP client: {}", e)))?;

        Ok(Self { client, config })
    }

    /// Use a preconfigured client; its own timeout settings apply
    pub fn with_client(client: Client, config: CounterConfig) -> Self {
        Self { client, config }
    }

    pub fn config(&self) -> &CounterConfig {
        &self.config
    }

    fn authorized(&self, request: RequestBuilder) -> RequestBuilder {
        match &self.config.token {
            Some(token) => request.header(AUTHORIZATION, format!("Bearer {}", token)),
            None => request,
        }
    }

    fn read_value(&self) -> Result<u64> {
        let request = self.client.get(&self.config.raw_url);
        let response = self.authorized(request).send()?;
        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            debug!(url = %self.config.raw_url, "counter file does not exist yet");
            return Ok(0);
        }
        if !status.is_success() {
            return Err(CounterError::UnexpectedStatus {
                status: status.as_u16(),
                body: response.text().unwrap_or_default(),
            });
        }

        let body = response.text()?;
        parse_value(&body)
    }

    fn read_version(&self) -> Result<Option<String>> {
        let request = self
            .client
            .get(&self.config.contents_url)
            .header(ACCEPT, "application/json");
        let response = self.authorized(request).send()?;
        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        if !status.is_success() {
            return Err(CounterError::UnexpectedStatus {
                status: status.as_u16(),
                body: response.text().unwrap_or_default(),
            });
        }

        let metadata: FileMetadata = response.json()?;
        Ok(Some(metadata.sha))
    }
}

impl CounterStore for HttpCounterStore {
    fn read(&self) -> CounterState {
        let value = self.read_value().unwrap_or_else(|err| {
            warn!(error = %err, "counter read failed, treating as 0");
            0
        });
        let version = self.read_version().unwrap_or_else(|err| {
            warn!(error = %err, "counter version lookup failed");
            None
        });

        CounterState { value, version }
    }

    fn write(&self, value: u64, expected_version: Option<&str>) -> Result<WriteOutcome> {
        let body = UpdateRequest {
            message: &self.config.commit_message,
            content: STANDARD.encode(value.to_string()),
            sha: expected_version,
        };
        let request = self
            .client
            .put(&self.config.contents_url)
            .header(ACCEPT, "application/json")
            .json(&body);
        let response = self.authorized(request).send()?;
        let status = response.status();

        match status {
            StatusCode::OK | StatusCode::CREATED => {
                let version = response
                    .json::<UpdateResponse>()
                    .ok()
                    .and_then(|r| r.content)
                    .map(|c| c.sha);
                debug!(value, status = status.as_u16(), "counter written");
                Ok(WriteOutcome::Written { version })
            }
            StatusCode::CONFLICT | StatusCode::PRECONDITION_FAILED => {
                debug!(value, status = status.as_u16(), "counter version conflict");
                Ok(WriteOutcome::Conflict)
            }
            _ => Err(CounterError::UnexpectedStatus {
                status: status.as_u16(),
                body: response.text().unwrap_or_default(),
            }),
        }
    }
}

fn parse_value(body: &str) -> Result<u64> {
    let trimmed = body.trim();
    if trimmed.is_empty() {
        return Ok(0);
    }
    trimmed
        .parse()
        .map_err(|_| CounterError::MalformedValue(trimmed.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_value() {
        assert_eq!(parse_value("42\n").unwrap(), 42);
        assert_eq!(parse_value("").unwrap(), 0);
        assert!(matches!(
            parse_value("forty"),
            Err(CounterError::MalformedValue(v)) if v == "forty"
        ));
        assert!(parse_value("-1").is_err());
    }

    #[test]
    fn test_update_request_omits_missing_sha() {
        let body = UpdateRequest {
            message: "Update hit counter",
            content: STANDARD.encode("1"),
            sha: None,
        };
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"message": "Update hit counter", "content": "MQ=="})
        );
    }
}
