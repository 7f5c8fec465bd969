//! Ollama API client.
//!
//! Talks to the two endpoints the sentinel needs:
//! - `GET {api}/tags`: list installed models
//! - `POST {api}/generate`: run a prompt against a model
//!
//! Neither call retries or caches. Failures are reported in the returned
//! value rather than as errors; retry policy belongs to the callers.

use crate::models::config::MonitorConfig;
use crate::models::status::{ModelDescriptor, ProbeResult};
use crate::{Error, Result};
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::time::Duration;
use tracing::debug;

/// Timeout used for one-off diagnostic calls.
pub const DIAGNOSTIC_TIMEOUT: Duration = Duration::from_secs(5);

/// Ollama API client.
#[derive(Debug, Clone)]
pub struct OllamaClient {
    base_url: String,
    client: reqwest::Client,
}

/// Generate request payload.
#[derive(Debug, Serialize)]
struct GenerateRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    stream: bool,
}

/// Generate response. Fields other than `response` are ignored.
#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    response: String,
}

/// Models list response.
///
/// Entries stay untyped so one odd entry cannot fail the whole listing.
#[derive(Debug, Deserialize)]
struct TagsResponse {
    #[serde(default)]
    models: Option<Vec<Value>>,
}

/// Read a model entry, tolerating missing or oddly typed fields.
fn descriptor_from_entry(entry: &Value) -> Option<ModelDescriptor> {
    let fields = entry.as_object()?;

    Some(ModelDescriptor {
        name: fields
            .get("name")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string(),
        size_bytes: fields.get("size").and_then(size_from_json),
    })
}

/// Convert a JSON size to bytes; only non-negative whole numbers count.
fn size_from_json(value: &Value) -> Option<u64> {
    if let Some(bytes) = value.as_u64() {
        return Some(bytes);
    }

    let bytes = value.as_f64()?;
    let whole = bytes.is_finite() && bytes >= 0.0 && bytes.fract() == 0.0;
    (whole && bytes <= u64::MAX as f64).then(|| bytes as u64)
}

/// Raw outcome of a model listing call.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListModelsOutcome {
    pub reachable: bool,
    pub models: Vec<ModelDescriptor>,
    pub http_status: Option<u16>,
    pub error: Option<String>,
}

impl ListModelsOutcome {
    fn unreachable(http_status: Option<u16>, error: Error) -> Self {
        Self {
            reachable: false,
            models: Vec::new(),
            http_status,
            error: Some(error.to_string()),
        }
    }
}

impl OllamaClient {
    /// Create a client without a request timeout.
    pub fn new(api_base_url: &str) -> Result<Self> {
        Self::build(api_base_url, None)
    }

    /// Create a client whose requests give up after `timeout`.
    pub fn with_timeout(api_base_url: &str, timeout: Duration) -> Result<Self> {
        Self::build(api_base_url, Some(timeout))
    }

    /// Create a client for the configured daemon.
    pub fn from_config(config: &MonitorConfig) -> Result<Self> {
        Self::build(&config.api_base_url, config.request_timeout())
    }

    fn build(api_base_url: &str, timeout: Option<Duration>) -> Result<Self> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            base_url: api_base_url.trim_end_matches('/').to_string(),
            client: builder.build()?,
        })
    }

    /// API root this client talks to.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// List available models.
    pub async fn list_models(&self) -> ListModelsOutcome {
        let url = format!("{}/tags", self.base_url);

        let resp = match self.client.get(&url).send().await {
            Ok(resp) => resp,
            Err(e) => {
                debug!("GET {} failed: {}", url, e);
                return ListModelsOutcome::unreachable(None, Error::Transport(e.to_string()));
            }
        };

        let status = resp.status();
        if status != StatusCode::OK {
            return ListModelsOutcome::unreachable(
                Some(status.as_u16()),
                Error::Protocol(format!("unexpected status {}", status)),
            );
        }

        match resp.json::<TagsResponse>().await {
            Ok(tags) => ListModelsOutcome {
                reachable: true,
                models: tags
                    .models
                    .unwrap_or_default()
                    .iter()
                    .filter_map(descriptor_from_entry)
                    .collect(),
                http_status: Some(status.as_u16()),
                error: None,
            },
            Err(e) => ListModelsOutcome::unreachable(
                Some(status.as_u16()),
                Error::Protocol(format!("invalid model list: {}", e)),
            ),
        }
    }

    /// Generate a non-streamed completion for `prompt`.
    ///
    /// The full response text is returned in `response_snippet`.
    pub async fn generate(&self, model: &str, prompt: &str) -> ProbeResult {
        let url = format!("{}/generate", self.base_url);

        let request = GenerateRequest {
            model,
            prompt,
            stream: false,
        };

        let resp = match self.client.post(&url).json(&request).send().await {
            Ok(resp) => resp,
            Err(e) => {
                debug!("POST {} failed: {}", url, e);
                return ProbeResult::failure(None, Error::Transport(e.to_string()).to_string());
            }
        };

        let status = resp.status();
        if status != StatusCode::OK {
            return ProbeResult::failure(
                Some(status.as_u16()),
                Error::Protocol(format!("unexpected status {}", status)).to_string(),
            );
        }

        match resp.json::<GenerateResponse>().await {
            Ok(body) => ProbeResult::success(body.response),
            Err(e) => ProbeResult::failure(
                Some(status.as_u16()),
                Error::Protocol(format!("invalid generate response: {}", e)).to_string(),
            ),
        }
    }
}
