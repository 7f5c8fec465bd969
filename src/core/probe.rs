//! Model response probe.

use crate::models::config::MonitorConfig;
use crate::models::status::ProbeResult;
use crate::services::ollama::OllamaClient;
use tracing::{error, info};

/// Number of response characters kept for logging.
pub const SNIPPET_CHARS: usize = 50;

/// Send the configured prompt to the target model once.
///
/// Only checks that a response was produced; the content is not validated.
pub async fn test_model(client: &OllamaClient, config: &MonitorConfig) -> ProbeResult {
    let result = client
        .generate(&config.target_model, &config.prompt)
        .await
        .truncated(SNIPPET_CHARS);

    if result.succeeded {
        info!(
            "{} test response successful: {}...",
            config.target_model,
            result.response_snippet.as_deref().unwrap_or("")
        );
    } else {
        error!(
            status = ?result.http_status,
            "Failed to get response from {}: {}",
            config.target_model,
            result.error.as_deref().unwrap_or("unknown error")
        );
    }

    result
}
