//! Daemon status checking.

use crate::models::status::{contains_model, ServiceStatus};
use crate::services::ollama::OllamaClient;
use tracing::{info, warn};

/// Check whether the daemon is up and serves `target_model`.
///
/// Never fails: transport and protocol problems come back as an
/// unreachable status.
pub async fn check(client: &OllamaClient, target_model: &str) -> ServiceStatus {
    let outcome = client.list_models().await;

    if !outcome.reachable {
        warn!(
            url = client.base_url(),
            status = ?outcome.http_status,
            "Ollama service not responding properly: {}",
            outcome.error.as_deref().unwrap_or("unknown error")
        );
        return ServiceStatus::unreachable(outcome.http_status, outcome.error);
    }

    let target_model_present = contains_model(&outcome.models, target_model);

    if target_model_present {
        info!(
            models = outcome.models.len(),
            "Ollama service is running with {} available",
            target_model
        );
    } else {
        info!(
            models = outcome.models.len(),
            "Ollama service is running but {} was not found",
            target_model
        );
    }

    ServiceStatus {
        reachable: true,
        models_available: outcome.models,
        target_model_present,
        http_status: outcome.http_status,
        error: None,
    }
}
