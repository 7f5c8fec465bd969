//! Ollama preflight checks.

use super::CheckResult;
use crate::models::status::ServiceStatus;

/// Check if Ollama service is running.
pub fn check_service(status: &ServiceStatus) -> CheckResult {
    if status.reachable {
        CheckResult::pass(
            "Ollama",
            format!("running ({} models installed)", status.models_available.len()),
        )
    } else {
        let reason = match status.http_status {
            Some(code) => format!("not responding properly (status {})", code),
            None => "not running".to_string(),
        };
        CheckResult::fail("Ollama", reason, "Start Ollama: ollama serve")
    }
}

/// Check if the target model is installed.
pub fn check_model(status: &ServiceStatus, target_model: &str) -> CheckResult {
    if !status.reachable {
        return CheckResult::fail(
            "Model",
            format!("{} unknown (service unreachable)", target_model),
            "Start Ollama first: ollama serve",
        );
    }

    if status.target_model_present {
        CheckResult::pass("Model", format!("{} is ready", target_model))
    } else {
        CheckResult::fail(
            "Model",
            format!("{} is not available", target_model),
            format!("Pull the model: ollama pull {}", target_model),
        )
    }
}
