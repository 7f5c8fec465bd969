//! Daemon status and probe result models.

use serde::{Deserialize, Serialize};

/// A model advertised by the daemon.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelDescriptor {
    pub name: String,
    /// Size on disk in bytes, when the daemon reports it.
    pub size_bytes: Option<u64>,
}

impl ModelDescriptor {
    pub fn new(name: &str, size_bytes: Option<u64>) -> Self {
        Self {
            name: name.to_string(),
            size_bytes,
        }
    }
}

/// Outcome of one status check against the daemon.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ServiceStatus {
    /// Whether the listing endpoint answered 200 with a decodable body.
    pub reachable: bool,
    /// Models in the order the daemon listed them.
    pub models_available: Vec<ModelDescriptor>,
    /// Whether the configured target model is among `models_available`.
    pub target_model_present: bool,
    /// Raw HTTP status, kept for logging.
    pub http_status: Option<u16>,
    /// Transport or protocol error, kept for logging.
    pub error: Option<String>,
}

impl ServiceStatus {
    /// Status for a daemon that could not be reached.
    pub fn unreachable(http_status: Option<u16>, error: Option<String>) -> Self {
        Self {
            reachable: false,
            models_available: Vec::new(),
            target_model_present: false,
            http_status,
            error,
        }
    }

    /// Whether the daemon is up and serves the target model.
    pub fn is_ready(&self) -> bool {
        self.reachable && self.target_model_present
    }
}

/// Check if a model list contains `target` (exact, case-sensitive).
pub fn contains_model(models: &[ModelDescriptor], target: &str) -> bool {
    models.iter().any(|m| m.name == target)
}

/// Outcome of one generate probe.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ProbeResult {
    pub succeeded: bool,
    pub response_snippet: Option<String>,
    pub http_status: Option<u16>,
    pub error: Option<String>,
}

impl ProbeResult {
    /// Successful probe carrying the daemon's response text.
    pub fn success(response: String) -> Self {
        Self {
            succeeded: true,
            response_snippet: Some(response),
            http_status: Some(200),
            error: None,
        }
    }

    /// Failed probe.
    pub fn failure(http_status: Option<u16>, error: String) -> Self {
        Self {
            succeeded: false,
            response_snippet: None,
            http_status,
            error: Some(error),
        }
    }

    /// Shorten the response snippet to at most `max_chars` characters.
    pub fn truncated(mut self, max_chars: usize) -> Self {
        if let Some(text) = self.response_snippet.take() {
            self.response_snippet = Some(truncate_chars(&text, max_chars));
        }
        self
    }
}

/// Take the first `max_chars` characters of `text` without splitting a char.
pub fn truncate_chars(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => text[..idx].to_string(),
        None => text.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_contains_model_exact_match() {
        let models = vec![
            ModelDescriptor::new("mistral", Some(123)),
            ModelDescriptor::new("gemma3:1b", None),
        ];

        assert!(contains_model(&models, "mistral"));
        assert!(contains_model(&models, "gemma3:1b"));
        assert!(!contains_model(&models, "Mistral"));
        assert!(!contains_model(&models, "gemma3"));
        assert!(!contains_model(&models, "mistral "));
        assert!(!contains_model(&[], "mistral"));
    }

    #[test]
    fn test_truncate_chars() {
        assert_eq!(truncate_chars("Paris", 50), "Paris");
        assert_eq!(truncate_chars("abcdef", 3), "abc");
        assert_eq!(truncate_chars("", 3), "");
        // Multi-byte characters are never split
        assert_eq!(truncate_chars("巴黎是法国的首都", 2), "巴黎");
    }

    #[test]
    fn test_probe_result_truncated() {
        let result = ProbeResult::success("x".repeat(80)).truncated(50);
        assert_eq!(result.response_snippet.as_deref().map(str::len), Some(50));
        assert!(result.succeeded);

        let failed = ProbeResult::failure(Some(500), "boom".to_string()).truncated(50);
        assert_eq!(failed.response_snippet, None);
    }

    #[test]
    fn test_unreachable_status() {
        let status = ServiceStatus::unreachable(Some(503), None);
        assert!(!status.reachable);
        assert!(!status.target_model_present);
        assert!(status.models_available.is_empty());
        assert!(!status.is_ready());
    }
}
