//! Preflight checks module.

mod network;
mod ollama;

use crate::models::status::ServiceStatus;
use colored::Colorize;

/// Outcome of one preflight check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckResult {
    /// Short label such as `Ollama` or `Model`.
    pub check: &'static str,
    pub passed: bool,
    pub detail: String,
    /// What the user should do about a failure.
    pub remedy: Option<String>,
}

impl CheckResult {
    pub fn pass(check: &'static str, detail: impl Into<String>) -> Self {
        Self {
            check,
            passed: true,
            detail: detail.into(),
            remedy: None,
        }
    }

    pub fn fail(check: &'static str, detail: impl Into<String>, remedy: impl Into<String>) -> Self {
        Self {
            check,
            passed: false,
            detail: detail.into(),
            remedy: Some(remedy.into()),
        }
    }
}

/// Run all preflight checks against an already fetched daemon status.
pub fn run_preflight_checks(status: &ServiceStatus, target_model: &str) -> Vec<CheckResult> {
    let mut results = Vec::new();

    // Check Ollama
    results.push(ollama::check_service(status));

    // Check the target model
    results.push(ollama::check_model(status, target_model));

    // Check diagnostic tools
    results.push(network::check_tools());

    results
}

/// Print one line per check followed by a summary line.
pub fn print_results(results: &[CheckResult]) {
    for result in results {
        let marker = if result.passed {
            "[OK]".green()
        } else {
            "[FAIL]".red()
        };
        println!("{} {}: {}", marker, result.check.bold(), result.detail);

        if let Some(remedy) = &result.remedy {
            println!("  {} {}", "->".yellow(), remedy);
        }
    }

    let summary = summary_line(results);
    if all_passed(results) {
        println!("{}", summary.green());
    } else {
        println!("{}", summary.yellow());
    }
}

/// Summarize how many checks passed, naming the failed ones.
pub fn summary_line(results: &[CheckResult]) -> String {
    let failed: Vec<&str> = results
        .iter()
        .filter(|r| !r.passed)
        .map(|r| r.check)
        .collect();
    let passed = results.len() - failed.len();

    if failed.is_empty() {
        format!("{}/{} checks passed", passed, results.len())
    } else {
        format!(
            "{}/{} checks passed (failed: {})",
            passed,
            results.len(),
            failed.join(", ")
        )
    }
}

/// True when no check failed.
pub fn all_passed(results: &[CheckResult]) -> bool {
    results.iter().all(|r| r.passed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::status::ModelDescriptor;

    fn status_with(models: &[&str], target: &str) -> ServiceStatus {
        let models: Vec<_> = models.iter().map(|m| ModelDescriptor::new(m, None)).collect();
        ServiceStatus {
            reachable: true,
            target_model_present: models.iter().any(|m| m.name == target),
            models_available: models,
            http_status: Some(200),
            error: None,
        }
    }

    #[test]
    fn test_ready_daemon_passes() {
        let results = run_preflight_checks(&status_with(&["llama3:3b"], "llama3:3b"), "llama3:3b");
        assert_eq!(results.len(), 3);
        assert!(all_passed(&results));
    }

    #[test]
    fn test_missing_model_fails_with_pull_hint() {
        let results = run_preflight_checks(&status_with(&["mistral"], "llama3:3b"), "llama3:3b");
        assert!(!all_passed(&results));

        let model = results.iter().find(|r| r.check == "Model").unwrap();
        assert!(!model.passed);
        assert_eq!(model.remedy.as_deref(), Some("Pull the model: ollama pull llama3:3b"));
    }

    #[test]
    fn test_unreachable_daemon_fails_both_checks() {
        let status = ServiceStatus::unreachable(None, Some("connection refused".to_string()));
        let results = run_preflight_checks(&status, "llama3:3b");

        assert!(!results[0].passed);
        assert!(!results[1].passed);
    }

    #[test]
    fn test_summary_line() {
        let results = run_preflight_checks(&status_with(&["llama3:3b"], "llama3:3b"), "llama3:3b");
        assert_eq!(summary_line(&results), "3/3 checks passed");

        let status = ServiceStatus::unreachable(Some(500), None);
        let results = run_preflight_checks(&status, "llama3:3b");
        assert_eq!(summary_line(&results), "1/3 checks passed (failed: Ollama, Model)");

        assert_eq!(summary_line(&[]), "0/0 checks passed");
    }

    #[test]
    fn test_passing_check_has_no_remedy() {
        let check = CheckResult::pass("Ollama", "running");
        assert!(check.passed);
        assert_eq!(check.remedy, None);

        let check = CheckResult::fail("Ollama", String::from("not running"), "ollama serve");
        assert_eq!(check.remedy.as_deref(), Some("ollama serve"));
    }
}
