//! Setup command implementation.
//!
//! Waits for the daemon to accept requests, then runs the preflight checks.

use crate::core::{retry, status};
use crate::models::config::{self, MonitorConfig, Settings};
use crate::preflight;
use crate::services::ollama::OllamaClient;
use crate::Result;
use colored::Colorize;
use std::time::Duration;

/// Wait for the daemon and verify the target model.
///
/// Returns `false` when the daemon never became reachable.
pub async fn setup(attempts: u32, delay_secs: u64, overrides: Settings) -> Result<bool> {
    let settings = config::load_settings()?.overlay(overrides);
    let config = MonitorConfig::from_settings(&settings)?;
    let client = OllamaClient::from_config(&config)?;

    Ok(run_setup(
        &client,
        &config.target_model,
        attempts,
        Duration::from_secs(delay_secs),
    )
    .await)
}

/// Wait up to `attempts` times for `client`'s daemon, then run preflight.
pub async fn run_setup(
    client: &OllamaClient,
    target_model: &str,
    attempts: u32,
    delay: Duration,
) -> bool {
    println!(
        "{}",
        format!("Setting up Ollama with {}...", target_model).bold()
    );
    println!("Waiting for Ollama at {}", client.base_url());

    let ready = retry::wait_until_ready(
        move || async move { client.list_models().await.reachable },
        attempts,
        delay,
    )
    .await;

    if !ready {
        println!(
            "{} Ollama server is not running after {} attempts.",
            "ERROR:".red().bold(),
            attempts
        );
        return false;
    }

    println!();
    let service = status::check(client, target_model).await;
    let results = preflight::run_preflight_checks(&service, target_model);
    preflight::print_results(&results);
    println!();

    if !preflight::all_passed(&results) {
        println!(
            "{}",
            "Setup finished with warnings. Fix the issues above before monitoring.".yellow()
        );
    } else {
        println!("{}", "Ollama setup completed!".green());
    }

    true
}
