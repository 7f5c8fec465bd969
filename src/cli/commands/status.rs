//! Status command implementation.
//!
//! One-shot check of a daemon: lists installed models, verifies the target
//! model is present and sends it a test prompt.

use crate::core::{resolver, status};
use crate::models::config::{self, DEFAULT_MODEL, DEFAULT_PROMPT};
use crate::models::status::ModelDescriptor;
use crate::services::ollama::OllamaClient;
use crate::Result;
use colored::Colorize;

/// Check the daemon at `host:port`.
///
/// Returns `false` when the daemon or the target model is unavailable.
pub async fn status(host: &str, port: u16, model: Option<String>) -> Result<bool> {
    let settings = config::load_settings()?;
    let target_model = model
        .or(settings.model)
        .unwrap_or_else(|| DEFAULT_MODEL.to_string());
    let prompt = settings
        .prompt
        .unwrap_or_else(|| DEFAULT_PROMPT.to_string());

    let endpoint = resolver::probe_target(&resolver::resolve_host_port(host, port)?)?;
    let client = match settings.timeout_secs {
        Some(secs) if secs > 0 => {
            OllamaClient::with_timeout(&endpoint.api_base_url, std::time::Duration::from_secs(secs))?
        }
        _ => OllamaClient::new(&endpoint.api_base_url)?,
    };

    Ok(run_status(&client, &target_model, &prompt).await)
}

/// Run the status check against an existing client and print the report.
///
/// Returns `false` when the daemon is unreachable, lists no models, or
/// lacks `target_model`. A failed test prompt is reported but still
/// returns `true`.
pub async fn run_status(client: &OllamaClient, target_model: &str, prompt: &str) -> bool {
    println!("Checking Ollama service at {}...", client.base_url());

    let service = status::check(client, target_model).await;
    if !service.reachable {
        match service.http_status {
            Some(code) => println!("{} Ollama API returned status code: {}", "[FAIL]".red(), code),
            None => println!(
                "{} Failed to connect to Ollama service at {}",
                "[FAIL]".red(),
                client.base_url()
            ),
        }
        return false;
    }

    println!("{} Ollama service is running", "[OK]".green());
    println!();
    println!("{}", "Available models:".bold());

    if service.models_available.is_empty() {
        println!("No models found");
        return false;
    }
    for model in &service.models_available {
        println!(" - {}", describe_model(model));
    }
    println!();

    if !service.target_model_present {
        println!("{} {} model is not available", "[FAIL]".red(), target_model);
        println!("  {} Pull the model: ollama pull {}", "->".yellow(), target_model);
        return false;
    }
    println!("{} {} model is available", "[OK]".green(), target_model);

    println!();
    println!("Testing {} with a simple prompt...", target_model);
    let probe = client.generate(target_model, prompt).await;
    if probe.succeeded {
        println!(
            "Model response: {}",
            probe.response_snippet.as_deref().unwrap_or("No response")
        );
        println!("{} {} model is working correctly!", "[OK]".green(), target_model);
    } else {
        let reason = match probe.http_status {
            Some(code) => code.to_string(),
            None => probe.error.unwrap_or_else(|| "unknown error".to_string()),
        };
        println!("{} Failed to test model: {}", "[FAIL]".red(), reason);
    }

    println!();
    println!(
        "Status check completed successfully at {}",
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S")
    );

    true
}

/// Format a model line for display.
fn describe_model(model: &ModelDescriptor) -> String {
    match model.size_bytes {
        Some(bytes) => format!("{} ({})", model.name, format_size(bytes)),
        None => format!("{} (unknown size)", model.name),
    }
}

/// Format a byte count using binary units.
fn format_size(bytes: u64) -> String {
    const UNITS: [&str; 5] = ["B", "KiB", "MiB", "GiB", "TiB"];

    let mut size = bytes as f64;
    let mut unit = 0;
    while size >= 1024.0 && unit < UNITS.len() - 1 {
        size /= 1024.0;
        unit += 1;
    }

    if unit == 0 {
        format!("{} {}", bytes, UNITS[0])
    } else {
        format!("{:.1} {}", size, UNITS[unit])
    }
}
