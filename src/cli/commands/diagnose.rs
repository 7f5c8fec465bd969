//! Diagnose command implementation.

use crate::core::{diagnostics, resolver};
use crate::services::network::SystemInspector;
use crate::services::ollama::{OllamaClient, DIAGNOSTIC_TIMEOUT};
use crate::Result;
use colored::Colorize;

/// Print network diagnostics and test the daemon through the external address.
pub async fn diagnose(port: u16, json: bool) -> Result<()> {
    let info = diagnostics::gather(&SystemInspector, port);

    if json {
        println!("{}", serde_json::to_string_pretty(&info)?);
        return Ok(());
    }

    println!("{}", "Network diagnostics".bold().cyan());
    println!();

    println!("  {} {}", "Hostname:".bold(), info.hostname);
    println!("  {} {}", "IP addresses:".bold(), info.ip_addresses.join(", "));
    println!("  {}", format!("Sockets on port {}:", port).bold());
    for line in info.listening_sockets.lines() {
        println!("    {}", line);
    }
    if let Some(ref error) = info.error {
        println!("  {} {}", "Incomplete:".yellow(), error);
    }
    println!();

    let Some(ip) = diagnostics::derive_external_ip(&info) else {
        println!(
            "{}",
            "No external address found; only local clients can reach Ollama.".yellow()
        );
        return Ok(());
    };

    let endpoint = resolver::resolve_host_port(ip, port)?;
    println!("Testing connectivity to {}...", endpoint.origin);

    let client = OllamaClient::with_timeout(&endpoint.api_base_url, DIAGNOSTIC_TIMEOUT)?;
    let outcome = client.list_models().await;

    if outcome.reachable {
        println!(
            "{} Ollama is reachable at {} ({} models)",
            "[OK]".green(),
            endpoint.origin,
            outcome.models.len()
        );
    } else {
        println!(
            "{} Ollama is not reachable at {}: {}",
            "[FAIL]".red(),
            endpoint.origin,
            outcome.error.as_deref().unwrap_or("unknown error")
        );
        println!(
            "  {} Set OLLAMA_HOST=0.0.0.0 to listen on all interfaces",
            "->".yellow()
        );
    }

    Ok(())
}
