//! Monitor command implementation.

use crate::core::diagnostics;
use crate::core::monitor::MonitorLoop;
use crate::core::resolver;
use crate::models::config::{self, MonitorConfig, Settings};
use crate::services::network::SystemInspector;
use crate::Result;
use tracing::{info, warn};

/// Run the monitor loop until Ctrl+C.
pub async fn monitor(overrides: Settings) -> Result<()> {
    let settings = config::load_settings()?.overlay(overrides);
    let config = MonitorConfig::from_settings(&settings)?;

    log_startup_diagnostics(&config);

    let mut monitor = MonitorLoop::new(config)?;
    monitor.run_until(shutdown_signal()).await;

    Ok(())
}

/// Log network diagnostics once before monitoring starts.
fn log_startup_diagnostics(config: &MonitorConfig) {
    let port = resolver::resolve(&config.listen_host, resolver::DEFAULT_LISTEN_HOST)
        .ok()
        .and_then(|endpoint| url::Url::parse(&endpoint.origin).ok())
        .and_then(|url| url.port_or_known_default())
        .unwrap_or(resolver::DEFAULT_PORT);

    let info = diagnostics::gather(&SystemInspector, port);

    info!("Hostname: {}", info.hostname);
    info!("IP addresses: {}", info.ip_addresses.join(", "));
    info!("Listen address: {} (probing {})", config.listen_host, config.api_base_url);
    for line in info.listening_sockets.lines() {
        info!("Socket: {}", line);
    }

    match diagnostics::derive_external_ip(&info) {
        Some(ip) => info!("External address for remote clients: http://{}:{}", ip, port),
        None => warn!("No non-loopback address found; remote clients cannot reach Ollama"),
    }
}

/// Wait for Ctrl+C.
async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("Failed to listen for Ctrl+C: {}", e);
        // Without a signal handler, keep running until killed
        std::future::pending::<()>().await;
    }
}
