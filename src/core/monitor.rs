//! Steady-state monitor loop.
//!
//! Each cycle checks the daemon and, when the target model is available,
//! probes it with the configured prompt. The loop treats every failure as
//! transient and only stops when asked to shut down.

use crate::core::{probe, status};
use crate::models::config::MonitorConfig;
use crate::models::status::{ProbeResult, ServiceStatus};
use crate::services::ollama::OllamaClient;
use crate::Result;
use std::future::Future;
use tokio::time::sleep;
use tracing::{debug, info, warn};

/// Phase of the current monitor cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MonitorState {
    Checking,
    Probing,
}

/// What happened during one cycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CycleOutcome {
    pub status: ServiceStatus,
    /// Present only when the probe ran.
    pub probe: Option<ProbeResult>,
}

/// Monitor loop for a single daemon.
pub struct MonitorLoop {
    config: MonitorConfig,
    client: OllamaClient,
    state: MonitorState,
    cycles: u64,
}

impl MonitorLoop {
    /// Create a monitor for the configured daemon.
    pub fn new(config: MonitorConfig) -> Result<Self> {
        let client = OllamaClient::from_config(&config)?;
        Ok(Self::with_client(config, client))
    }

    /// Create a monitor using an existing client.
    pub fn with_client(config: MonitorConfig, client: OllamaClient) -> Self {
        Self {
            config,
            client,
            state: MonitorState::Checking,
            cycles: 0,
        }
    }

    pub fn config(&self) -> &MonitorConfig {
        &self.config
    }

    pub fn state(&self) -> MonitorState {
        self.state
    }

    /// Number of completed cycles.
    pub fn cycles(&self) -> u64 {
        self.cycles
    }

    /// Run a single check (and probe, if the model is available).
    pub async fn run_cycle(&mut self) -> CycleOutcome {
        self.state = MonitorState::Checking;
        let status = status::check(&self.client, &self.config.target_model).await;

        let probe = if status.is_ready() {
            self.state = MonitorState::Probing;
            let result = probe::test_model(&self.client, &self.config).await;
            self.state = MonitorState::Checking;
            Some(result)
        } else {
            warn!(
                "Ollama service or {} model not available, will retry...",
                self.config.target_model
            );
            None
        };

        self.cycles += 1;
        debug!(cycle = self.cycles, "Monitor cycle complete");

        CycleOutcome { status, probe }
    }

    /// Run cycles forever, sleeping the check interval between them.
    pub async fn run(&mut self) {
        self.run_until(std::future::pending::<()>()).await;
    }

    /// Run cycles until `shutdown` resolves.
    pub async fn run_until<F>(&mut self, shutdown: F)
    where
        F: Future<Output = ()>,
    {
        info!(
            url = %self.config.api_base_url,
            model = %self.config.target_model,
            interval_secs = self.config.check_interval_secs,
            "Starting Ollama monitoring service"
        );

        tokio::pin!(shutdown);

        loop {
            tokio::select! {
                _ = &mut shutdown => {
                    info!(cycles = self.cycles, "Shutdown requested, stopping monitor");
                    break;
                }
                _ = self.cycle_then_wait() => {}
            }
        }
    }

    async fn cycle_then_wait(&mut self) {
        self.run_cycle().await;
        sleep(self.config.check_interval()).await;
    }
}
