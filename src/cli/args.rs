//! Command line argument definitions.

use crate::core::resolver::DEFAULT_PORT;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Ollama Sentinel - Keep an eye on your local Ollama daemon
#[derive(Parser, Debug)]
#[command(name = "ollama-sentinel")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Continuously monitor the daemon and probe the model
    Monitor {
        /// Model to monitor (overrides OLLAMA_MODEL)
        #[arg(short, long)]
        model: Option<String>,

        /// Seconds between checks (overrides OLLAMA_CHECK_INTERVAL)
        #[arg(short, long)]
        interval: Option<u64>,

        /// Prompt sent to the model (overrides OLLAMA_PROMPT)
        #[arg(long)]
        prompt: Option<String>,

        /// Directory for the ollama_monitor.log file
        #[arg(long, value_name = "DIR", default_value = ".")]
        log_dir: PathBuf,

        /// Do not write a log file
        #[arg(long)]
        no_log_file: bool,
    },

    /// Check daemon status once and exit
    Status {
        /// Ollama host
        #[arg(long, default_value = "localhost")]
        host: String,

        /// Ollama port
        #[arg(long, default_value_t = DEFAULT_PORT)]
        port: u16,

        /// Model expected to be installed (overrides OLLAMA_MODEL)
        #[arg(short, long)]
        model: Option<String>,
    },

    /// Wait for the daemon to come up and verify the model
    Setup {
        /// Maximum number of readiness checks
        #[arg(long, default_value_t = 30)]
        attempts: u32,

        /// Seconds between readiness checks
        #[arg(long, default_value_t = 2)]
        delay: u64,

        /// Model expected to be installed (overrides OLLAMA_MODEL)
        #[arg(short, long)]
        model: Option<String>,
    },

    /// Show network diagnostics for the daemon's port
    Diagnose {
        /// Port the daemon listens on
        #[arg(long, default_value_t = DEFAULT_PORT)]
        port: u16,

        /// Print the diagnostics as JSON and skip the connectivity test
        #[arg(long)]
        json: bool,
    },
}
