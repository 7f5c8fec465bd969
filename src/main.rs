//! Ollama Sentinel CLI
//!
//! A command-line tool that monitors a local Ollama daemon and diagnoses its network setup.

use clap::Parser;
use ollama_sentinel::cli::{
    args::{Cli, Commands},
    commands::{diagnose, monitor, setup, status},
};
use ollama_sentinel::models::config::Settings;
use std::path::Path;
use tracing_appender::non_blocking::WorkerGuard;

/// Name of the log file written by the monitor command.
const MONITOR_LOG_FILE: &str = "ollama_monitor.log";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Parse command line arguments
    let cli = Cli::parse();

    match cli.command {
        Commands::Monitor {
            model,
            interval,
            prompt,
            log_dir,
            no_log_file,
        } => {
            let log_dir = (!no_log_file).then_some(log_dir.as_path());
            let _guard = init_logging(cli.verbose, log_dir)?;

            let overrides = Settings {
                model,
                prompt,
                check_interval_secs: interval,
                ..Default::default()
            };
            monitor::monitor(overrides).await?;
        }

        Commands::Status { host, port, model } => {
            init_logging(cli.verbose, None)?;

            if !status::status(&host, port, model).await? {
                std::process::exit(1);
            }
        }

        Commands::Setup {
            attempts,
            delay,
            model,
        } => {
            init_logging(cli.verbose, None)?;

            let overrides = Settings {
                model,
                ..Default::default()
            };
            if !setup::setup(attempts, delay, overrides).await? {
                std::process::exit(1);
            }
        }

        Commands::Diagnose { port, json } => {
            init_logging(cli.verbose, None)?;
            diagnose::diagnose(port, json).await?;
        }
    }

    Ok(())
}

/// Initialize the logging system.
///
/// Logs go to stderr; when `log_dir` is given they are also appended to
/// `ollama_monitor.log` in that directory.
fn init_logging(verbose: bool, log_dir: Option<&Path>) -> anyhow::Result<Option<WorkerGuard>> {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let filter = if verbose {
        EnvFilter::new("ollama_sentinel=debug")
    } else {
        EnvFilter::new("ollama_sentinel=info")
    };

    let (file_layer, guard) = match log_dir {
        Some(dir) => {
            std::fs::create_dir_all(dir)?;
            let appender = tracing_appender::rolling::never(dir, MONITOR_LOG_FILE);
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let layer = fmt::layer().with_writer(writer).with_ansi(false);
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr).with_target(false))
        .with(file_layer)
        .with(filter)
        .init();

    Ok(guard)
}
