//! OS network inspection.
//!
//! [`NetworkInspector`] is the seam between the diagnostics logic and the
//! operating system. [`SystemInspector`] shells out to the usual tools
//! (`hostname`, `ss`, `netstat`); tests substitute their own implementation.

use crate::{Error, Result};
use std::net::{Ipv4Addr, ToSocketAddrs};
use std::process::Command;

/// Source of raw network facts about the local machine.
pub trait NetworkInspector {
    /// Local hostname.
    fn hostname(&self) -> Result<String>;

    /// IPv4 addresses bound to local interfaces.
    fn enumerate_addresses(&self) -> Result<Vec<String>>;

    /// IPv4 addresses `hostname` resolves to.
    fn resolve_hostname(&self, hostname: &str) -> Result<Vec<String>>;

    /// Socket listing lines for sockets listening on `port`.
    ///
    /// An empty string means the listing worked but nothing matched.
    fn listening_sockets(&self, port: u16) -> Result<String>;
}

/// Inspector backed by the real operating system.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemInspector;

impl NetworkInspector for SystemInspector {
    fn hostname(&self) -> Result<String> {
        let name = whoami::fallible::hostname()?;
        if name.trim().is_empty() {
            return Err(Error::other("empty hostname"));
        }
        Ok(name.trim().to_string())
    }

    fn enumerate_addresses(&self) -> Result<Vec<String>> {
        let output = run_command("hostname", &["-I"])?;
        let addresses = parse_ipv4_list(&output);
        if addresses.is_empty() {
            return Err(Error::CommandFailed {
                command: "hostname -I".to_string(),
                reason: "no IPv4 addresses reported".to_string(),
            });
        }
        Ok(addresses)
    }

    fn resolve_hostname(&self, hostname: &str) -> Result<Vec<String>> {
        let mut addresses: Vec<String> = Vec::new();
        for addr in (hostname, 0).to_socket_addrs()? {
            let ip = addr.ip();
            if ip.is_ipv4() && !addresses.contains(&ip.to_string()) {
                addresses.push(ip.to_string());
            }
        }

        if addresses.is_empty() {
            return Err(Error::other(format!("{} resolved to no IPv4 address", hostname)));
        }
        Ok(addresses)
    }

    fn listening_sockets(&self, port: u16) -> Result<String> {
        let output = run_command("ss", &["-tln"]).or_else(|ss_err| {
            tracing::debug!("ss unavailable ({}), trying netstat", ss_err);
            run_command("netstat", &["-tln"])
        })?;

        Ok(filter_socket_lines(&output, port))
    }
}

/// Check if a diagnostic tool can be executed.
pub fn is_installed(program: &str, version_arg: &str) -> bool {
    Command::new(program)
        .arg(version_arg)
        .output()
        .map(|o| o.status.success())
        .unwrap_or(false)
}

/// Run a command and return its stdout, failing on a non-zero exit.
fn run_command(program: &str, args: &[&str]) -> Result<String> {
    let command = format!("{} {}", program, args.join(" "));

    let output = Command::new(program)
        .args(args)
        .output()
        .map_err(|e| Error::CommandFailed {
            command: command.clone(),
            reason: e.to_string(),
        })?;

    if !output.status.success() {
        return Err(Error::CommandFailed {
            command,
            reason: format!(
                "exit status {}: {}",
                output.status,
                String::from_utf8_lossy(&output.stderr).trim()
            ),
        });
    }

    Ok(String::from_utf8_lossy(&output.stdout).to_string())
}

/// Extract IPv4 addresses from whitespace separated text.
fn parse_ipv4_list(output: &str) -> Vec<String> {
    output
        .split_whitespace()
        .filter(|token| token.parse::<Ipv4Addr>().is_ok())
        .map(str::to_string)
        .collect()
}

/// Keep the socket listing lines whose local address ends in `:port`.
fn filter_socket_lines(output: &str, port: u16) -> String {
    let suffix = format!(":{}", port);

    output
        .lines()
        .filter(|line| line.split_whitespace().any(|col| col.ends_with(&suffix)))
        .map(str::trim_end)
        .collect::<Vec<_>>()
        .join("\n")
}
