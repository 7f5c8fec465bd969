//! Network diagnostics.
//!
//! Collects hostname, bound addresses and listening sockets through a
//! [`NetworkInspector`]. Every sub-step degrades to placeholder text on
//! failure; `gather` always returns a populated [`NetworkInfo`].

use crate::models::network::NetworkInfo;
use crate::services::network::NetworkInspector;
use tracing::{debug, warn};

/// Hostname placeholder when it cannot be determined.
pub const UNKNOWN_HOSTNAME: &str = "unknown";

/// Address placeholder when no address can be determined.
pub const UNAVAILABLE_ADDRESS: &str = "unavailable";

const LOOPBACK_PREFIX: &str = "127.";

/// Gather network information relevant to a daemon listening on `port`.
pub fn gather(inspector: &dyn NetworkInspector, port: u16) -> NetworkInfo {
    let mut problems: Vec<String> = Vec::new();

    let hostname = match inspector.hostname() {
        Ok(name) => Some(name),
        Err(e) => {
            problems.push(format!("hostname: {}", e));
            None
        }
    };

    let ip_addresses = match inspector.enumerate_addresses() {
        Ok(addresses) if !addresses.is_empty() => addresses,
        first => {
            if let Err(e) = first {
                problems.push(format!("address enumeration: {}", e));
            }
            resolve_fallback(inspector, hostname.as_deref(), &mut problems)
        }
    };

    let listening_sockets = match inspector.listening_sockets(port) {
        Ok(lines) if lines.trim().is_empty() => {
            format!("no sockets listening on port {}", port)
        }
        Ok(lines) => lines,
        Err(e) => {
            problems.push(format!("socket listing: {}", e));
            format!("could not list sockets: {}", e)
        }
    };

    let error = if problems.is_empty() {
        None
    } else {
        warn!("Network diagnostics incomplete: {}", problems.join("; "));
        Some(problems.join("; "))
    };

    NetworkInfo {
        hostname: hostname.unwrap_or_else(|| UNKNOWN_HOSTNAME.to_string()),
        ip_addresses,
        listening_sockets,
        error,
    }
}

/// Resolve the hostname when interface enumeration gave nothing.
fn resolve_fallback(
    inspector: &dyn NetworkInspector,
    hostname: Option<&str>,
    problems: &mut Vec<String>,
) -> Vec<String> {
    let Some(hostname) = hostname else {
        return vec![UNAVAILABLE_ADDRESS.to_string()];
    };

    debug!("Falling back to resolving hostname {}", hostname);
    match inspector.resolve_hostname(hostname) {
        Ok(addresses) if !addresses.is_empty() => addresses,
        Ok(_) => {
            problems.push(format!("hostname resolution: {} has no address", hostname));
            vec![UNAVAILABLE_ADDRESS.to_string()]
        }
        Err(e) => {
            problems.push(format!("hostname resolution: {}", e));
            vec![UNAVAILABLE_ADDRESS.to_string()]
        }
    }
}

/// Pick the first address that is not a loopback address.
pub fn derive_external_ip(info: &NetworkInfo) -> Option<&str> {
    info.ip_addresses
        .iter()
        .map(String::as_str)
        .find(|ip| !ip.starts_with(LOOPBACK_PREFIX) && *ip != UNAVAILABLE_ADDRESS)
}
