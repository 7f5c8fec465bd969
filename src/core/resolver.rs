//! Host specifier resolution.
//!
//! Turns an `OLLAMA_HOST`-style specifier into the daemon's API base URL.
//! A specifier containing `://` is a complete origin and is kept verbatim;
//! anything else is a bare host that gets the `http` scheme and the default
//! port. Resolution is pure string handling and never touches the network.

use crate::{Error, Result};
use std::net::{Ipv4Addr, Ipv6Addr};
use url::{Host, Url};

/// Port the daemon listens on by default.
pub const DEFAULT_PORT: u16 = 11434;

/// Listen address used when `OLLAMA_HOST` is unset.
pub const DEFAULT_LISTEN_HOST: &str = "0.0.0.0";

/// Path of the REST API below the origin.
const API_PATH: &str = "/api";

/// A resolved daemon endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedEndpoint {
    /// Scheme, host and port, e.g. `http://localhost:11434`.
    pub origin: String,
    /// API root, e.g. `http://localhost:11434/api`.
    pub api_base_url: String,
}

impl ResolvedEndpoint {
    fn from_origin(origin: String) -> Self {
        let api_base_url = format!("{}{}", origin.trim_end_matches('/'), API_PATH);
        Self {
            origin,
            api_base_url,
        }
    }
}

/// Resolve a host specifier, falling back to `default` when it is empty.
pub fn resolve(specifier: &str, default: &str) -> Result<ResolvedEndpoint> {
    let trimmed = specifier.trim();
    let raw = if trimmed.is_empty() {
        default.trim()
    } else {
        trimmed
    };

    resolve_host_port(raw, DEFAULT_PORT)
}

/// Resolve a host specifier, combining bare hosts with `port`.
pub fn resolve_host_port(host: &str, port: u16) -> Result<ResolvedEndpoint> {
    let host = host.trim();
    if host.is_empty() {
        return Err(Error::config("empty host specifier"));
    }

    if host.contains("://") {
        let url = Url::parse(host).map_err(|e| Error::config(format!("'{}': {}", host, e)))?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(Error::config(format!(
                "'{}': unsupported scheme '{}'",
                host,
                url.scheme()
            )));
        }
        if url.host_str().is_none() {
            return Err(Error::config(format!("'{}': missing host", host)));
        }
        return Ok(ResolvedEndpoint::from_origin(host.to_string()));
    }

    if host.contains('/') {
        return Err(Error::config(format!("'{}': bare host must not contain a path", host)));
    }

    // IPv6 literals need brackets before a port can follow
    let host_part = if host.parse::<Ipv6Addr>().is_ok() {
        format!("[{}]", host)
    } else {
        host.to_string()
    };
    let origin = format!("http://{}:{}", host_part, port);

    Url::parse(&origin).map_err(|e| {
        if host.contains(':') {
            // Bare hosts always get the default port; a custom port needs a full origin
            Error::config(format!(
                "'{}': {}; to set a port write a full origin such as http://{}",
                host, e, host
            ))
        } else {
            Error::config(format!("'{}': {}", host, e))
        }
    })?;

    Ok(ResolvedEndpoint::from_origin(origin))
}

/// Map a listen endpoint to an address an outbound client can connect to.
///
/// The unspecified addresses `0.0.0.0` and `::` mean "all interfaces" to a
/// server but are not valid connect targets, so they become loopback.
pub fn probe_target(endpoint: &ResolvedEndpoint) -> Result<ResolvedEndpoint> {
    let mut url = Url::parse(&endpoint.origin)
        .map_err(|e| Error::config(format!("'{}': {}", endpoint.origin, e)))?;

    let loopback = match url.host() {
        Some(Host::Ipv4(ip)) if ip.is_unspecified() => Ipv4Addr::LOCALHOST.to_string(),
        Some(Host::Ipv6(ip)) if ip.is_unspecified() => format!("[{}]", Ipv6Addr::LOCALHOST),
        _ => return Ok(endpoint.clone()),
    };

    url.set_host(Some(&loopback))
        .map_err(|e| Error::config(format!("'{}': {}", endpoint.origin, e)))?;

    let origin = url.as_str().trim_end_matches('/').to_string();
    tracing::debug!("Probing {} instead of listen address {}", origin, endpoint.origin);

    Ok(ResolvedEndpoint::from_origin(origin))
}
