//! Network diagnostics model.

use serde::Serialize;

/// Best-effort snapshot of the local network setup.
///
/// Fields that could not be determined hold placeholder text; the
/// collected sub-step failures are joined into `error`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct NetworkInfo {
    pub hostname: String,
    pub ip_addresses: Vec<String>,
    /// Raw socket listing text.
    pub listening_sockets: String,
    pub error: Option<String>,
}
