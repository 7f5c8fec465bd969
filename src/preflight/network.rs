//! Network tools preflight check.

use super::CheckResult;
use crate::services::network;

/// Check which socket listing tool is installed.
///
/// Diagnostics degrade without these tools, so this check never fails.
pub fn check_tools() -> CheckResult {
    if network::is_installed("ss", "-V") {
        CheckResult::pass("Network tools", "ss available")
    } else if network::is_installed("netstat", "--version") {
        CheckResult::pass("Network tools", "netstat available")
    } else {
        CheckResult::pass(
            "Network tools",
            "ss/netstat not found, socket diagnostics limited",
        )
    }
}
