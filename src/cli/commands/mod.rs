//! CLI command implementations.

pub mod diagnose;
pub mod monitor;
pub mod setup;
pub mod status;
