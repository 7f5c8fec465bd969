//! Core monitoring logic.

pub mod diagnostics;
pub mod monitor;
pub mod probe;
pub mod resolver;
pub mod retry;
pub mod status;
