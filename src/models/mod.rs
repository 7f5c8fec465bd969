//! Data models.

pub mod config;
pub mod network;
pub mod status;
