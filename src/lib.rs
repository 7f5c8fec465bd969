//! Ollama Sentinel Library
//!
//! Monitors a local Ollama daemon: checks that it is reachable, that the
//! expected model is installed and that the model answers a test prompt.

pub mod cli;
pub mod core;
pub mod error;
pub mod models;
pub mod preflight;
pub mod services;

pub use error::{Error, Result};
