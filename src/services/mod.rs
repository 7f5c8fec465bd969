//! External service clients.

pub mod network;
pub mod ollama;
