//! HTTP serving layer for the fare inference pipeline
//!
//! Endpoints:
//! - `GET /` liveness message
//! - `GET /health` status, artifact hashes, uptime
//! - `GET /dropdown-options` vocabulary projection for clients
//! - `POST /predict` one prediction per request

pub mod config;
pub mod server;

pub use config::ServerConfig;
pub use server::{start_server, AppState};
