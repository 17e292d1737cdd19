#![allow(clippy::must_use_candidate)]

pub mod client;
mod env;
mod loader;
pub mod storage;
pub mod telemetry;

use serde::Deserialize;

pub use client::*;
pub use storage::*;
pub use telemetry::*;

/// Top-level SECP client configuration
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// API endpoint and UI paths
    pub client: ClientConfig,
    /// Credential storage
    #[serde(default)]
    pub storage: StorageConfig,
    /// Logging
    #[serde(default)]
    pub telemetry: TelemetryConfig,
}
