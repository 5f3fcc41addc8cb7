//! Configuration management

use serde::{Deserialize, Serialize};

/// Application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub backend: BackendConfig,
    pub session: SessionConfig,
}

/// Backend REST API configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BackendConfig {
    /// Base URL of the CoreShift backend, without a trailing slash.
    pub base_url: String,
    /// Per-request timeout in seconds.
    pub timeout_seconds: u64,
}

/// Durable session storage configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Directory holding the persisted token and user entries.
    pub storage_dir: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            backend: BackendConfig {
                base_url: "http://127.0.0.1:8000".to_string(),
                timeout_seconds: 30,
            },
            session: SessionConfig { storage_dir: ".coreshift".to_string() },
        }
    }
}
