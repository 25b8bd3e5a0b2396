//! HTTP listener and cross-origin settings.

use serde::{Deserialize, Serialize};
use validator::Validate;

/// Where and how the conversion API listens.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    #[validate(range(min = 1))]
    pub port: u16,
    /// Upper bound on in-flight requests draining after a shutdown signal.
    #[validate(range(max = 3600))]
    pub shutdown_grace_seconds: u64,
    #[validate(nested)]
    pub cors: CorsConfig,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 5000,
            shutdown_grace_seconds: 30,
            cors: CorsConfig::default(),
        }
    }
}

impl ServerConfig {
    /// `host:port` for the TCP listener.
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Cross-origin policy for browser clients posting uploads.
///
/// A single `"*"` entry in `allowed_origins` or `allowed_headers` allows any.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct CorsConfig {
    #[validate(length(min = 1))]
    pub allowed_origins: Vec<String>,
    pub allowed_methods: Vec<String>,
    pub allowed_headers: Vec<String>,
    /// Preflight cache lifetime.
    pub max_age_seconds: u64,
}

impl Default for CorsConfig {
    fn default() -> Self {
        let owned = |items: &[&str]| items.iter().map(|s| s.to_string()).collect();
        Self {
            allowed_origins: owned(&["*"]),
            allowed_methods: owned(&["GET", "POST", "OPTIONS"]),
            allowed_headers: owned(&["*"]),
            max_age_seconds: 3600,
        }
    }
}
