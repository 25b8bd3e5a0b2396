//! Staging directory configuration.

use serde::{Deserialize, Serialize};
use validator::Validate;

/// Where uploads and converter outputs live between requests.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct StagingConfig {
    /// Directory receiving staged uploads.
    #[serde(default = "default_upload_dir")]
    #[validate(length(min = 1))]
    pub upload_dir: String,
    /// Directory receiving converter outputs awaiting download.
    #[serde(default = "default_output_dir")]
    #[validate(length(min = 1))]
    pub output_dir: String,
    /// Accepted upload extensions, compared case-insensitively.
    #[serde(default = "default_allowed_extensions")]
    #[validate(length(min = 1))]
    pub allowed_extensions: Vec<String>,
    /// Maximum request body size in bytes (default 50 MB).
    #[serde(default = "default_max_upload")]
    #[validate(range(min = 1))]
    pub max_upload_size_bytes: u64,
}

impl Default for StagingConfig {
    fn default() -> Self {
        Self {
            upload_dir: default_upload_dir(),
            output_dir: default_output_dir(),
            allowed_extensions: default_allowed_extensions(),
            max_upload_size_bytes: default_max_upload(),
        }
    }
}

fn default_upload_dir() -> String {
    "uploads".to_string()
}

fn default_output_dir() -> String {
    "output".to_string()
}

fn default_allowed_extensions() -> Vec<String> {
    vec!["doc".to_string(), "docx".to_string()]
}

fn default_max_upload() -> u64 {
    52_428_800 // 50 MB
}
