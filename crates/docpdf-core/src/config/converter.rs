//! External converter invocation settings.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use validator::Validate;

/// How the external Word-to-PDF executable is launched.
///
/// The final command line is `command args_prefix... --input <in>
/// --output <out> --page-size <v> --orientation <v> [--preserve-formatting]
/// [--optimize]`.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ConverterConfig {
    /// Executable to launch.
    #[serde(default = "default_command")]
    #[validate(length(min = 1))]
    pub command: String,
    /// Arguments placed before the conversion arguments.
    #[serde(default)]
    pub args_prefix: Vec<String>,
    /// Working directory for the child process.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub working_dir: Option<String>,
    /// Extra environment variables for the child process.
    #[serde(default)]
    pub env: HashMap<String, String>,
    /// Upper bound on a single converter run; the child is killed afterwards.
    #[serde(default = "default_timeout_seconds")]
    #[validate(range(min = 1, max = 86400))]
    pub timeout_seconds: u64,
}

impl Default for ConverterConfig {
    fn default() -> Self {
        Self {
            command: default_command(),
            args_prefix: Vec::new(),
            working_dir: None,
            env: HashMap::new(),
            timeout_seconds: default_timeout_seconds(),
        }
    }
}

fn default_command() -> String {
    "WordToPdfConverter/WordToPdfConverter.exe".to_string()
}

fn default_timeout_seconds() -> u64 {
    300
}
