//! Orphaned staging file reaper configuration.

use serde::{Deserialize, Serialize};
use validator::Validate;

/// Periodic removal of outputs that were converted but never downloaded.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ReaperConfig {
    /// Whether the scheduled sweep runs.
    #[serde(default = "default_enabled")]
    pub enabled: bool,
    /// Six-field cron expression (seconds first).
    #[serde(default = "default_schedule")]
    #[validate(length(min = 1))]
    pub schedule: String,
    /// Files older than this are removed.
    #[serde(default = "default_max_age_minutes")]
    #[validate(range(min = 1))]
    pub max_age_minutes: u64,
}

impl Default for ReaperConfig {
    fn default() -> Self {
        Self {
            enabled: default_enabled(),
            schedule: default_schedule(),
            max_age_minutes: default_max_age_minutes(),
        }
    }
}

fn default_enabled() -> bool {
    true
}

fn default_schedule() -> String {
    "0 */10 * * * *".to_string()
}

fn default_max_age_minutes() -> u64 {
    60
}
