//! Application configuration schemas.
//!
//! All configuration structs are deserialized from TOML files via the
//! `config` crate. Each sub-module represents a logical configuration
//! section, and every field carries a default so that an empty file (or
//! no file at all) yields a runnable configuration.

pub mod app;
pub mod converter;
pub mod logging;
pub mod reaper;
pub mod staging;

use std::path::Path;

use serde::{Deserialize, Serialize};
use validator::Validate;

pub use self::app::{CorsConfig, ServerConfig};
pub use self::converter::ConverterConfig;
pub use self::logging::{LogFormat, LoggingConfig};
pub use self::reaper::ReaperConfig;
pub use self::staging::StagingConfig;

use crate::error::AppError;

/// Prefix for environment variable overrides (`DOCPDF_SERVER__PORT=9000`).
pub const ENV_PREFIX: &str = "DOCPDF";

/// Root application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct AppConfig {
    /// HTTP server settings.
    #[validate(nested)]
    pub server: ServerConfig,
    /// Upload/output staging directories and upload limits.
    #[validate(nested)]
    pub staging: StagingConfig,
    /// External converter invocation.
    #[validate(nested)]
    pub converter: ConverterConfig,
    /// Orphaned output reaper.
    #[validate(nested)]
    pub reaper: ReaperConfig,
    /// Logging settings.
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration for an environment.
    ///
    /// Merges `config/default.toml`, `config/{env}.toml` and environment
    /// variables prefixed with `DOCPDF_`. Missing files are skipped.
    pub fn load(env: &str) -> Result<Self, AppError> {
        let builder = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{env}")).required(false));

        Self::finish(builder)
    }

    /// Load configuration from an explicit file, then apply environment overrides.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, AppError> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(AppError::configuration(format!(
                "Configuration file not found: {}",
                path.display()
            )));
        }

        let builder = config::Config::builder().add_source(config::File::from(path));
        Self::finish(builder)
    }

    fn finish(
        builder: config::ConfigBuilder<config::builder::DefaultState>,
    ) -> Result<Self, AppError> {
        let config: Self = builder
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .map_err(|e| AppError::configuration(format!("Failed to build config: {e}")))?
            .try_deserialize()
            .map_err(|e| AppError::configuration(format!("Failed to deserialize config: {e}")))?;

        config.validate()?;
        config.check_reaper_outlives_conversion()?;
        Ok(config)
    }

    /// Reaper age threshold must exceed the converter timeout, otherwise a
    /// running conversion can lose its staged input. Skipped when disabled.
    pub fn check_reaper_outlives_conversion(&self) -> Result<(), AppError> {
        let max_age_seconds = self.reaper.max_age_minutes.saturating_mul(60);
        if self.reaper.enabled && max_age_seconds <= self.converter.timeout_seconds {
            return Err(AppError::configuration(format!(
                "reaper.max_age_minutes ({}) must exceed converter.timeout_seconds ({}s)",
                self.reaper.max_age_minutes, self.converter.timeout_seconds
            )));
        }
        Ok(())
    }
}
