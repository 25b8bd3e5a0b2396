//! Configuration management CLI commands.

use clap::{Args, Subcommand};

use docpdf_core::error::AppError;

use crate::output::{self, OutputFormat};

/// Default configuration shipped with the repository.
const DEFAULT_CONFIG: &str = include_str!("../../../../config/default.toml");

/// Arguments for config commands
#[derive(Debug, Args)]
pub struct ConfigArgs {
    /// Config subcommand
    #[command(subcommand)]
    pub command: ConfigCommand,
}

/// Config subcommands
#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Show the effective configuration
    Show,
    /// Validate the configuration
    Validate,
    /// Write the default configuration file
    Generate {
        /// Output file path
        #[arg(short, long, default_value = "config/generated.toml")]
        output: String,
    },
}

/// Execute config commands
pub async fn execute(
    args: &ConfigArgs,
    config_path: Option<&str>,
    format: OutputFormat,
) -> Result<(), AppError> {
    match &args.command {
        ConfigCommand::Show => {
            let config = super::load_config(config_path)?;
            output::print_document(&config, format);
        }
        ConfigCommand::Validate => {
            let config = super::load_config(config_path)?;
            output::print_success(&format!(
                "Configuration '{}' is valid",
                config_path.unwrap_or("config/")
            ));
            output::print_kv("Server", &config.server.bind_address());
            output::print_kv("Upload dir", &config.staging.upload_dir);
            output::print_kv("Output dir", &config.staging.output_dir);
            output::print_kv("Converter", &config.converter.command);
            output::print_kv(
                "Converter timeout",
                &format!("{}s", config.converter.timeout_seconds),
            );
            output::print_kv(
                "Reaper",
                &if config.reaper.enabled {
                    format!(
                        "{} (max age {}min)",
                        config.reaper.schedule, config.reaper.max_age_minutes
                    )
                } else {
                    "disabled".to_string()
                },
            );
        }
        ConfigCommand::Generate { output: out_path } => {
            if let Some(parent) = std::path::Path::new(out_path)
                .parent()
                .filter(|p| !p.as_os_str().is_empty())
            {
                tokio::fs::create_dir_all(parent)
                    .await
                    .map_err(|e| AppError::storage(format!("Failed to create dir: {e}")))?;
            }

            tokio::fs::write(out_path, DEFAULT_CONFIG)
                .await
                .map_err(|e| AppError::storage(format!("Failed to write config: {e}")))?;

            output::print_success(&format!("Default config written to '{out_path}'"));
        }
    }

    Ok(())
}
