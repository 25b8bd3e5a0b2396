//! CLI command definitions and dispatch.

pub mod config;
pub mod convert;
pub mod reap;

use clap::{Parser, Subcommand};

use docpdf_core::config::AppConfig;
use docpdf_core::error::AppError;

use crate::output::OutputFormat;

/// DocPdf: Word to PDF conversion service
#[derive(Debug, Parser)]
#[command(name = "docpdf", version, about, long_about = None)]
pub struct Cli {
    /// Path to a configuration file (default: layered `config/` + environment)
    #[arg(short, long, global = true)]
    pub config: Option<String>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "table", global = true)]
    pub format: OutputFormat,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level commands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Convert a local document through the configured converter
    Convert(convert::ConvertArgs),
    /// Remove orphaned staging files once
    Reap,
    /// Configuration management
    Config(config::ConfigArgs),
}

impl Cli {
    /// Execute the CLI command
    pub async fn execute(&self) -> Result<(), AppError> {
        match &self.command {
            Commands::Convert(args) => {
                convert::execute(args, self.config.as_deref(), self.format).await
            }
            Commands::Reap => reap::execute(self.config.as_deref(), self.format).await,
            Commands::Config(args) => {
                config::execute(args, self.config.as_deref(), self.format).await
            }
        }
    }
}

/// Load configuration from an explicit file, or from the layered
/// defaults for `DOCPDF_ENV` when no file is given.
pub fn load_config(config_path: Option<&str>) -> Result<AppConfig, AppError> {
    match config_path {
        Some(path) => AppConfig::from_file(path),
        None => {
            let env = std::env::var("DOCPDF_ENV").unwrap_or_else(|_| "development".to_string());
            AppConfig::load(&env)
        }
    }
}
