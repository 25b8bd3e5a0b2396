//! DocPdf server: Word to PDF conversion over HTTP.
//!
//! Loads configuration, installs logging and hands over to
//! [`docpdf_api::run_server`].

use tracing_subscriber::{EnvFilter, fmt};

use docpdf_core::config::{AppConfig, LogFormat};
use docpdf_core::error::AppError;

#[tokio::main]
async fn main() {
    let config = match load_configuration() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load configuration: {}", e.message);
            std::process::exit(1);
        }
    };

    init_logging(&config);

    tracing::info!("Starting DocPdf v{}", env!("CARGO_PKG_VERSION"));

    if let Err(e) = docpdf_api::run_server(config).await {
        tracing::error!(kind = %e.kind, "Server error: {}", e.message);
        std::process::exit(1);
    }
}

/// Load configuration from `DOCPDF_CONFIG` if set, otherwise from the
/// layered `config/` directory for `DOCPDF_ENV`.
fn load_configuration() -> Result<AppConfig, AppError> {
    match std::env::var("DOCPDF_CONFIG") {
        Ok(path) => AppConfig::from_file(path),
        Err(_) => {
            let env = std::env::var("DOCPDF_ENV").unwrap_or_else(|_| "development".to_string());
            AppConfig::load(&env)
        }
    }
}

/// Install the global subscriber. `RUST_LOG` overrides the configured level.
fn init_logging(config: &AppConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.logging.level));

    match config.logging.format {
        LogFormat::Json => {
            fmt()
                .json()
                .with_env_filter(filter)
                .with_target(true)
                .with_thread_ids(true)
                .init();
        }
        LogFormat::Pretty => {
            fmt()
                .pretty()
                .with_env_filter(filter)
                .with_target(true)
                .init();
        }
    }
}
