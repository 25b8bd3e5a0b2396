//! Application state shared across all handlers and middleware.

use std::sync::Arc;

use docpdf_core::config::AppConfig;
use docpdf_service::{ConversionService, DownloadService};

/// Shared dependencies, passed to every handler via `State<AppState>`.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Application configuration
    pub config: Arc<AppConfig>,
    /// Validates, stages and converts uploads
    pub conversion_service: Arc<ConversionService>,
    /// Serves converted PDFs once
    pub download_service: Arc<DownloadService>,
}
