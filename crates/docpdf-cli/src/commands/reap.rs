//! Manual orphan sweep.

use serde::Serialize;
use tabled::Tabled;

use docpdf_core::error::AppError;
use docpdf_worker::{OrphanReaper, ReapReport};

use crate::output::{self, OutputFormat};

#[derive(Debug, Serialize, Tabled)]
struct ReapRow {
    directories: String,
    max_age_minutes: u64,
    scanned: u64,
    removed: u64,
    failed: u64,
    bytes_freed: u64,
}

impl ReapRow {
    fn new(reaper: &OrphanReaper, max_age_minutes: u64, report: ReapReport) -> Self {
        Self {
            directories: reaper
                .dirs()
                .iter()
                .map(|d| d.display().to_string())
                .collect::<Vec<_>>()
                .join(", "),
            max_age_minutes,
            scanned: report.scanned,
            removed: report.removed,
            failed: report.failed,
            bytes_freed: report.bytes_freed,
        }
    }
}

/// Execute `reap`
pub async fn execute(config_path: Option<&str>, format: OutputFormat) -> Result<(), AppError> {
    let config = super::load_config(config_path)?;

    let reaper = OrphanReaper::from_config(&config.staging, &config.reaper);
    let report = reaper.sweep().await;

    output::print_list(
        &[ReapRow::new(&reaper, config.reaper.max_age_minutes, report)],
        format,
    );

    if report.failed > 0 {
        return Err(AppError::storage(format!(
            "{} staging file(s) could not be removed",
            report.failed
        )));
    }

    Ok(())
}
