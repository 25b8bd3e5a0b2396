//! Removal of orphaned staging files.

use std::path::{Path, PathBuf};

use chrono::{DateTime, TimeDelta, Utc};
use serde::Serialize;

use docpdf_core::config::{ReaperConfig, StagingConfig};

/// Totals from one sweep.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ReapReport {
    /// Files examined.
    pub scanned: u64,
    /// Files deleted.
    pub removed: u64,
    /// Files that were old enough but could not be deleted.
    pub failed: u64,
    /// Bytes released by deleted files.
    pub bytes_freed: u64,
}

impl ReapReport {
    fn merge(&mut self, other: ReapReport) {
        self.scanned += other.scanned;
        self.removed += other.removed;
        self.failed += other.failed;
        self.bytes_freed += other.bytes_freed;
    }
}

/// Deletes files in the staging directories whose last modification is
/// older than `max_age`.
///
/// Outputs are normally removed by their download; whatever is still
/// around after `max_age` was never fetched (or belongs to a crashed
/// request) and is swept here. Subdirectories are left alone.
#[derive(Debug, Clone)]
pub struct OrphanReaper {
    dirs: Vec<PathBuf>,
    max_age: TimeDelta,
}

impl OrphanReaper {
    /// Create a reaper over `dirs`.
    pub fn new(dirs: Vec<PathBuf>, max_age_minutes: u64) -> Self {
        let max_age = i64::try_from(max_age_minutes)
            .ok()
            .and_then(TimeDelta::try_minutes)
            .unwrap_or(TimeDelta::MAX);
        Self { dirs, max_age }
    }

    /// Create a reaper over the configured upload and output directories.
    pub fn from_config(staging: &StagingConfig, reaper: &ReaperConfig) -> Self {
        Self::new(
            vec![
                PathBuf::from(&staging.upload_dir),
                PathBuf::from(&staging.output_dir),
            ],
            reaper.max_age_minutes,
        )
    }

    /// Directories swept.
    pub fn dirs(&self) -> &[PathBuf] {
        &self.dirs
    }

    /// Sweep all directories now.
    pub async fn sweep(&self) -> ReapReport {
        self.sweep_at(Utc::now()).await
    }

    /// Sweep all directories as if the current time were `now`.
    pub async fn sweep_at(&self, now: DateTime<Utc>) -> ReapReport {
        let Some(cutoff) = now.checked_sub_signed(self.max_age) else {
            return ReapReport::default();
        };

        let mut report = ReapReport::default();
        for dir in &self.dirs {
            report.merge(sweep_dir(dir, cutoff).await);
        }

        if report.removed > 0 || report.failed > 0 {
            tracing::info!(
                scanned = report.scanned,
                removed = report.removed,
                failed = report.failed,
                bytes_freed = report.bytes_freed,
                "Reaped orphaned staging files"
            );
        } else {
            tracing::debug!(scanned = report.scanned, "Reaper found nothing to remove");
        }

        report
    }
}

async fn sweep_dir(dir: &Path, cutoff: DateTime<Utc>) -> ReapReport {
    let mut report = ReapReport::default();

    let mut entries = match tokio::fs::read_dir(dir).await {
        Ok(entries) => entries,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return report,
        Err(e) => {
            tracing::warn!(dir = %dir.display(), error = %e, "Failed to read staging dir");
            return report;
        }
    };

    while let Ok(Some(entry)) = entries.next_entry().await {
        let Ok(metadata) = entry.metadata().await else {
            continue;
        };
        if !metadata.is_file() {
            continue;
        }
        report.scanned += 1;

        let Ok(modified) = metadata.modified() else {
            continue;
        };
        let modified: DateTime<Utc> = modified.into();
        if modified >= cutoff {
            continue;
        }

        let path = entry.path();
        match tokio::fs::remove_file(&path).await {
            Ok(()) => {
                tracing::debug!(path = %path.display(), "Removed orphaned staging file");
                report.removed += 1;
                report.bytes_freed += metadata.len();
            }
            // Claimed by a download between listing and removal.
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "Failed to remove staging file");
                report.failed += 1;
            }
        }
    }

    report
}
