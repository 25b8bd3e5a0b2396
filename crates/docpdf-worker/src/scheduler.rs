//! Cron scheduler for the orphan reaper.

use std::sync::Arc;

use tokio_cron_scheduler::{Job as CronJob, JobScheduler};

use docpdf_core::error::AppError;

use crate::reaper::OrphanReaper;

/// Runs [`OrphanReaper::sweep`] on a cron schedule.
pub struct ReaperScheduler {
    /// The underlying job scheduler
    scheduler: JobScheduler,
    /// Reaper shared with every scheduled run
    reaper: Arc<OrphanReaper>,
}

impl std::fmt::Debug for ReaperScheduler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ReaperScheduler")
            .field("reaper", &self.reaper)
            .finish()
    }
}

impl ReaperScheduler {
    /// Create a new scheduler around a reaper
    pub async fn new(reaper: Arc<OrphanReaper>) -> Result<Self, AppError> {
        let scheduler = JobScheduler::new()
            .await
            .map_err(|e| AppError::internal(format!("Failed to create scheduler: {e}")))?;

        Ok(Self { scheduler, reaper })
    }

    /// Register the sweep under a six-field cron expression
    pub async fn register(&self, schedule: &str) -> Result<(), AppError> {
        let reaper = Arc::clone(&self.reaper);
        let job = CronJob::new_async(schedule, move |_uuid, _lock| {
            let reaper = Arc::clone(&reaper);
            Box::pin(async move {
                tracing::debug!("Running scheduled orphan sweep");
                reaper.sweep().await;
            })
        })
        .map_err(|e| {
            AppError::configuration(format!("Invalid reaper schedule '{schedule}': {e}"))
        })?;

        self.scheduler
            .add(job)
            .await
            .map_err(|e| AppError::internal(format!("Failed to add reaper schedule: {e}")))?;

        tracing::info!(schedule = %schedule, "Registered: orphan reaper");
        Ok(())
    }

    /// Start the scheduler
    pub async fn start(&self) -> Result<(), AppError> {
        self.scheduler
            .start()
            .await
            .map_err(|e| AppError::internal(format!("Failed to start scheduler: {e}")))?;

        tracing::info!("Cron scheduler started");
        Ok(())
    }

    /// Shutdown the scheduler
    pub async fn shutdown(&mut self) -> Result<(), AppError> {
        self.scheduler
            .shutdown()
            .await
            .map_err(|e| AppError::internal(format!("Failed to shutdown scheduler: {e}")))?;

        tracing::info!("Cron scheduler shut down");
        Ok(())
    }
}
