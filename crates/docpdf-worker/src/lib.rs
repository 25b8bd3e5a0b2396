//! # docpdf-worker
//!
//! Background maintenance for the staging directories. Outputs that are
//! converted but never downloaded would otherwise accumulate forever;
//! [`OrphanReaper`] removes staged files older than a configured age and
//! [`ReaperScheduler`] runs it on a cron schedule.

pub mod reaper;
pub mod scheduler;

pub use reaper::{OrphanReaper, ReapReport};
pub use scheduler::ReaperScheduler;
