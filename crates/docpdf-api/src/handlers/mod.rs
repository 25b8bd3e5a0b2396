//! Route handlers.

pub mod convert;
pub mod download;
pub mod health;
