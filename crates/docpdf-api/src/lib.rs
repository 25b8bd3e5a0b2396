//! # docpdf-api
//!
//! HTTP API layer for DocPdf built on Axum.
//!
//! Provides the convert, download and health endpoints, the middleware
//! stack (CORS, compression, request logging), DTOs and the mapping from
//! [`docpdf_core::AppError`] to `{"error": ...}` responses.

pub mod app;
pub mod dto;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod state;

pub use app::{build_app, run_server};
pub use state::AppState;
