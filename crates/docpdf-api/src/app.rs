//! Application wiring: configuration in, running server out.

use std::future::IntoFuture;
use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use tokio::sync::watch;
use tower_http::trace::TraceLayer;

use docpdf_converter::{DocumentConverter, ProcessConverter};
use docpdf_core::config::AppConfig;
use docpdf_core::error::AppError;
use docpdf_service::{ConversionService, DownloadService, StagingArea, UploadValidator};
use docpdf_worker::{OrphanReaper, ReaperScheduler};

use crate::middleware::compression::build_compression_layer;
use crate::middleware::cors::build_cors_layer;
use crate::router::build_router;
use crate::state::AppState;

/// Builds the application state around a converter.
pub fn build_state(config: AppConfig, converter: Arc<dyn DocumentConverter>) -> AppState {
    let staging = Arc::new(StagingArea::from_config(&config.staging));
    let validator = UploadValidator::new(config.staging.allowed_extensions.as_slice());

    AppState {
        conversion_service: Arc::new(ConversionService::new(
            Arc::clone(&staging),
            validator,
            converter,
        )),
        download_service: Arc::new(DownloadService::new(staging)),
        config: Arc::new(config),
    }
}

/// Builds the complete Axum application with all routes and middleware.
pub fn build_app(state: AppState) -> Router {
    let cors = build_cors_layer(&state.config.server.cors);

    build_router(state)
        .layer(build_compression_layer())
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}

/// Runs the DocPdf server until Ctrl+C (or SIGTERM on Unix).
pub async fn run_server(config: AppConfig) -> Result<(), AppError> {
    tracing::info!("Starting DocPdf server...");

    // ── Step 1: Staging directories ──────────────────────────────
    let staging = StagingArea::from_config(&config.staging);
    staging.ensure_directories().await?;
    tracing::info!(
        upload_dir = %staging.upload_dir().display(),
        output_dir = %staging.output_dir().display(),
        "Staging directories ready"
    );

    // ── Step 2: Orphan reaper ────────────────────────────────────
    let mut scheduler = if config.reaper.enabled {
        let reaper = Arc::new(OrphanReaper::from_config(&config.staging, &config.reaper));
        let scheduler = ReaperScheduler::new(reaper).await?;
        scheduler.register(&config.reaper.schedule).await?;
        scheduler.start().await?;
        Some(scheduler)
    } else {
        tracing::info!("Orphan reaper disabled");
        None
    };

    // ── Step 3: Converter and HTTP server ────────────────────────
    let converter = ProcessConverter::new(&config.converter);
    tracing::info!(
        command = %converter.command(),
        timeout_seconds = config.converter.timeout_seconds,
        "Converter configured"
    );

    let addr = config.server.bind_address();
    let grace = Duration::from_secs(config.server.shutdown_grace_seconds);
    let app = build_app(build_state(config, Arc::new(converter)));

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| AppError::internal(format!("Failed to bind {addr}: {e}")))?;

    tracing::info!("DocPdf server listening on {}", addr);

    let (shutdown_tx, mut shutdown_rx) = watch::channel(false);
    let server = axum::serve(listener, app)
        .with_graceful_shutdown(async move {
            shutdown_signal().await;
            let _ = shutdown_tx.send(true);
        })
        .into_future();

    // In-flight conversions get `grace` to finish once shutdown starts;
    // after that they are dropped, which kills their converter processes.
    let grace_elapsed = async move {
        let _ = shutdown_rx.wait_for(|stopping| *stopping).await;
        tokio::time::sleep(grace).await;
    };

    tokio::select! {
        result = server => {
            result.map_err(|e| AppError::internal(format!("Server error: {e}")))?;
        }
        () = grace_elapsed => {
            tracing::warn!(
                grace_seconds = grace.as_secs(),
                "Shutdown grace period elapsed, abandoning in-flight requests"
            );
        }
    }

    if let Some(scheduler) = scheduler.as_mut() {
        scheduler.shutdown().await?;
    }

    tracing::info!("DocPdf server stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}
