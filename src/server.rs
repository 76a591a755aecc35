//! HTTP server initialization and runtime setup.
//!
//! Builds the moderation components from configuration and runs the Axum
//! server until Ctrl+C.

use crate::application::services::UploadValidator;
use crate::config::Config;
use crate::domain::censor::CensorEngine;
use crate::routes::app_router;
use crate::state::AppState;

use anyhow::{Context, Result};
use axum::ServiceExt;
use axum::extract::Request;
use std::net::SocketAddr;

/// Builds the shared state from configuration.
///
/// # Errors
///
/// Returns an error if the upload folder cannot be created.
pub fn build_state(config: &Config) -> Result<AppState> {
    std::fs::create_dir_all(&config.upload_folder).with_context(|| {
        format!(
            "Failed to create upload folder {}",
            config.upload_folder.display()
        )
    })?;

    let words = config.banned_words();
    tracing::info!(terms = words.len(), "Banned word set loaded");

    let censor = CensorEngine::new(words);
    let uploads = UploadValidator::new(&config.upload_folder, config.upload_policy());

    Ok(AppState::new(
        censor,
        uploads,
        config.upload_url_prefix.as_str(),
    ))
}

/// Runs the HTTP server with the given configuration.
///
/// # Errors
///
/// Returns an error if:
/// - The upload folder cannot be created
/// - The listen address is invalid or the bind fails
/// - Server runtime error occurs
pub async fn run(config: Config) -> Result<()> {
    let state = build_state(&config)?;
    let app = app_router(state, &config);

    let addr: SocketAddr = config
        .listen_addr
        .parse()
        .with_context(|| format!("Invalid listen address '{}'", config.listen_addr))?;
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    tracing::info!("Listening on http://{addr}");

    axum::serve(
        listener,
        ServiceExt::<Request>::into_make_service_with_connect_info::<SocketAddr>(app),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
