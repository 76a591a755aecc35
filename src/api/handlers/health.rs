//! Handler for health check endpoint.

use axum::{Json, extract::State, http::StatusCode};

use crate::api::dto::health::{CheckStatus, HealthChecks, HealthResponse};
use crate::state::AppState;

/// Returns service health status with component checks.
///
/// # Endpoint
///
/// `GET /health`
///
/// # Response Codes
///
/// - **200 OK**: All components healthy
/// - **503 Service Unavailable**: One or more components degraded
///
/// # Components Checked
///
/// 1. **Upload folder**: exists, is a directory, and is not read-only
/// 2. **Banned words**: dictionary is loaded
///
/// # Response
///
/// ```json
/// {
///   "status": "healthy",
///   "version": "0.1.0",
///   "checks": {
///     "upload_folder": { "status": "ok", "message": "static/uploads" },
///     "banned_words": { "status": "ok", "message": "59 terms" }
///   }
/// }
/// ```
pub async fn health_handler(
    State(state): State<AppState>,
) -> Result<Json<HealthResponse>, (StatusCode, Json<HealthResponse>)> {
    let upload_check = check_upload_folder(&state).await;
    let words_check = check_banned_words(&state);

    let all_healthy = upload_check.is_ok() && words_check.is_ok();

    let response = HealthResponse {
        status: if all_healthy { "healthy" } else { "degraded" }.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        checks: HealthChecks {
            upload_folder: upload_check,
            banned_words: words_check,
        },
    };

    if all_healthy {
        Ok(Json(response))
    } else {
        Err((StatusCode::SERVICE_UNAVAILABLE, Json(response)))
    }
}

async fn check_upload_folder(state: &AppState) -> CheckStatus {
    let dir = state.uploads.storage_dir();

    match tokio::fs::metadata(dir).await {
        Ok(meta) if !meta.is_dir() => CheckStatus::error("Upload folder is not a directory"),
        Ok(meta) if meta.permissions().readonly() => {
            CheckStatus::error("Upload folder is read-only")
        }
        Ok(_) => CheckStatus::ok(dir.display().to_string()),
        Err(e) => CheckStatus::error(format!("Upload folder unavailable: {}", e)),
    }
}

fn check_banned_words(state: &AppState) -> CheckStatus {
    let words = state.censor.banned_words();
    if words.is_empty() {
        CheckStatus::error("No banned words loaded")
    } else {
        CheckStatus::ok(format!("{} terms", words.len()))
    }
}
