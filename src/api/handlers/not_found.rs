use axum::http::Uri;
use serde_json::json;

use crate::error::AppError;

/// Fallback for unknown routes, in the standard error format.
pub async fn not_found_handler(uri: Uri) -> AppError {
    AppError::not_found("Route not found", json!({ "path": uri.path() }))
}
