//! Handler for photo uploads.

use axum::{
    Json,
    extract::{Multipart, State},
    http::StatusCode,
};
use serde_json::json;

use crate::api::dto::photos::{StoredFileInfo, UploadResponse};
use crate::api::multipart::{PHOTO_FIELD, UploadForm};
use crate::error::AppError;
use crate::state::AppState;

/// Validates and stores one or more photos.
///
/// # Endpoint
///
/// `POST /api/photos` (`multipart/form-data`, repeated `foto` field)
///
/// # Response
///
/// `201 Created`
///
/// ```json
/// {
///   "files": [
///     {
///       "filename": "6f1c2a4e-3b7d-4c1e-9a55-0d2f8e7b9c10.jpg",
///       "url": "/static/uploads/6f1c2a4e-3b7d-4c1e-9a55-0d2f8e7b9c10.jpg",
///       "content_type": "image/jpeg",
///       "size": 48213
///     }
///   ]
/// }
/// ```
///
/// # Errors
///
/// - **400**: no photo was sent, or any photo failed content validation.
///   Nothing is stored in that case.
/// - **413**: the request exceeds the body size limit
/// - **500**: storage failure
pub async fn upload_photos_handler(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<(StatusCode, Json<UploadResponse>), AppError> {
    let mut form = UploadForm::read(multipart).await?;

    if form.files.is_empty() {
        return Err(AppError::bad_request(
            "No files uploaded",
            json!({ "field": PHOTO_FIELD }),
        ));
    }

    let uploads = state.uploads.clone();
    let accepted = tokio::task::spawn_blocking(move || uploads.save_all(&mut form.files))
        .await
        .map_err(|e| {
            tracing::error!(error = %e, "Upload task failed");
            AppError::internal("Failed to store uploaded files", json!({}))
        })??;

    let files = accepted
        .into_iter()
        .map(|file| {
            let url = state.upload_url(&file.filename);
            StoredFileInfo::new(file, url)
        })
        .collect();

    Ok((StatusCode::CREATED, Json(UploadResponse { files })))
}
