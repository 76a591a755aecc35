//! Handler for review submission.

use axum::{
    Json,
    extract::{Multipart, State},
    http::StatusCode,
};
use serde_json::json;
use validator::Validate;

use crate::api::dto::photos::StoredFileInfo;
use crate::api::dto::review::{ReviewForm, ReviewResponse};
use crate::api::multipart::UploadForm;
use crate::application::services::ReviewSubmission;
use crate::error::AppError;
use crate::state::AppState;

/// Moderates a review: censors the comment and stores the attached photos.
///
/// # Endpoint
///
/// `POST /api/reviews` (`multipart/form-data`)
///
/// # Form Fields
///
/// - `rating` - integer 1 to 5
/// - `komentar` - comment text, required
/// - `foto` - zero or more photos
///
/// # Response
///
/// `201 Created` with the censored comment and the stored photos. The
/// review is not persisted here; the caller owns the record.
///
/// # Errors
///
/// - **400**: invalid rating, missing comment, or a rejected photo.
///   A single bad photo rejects the whole review with nothing stored.
/// - **413**: the request exceeds the body size limit
/// - **500**: storage failure
pub async fn submit_review_handler(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<(StatusCode, Json<ReviewResponse>), AppError> {
    let form = UploadForm::read(multipart).await?;

    let review = ReviewForm {
        rating: parse_rating(form.text("rating"))?,
        komentar: form.text("komentar").unwrap_or_default().trim().to_string(),
    };
    review.validate()?;

    let reviews = state.reviews.clone();
    let submission = ReviewSubmission {
        rating: review.rating,
        comment: review.komentar,
        photos: form.files,
    };

    let draft = tokio::task::spawn_blocking(move || reviews.submit(submission))
        .await
        .map_err(|e| {
            tracing::error!(error = %e, "Review task failed");
            AppError::internal("Failed to process review", json!({}))
        })??;

    let photos = draft
        .photos
        .into_iter()
        .map(|file| {
            let url = state.upload_url(&file.filename);
            StoredFileInfo::new(file, url)
        })
        .collect();

    Ok((
        StatusCode::CREATED,
        Json(ReviewResponse {
            rating: draft.rating,
            komentar: draft.comment,
            censored: draft.censored,
            photos,
        }),
    ))
}

fn parse_rating(value: Option<&str>) -> Result<u8, AppError> {
    let raw = value.map(str::trim).unwrap_or_default();

    raw.parse().map_err(|_| {
        AppError::bad_request(
            "Rating must be between 1 and 5",
            json!({ "field": "rating", "value": raw }),
        )
    })
}
