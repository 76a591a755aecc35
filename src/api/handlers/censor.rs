//! Handler for the censor endpoint.

use axum::{Json, extract::State};
use validator::Validate;

use crate::api::dto::censor::{CensorRequest, CensorResponse};
use crate::error::AppError;
use crate::state::AppState;

/// Masks banned words in a piece of text.
///
/// # Endpoint
///
/// `POST /api/censor`
///
/// # Request Body
///
/// ```json
/// { "text": "Hello, World! FOO bar." }
/// ```
///
/// # Response
///
/// ```json
/// { "text": "Hello, World! **** bar.", "censored": true }
/// ```
///
/// Text without banned words is returned unchanged with `censored: false`.
///
/// # Errors
///
/// Returns 400 Bad Request if the text is longer than 10000 characters.
pub async fn censor_handler(
    State(state): State<AppState>,
    Json(payload): Json<CensorRequest>,
) -> Result<Json<CensorResponse>, AppError> {
    payload.validate()?;

    let result = state.censor.censor(&payload.text);
    let censored = result != payload.text.as_str();

    if censored {
        tracing::info!(chars = payload.text.chars().count(), "Censored submitted text");
    }

    Ok(Json(CensorResponse {
        text: result.into_owned(),
        censored,
    }))
}
