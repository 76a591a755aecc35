//! API route configuration.

use crate::api::handlers::{censor_handler, submit_review_handler, upload_photos_handler};
use crate::state::AppState;
use axum::{Router, extract::DefaultBodyLimit, routing::post};

/// All API routes, with request bodies capped at `max_body_bytes`.
///
/// # Endpoints
///
/// - `POST /censor`  - Censor a piece of text (JSON)
/// - `POST /photos`  - Validate and store photos (multipart)
/// - `POST /reviews` - Moderate a review with optional photos (multipart)
///
/// Rate limiting is applied by the caller, see [`crate::routes::app_router`].
pub fn api_routes(max_body_bytes: usize) -> Router<AppState> {
    Router::new()
        .route("/censor", post(censor_handler))
        .route("/photos", post(upload_photos_handler))
        .route("/reviews", post(submit_review_handler))
        .layer(DefaultBodyLimit::max(max_body_bytes))
}
