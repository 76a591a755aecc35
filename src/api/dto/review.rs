//! DTOs for review submission.

use serde::Serialize;
use validator::Validate;

use super::photos::StoredFileInfo;

/// Text fields of the multipart review form.
///
/// Field names follow the public form (`komentar` is the comment).
#[derive(Debug, Default, Validate)]
pub struct ReviewForm {
    #[validate(range(min = 1, max = 5, message = "Rating must be between 1 and 5"))]
    pub rating: u8,

    #[validate(length(min = 1, max = 10000, message = "Comment is required"))]
    pub komentar: String,
}

/// A moderated review.
#[derive(Debug, Serialize)]
pub struct ReviewResponse {
    pub rating: u8,
    pub komentar: String,
    pub censored: bool,
    pub photos: Vec<StoredFileInfo>,
}
