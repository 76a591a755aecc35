//! Review submission pipeline: censored comment plus validated photos.

use std::sync::Arc;

use crate::application::services::upload_service::{UploadError, UploadValidator};
use crate::domain::censor::CensorEngine;
use crate::domain::upload::{AcceptedFile, UploadSource};

/// A review as submitted by a visitor, before moderation.
#[derive(Debug)]
pub struct ReviewSubmission<S> {
    pub rating: u8,
    pub comment: String,
    pub photos: Vec<S>,
}

/// A moderated review, ready to be persisted by the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReviewDraft {
    pub rating: u8,
    /// Comment with banned words masked.
    pub comment: String,
    /// Whether the comment was changed by censoring.
    pub censored: bool,
    pub photos: Vec<AcceptedFile>,
}

/// Moderates review submissions.
///
/// The comment is censored and the photos go through [`UploadValidator`] as
/// one batch, so a review with a single bad photo is rejected as a whole and
/// leaves nothing on disk.
pub struct ReviewService {
    censor: Arc<CensorEngine>,
    uploads: Arc<UploadValidator>,
}

impl ReviewService {
    pub fn new(censor: Arc<CensorEngine>, uploads: Arc<UploadValidator>) -> Self {
        Self { censor, uploads }
    }

    /// Censors the comment and stores the photos.
    ///
    /// # Errors
    ///
    /// Propagates [`UploadError`] from the photo batch.
    pub fn submit<S: UploadSource>(
        &self,
        mut submission: ReviewSubmission<S>,
    ) -> Result<ReviewDraft, UploadError> {
        let comment = self.censor.censor(&submission.comment).into_owned();
        let censored = comment != submission.comment;

        let photos = self.uploads.save_all(&mut submission.photos)?;

        if censored {
            tracing::info!(
                rating = submission.rating,
                photos = photos.len(),
                "Review comment censored"
            );
        }

        Ok(ReviewDraft {
            rating: submission.rating,
            comment,
            censored,
            photos,
        })
    }
}
