//! Shared application state for dependency injection.

use std::sync::Arc;

use crate::application::services::{ReviewService, UploadValidator};
use crate::domain::censor::CensorEngine;

/// Application state shared across all HTTP handlers.
///
/// All fields are `Arc`-wrapped, so cloning per request is cheap. The
/// censor engine and upload validator are immutable after startup.
#[derive(Clone)]
pub struct AppState {
    pub censor: Arc<CensorEngine>,
    pub uploads: Arc<UploadValidator>,
    pub reviews: Arc<ReviewService>,
    /// URL path stored photos are served under, without a trailing slash.
    pub upload_url_prefix: Arc<str>,
}

impl AppState {
    pub fn new(
        censor: CensorEngine,
        uploads: UploadValidator,
        upload_url_prefix: impl Into<Arc<str>>,
    ) -> Self {
        let censor = Arc::new(censor);
        let uploads = Arc::new(uploads);
        let reviews = Arc::new(ReviewService::new(censor.clone(), uploads.clone()));

        Self {
            censor,
            uploads,
            reviews,
            upload_url_prefix: upload_url_prefix.into(),
        }
    }

    /// Public URL of a stored upload.
    pub fn upload_url(&self, filename: &str) -> String {
        format!("{}/{}", self.upload_url_prefix, filename)
    }
}
