//! Business logic services for the application layer.

pub mod review_service;
pub mod upload_service;

pub use review_service::{ReviewDraft, ReviewService, ReviewSubmission};
pub use upload_service::{UploadError, UploadValidator};
