//! # Lelana Moderation
//!
//! Content moderation for user submissions on Lelana.id: profanity
//! censoring for review text and content-sniffing validation for photo
//! uploads, served over HTTP with Axum and usable directly as a library.
//!
//! ## Architecture
//!
//! - **Domain Layer** ([`domain`]) - Banned words, censor engine, upload policy
//! - **Application Layer** ([`application`]) - Upload validation and review moderation
//! - **API Layer** ([`api`]) - REST handlers, DTOs, and middleware
//! - **Utilities** ([`utils`]) - Text normalization, MIME sniffing, filenames
//!
//! ## Features
//!
//! - Format-preserving censoring that sees through case and repeated letters
//!   (`"FUUUCK"`, `"annjjinnng"`)
//! - Upload validation by file content rather than the claimed name or type
//! - All-or-nothing upload batches with unique generated filenames
//! - Rate limiting and structured request logging
//!
//! ## Quick Start
//!
//! ```bash
//! export UPLOAD_FOLDER="static/uploads"
//! export BAD_WORDS_ID="anjing,bangsat"
//!
//! cargo run
//! ```
//!
//! ## Configuration
//!
//! Service configuration is loaded from environment variables via [`config::Config`].
//! See [`config`] module for available options.

pub mod api;
pub mod application;
pub mod domain;
pub mod error;
pub mod state;
pub mod utils;

pub mod config;
pub mod server;

pub mod routes;

pub use error::AppError;
pub use state::AppState;

/// Commonly used types for external consumers.
///
/// Re-exports frequently used types to simplify imports for library users
/// and integration tests.
pub mod prelude {
    pub use crate::application::services::{
        ReviewDraft, ReviewService, ReviewSubmission, UploadError, UploadValidator,
    };
    pub use crate::domain::banned_words::BannedWordSet;
    pub use crate::domain::censor::CensorEngine;
    pub use crate::domain::upload::{
        AcceptedFile, InMemoryUpload, SeekableUpload, UploadPolicy, UploadSource,
    };
    pub use crate::error::AppError;
    pub use crate::state::AppState;
}
