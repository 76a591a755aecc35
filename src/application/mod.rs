//! Application layer services implementing business logic.
//!
//! This layer orchestrates domain operations and I/O. Services own the
//! immutable domain components and provide a clean API for HTTP handlers
//! and the CLI.
//!
//! # Available Services
//!
//! - [`services::upload_service::UploadValidator`] - Content-sniffed, all-or-nothing photo storage
//! - [`services::review_service::ReviewService`] - Review moderation (censored comment + photos)

pub mod services;
