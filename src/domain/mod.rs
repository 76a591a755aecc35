//! Domain layer containing the moderation core.
//!
//! Everything here is free of HTTP concerns and can be used directly from
//! the CLI or tests.
//!
//! # Architecture
//!
//! - [`banned_words`] - Immutable banned-word dictionary
//! - [`censor`] - Format-preserving profanity censoring
//! - [`upload`] - Upload sources, acceptance policy, and accepted-file records
//!
//! # Design Principles
//!
//! - Configuration is passed in at construction time, never read from globals
//! - Components are immutable after construction and shared behind `Arc`
//! - Storage I/O lives in [`crate::application::services`]

pub mod banned_words;
pub mod censor;
pub mod upload;
