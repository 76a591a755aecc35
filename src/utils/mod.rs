//! Utility functions for text normalization and upload handling.
//!
//! This module provides helper functions used across the application:
//!
//! - [`text_normalizer`] - Normalization and tokenization for profanity detection
//! - [`mime_sniffer`] - Content-type detection from byte signatures
//! - [`filename`] - Safe, unique storage names for uploaded files

pub mod filename;
pub mod mime_sniffer;
pub mod text_normalizer;
