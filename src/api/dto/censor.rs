//! DTOs for the censor endpoint.

use serde::{Deserialize, Serialize};
use validator::Validate;

/// Text to be censored.
#[derive(Debug, Deserialize, Validate)]
pub struct CensorRequest {
    #[validate(length(max = 10000, message = "Text must be at most 10000 characters"))]
    pub text: String,
}

/// Censored text and whether anything was masked.
#[derive(Debug, Serialize)]
pub struct CensorResponse {
    pub text: String,
    pub censored: bool,
}
