//! HTTP request handlers for API endpoints.
//!
//! Each handler module corresponds to a logical grouping of endpoints.

pub mod censor;
pub mod health;
pub mod not_found;
pub mod photos;
pub mod reviews;

pub use censor::censor_handler;
pub use health::health_handler;
pub use not_found::not_found_handler;
pub use photos::upload_photos_handler;
pub use reviews::submit_review_handler;
