//! Data Transfer Objects for API requests and responses.
//!
//! JSON bodies use Serde; request types are checked with validator before
//! they reach the services.

pub mod censor;
pub mod health;
pub mod photos;
pub mod review;
