//! REST API layer for HTTP request/response handling.
//!
//! This layer translates HTTP requests into censor and upload operations and
//! formats responses according to API contracts.
//!
//! # Modules
//!
//! - [`dto`] - Data Transfer Objects for request/response serialization
//! - [`handlers`] - HTTP request handlers
//! - [`middleware`] - Rate limiting and tracing
//! - [`multipart`] - Buffering of multipart forms
//! - [`routes`] - Route configuration and composition

pub mod dto;
pub mod handlers;
pub mod middleware;
pub mod multipart;
pub mod routes;
