//! Top-level router configuration.
//!
//! # Route Structure
//!
//! - `GET  /health`          - Health check: upload folder, banned words
//! - `/api/*`                - Censor and upload API (rate limited)
//! - `GET  <upload prefix>/*` - Stored photos, default `/static/uploads`
//!
//! Unknown routes return a JSON `not_found` error.
//!
//! # Middleware
//!
//! - **Tracing** - Structured request/response logging
//! - **Rate limiting** - Per-IP token bucket on `/api` (proxy aware when configured)
//! - **Body limit** - `MAX_CONTENT_LENGTH` on `/api`
//! - **Path normalization** - Trailing slash handling

use crate::api;
use crate::api::handlers::{health_handler, not_found_handler};
use crate::api::middleware::{rate_limit, tracing as trace};
use crate::config::Config;
use crate::state::AppState;
use axum::Router;
use axum::routing::get;
use tower::Layer;
use tower_http::normalize_path::{NormalizePath, NormalizePathLayer};
use tower_http::services::ServeDir;

/// Constructs the application router with all routes and middleware.
///
/// Stored photos are served from `config.upload_folder` under
/// `config.upload_url_prefix`.
pub fn app_router(state: AppState, config: &Config) -> NormalizePath<Router> {
    let api_router = api::routes::api_routes(config.max_content_length);
    let api_router = if config.behind_proxy {
        api_router.layer(rate_limit::proxied_layer(
            config.rate_limit_per_second,
            config.rate_limit_burst,
        ))
    } else {
        api_router.layer(rate_limit::layer(
            config.rate_limit_per_second,
            config.rate_limit_burst,
        ))
    };

    let router = Router::new()
        .route("/health", get(health_handler))
        .nest("/api", api_router)
        .nest_service(
            &config.upload_url_prefix,
            ServeDir::new(&config.upload_folder),
        )
        .fallback(not_found_handler)
        .with_state(state)
        .layer(trace::layer());

    NormalizePathLayer::trim_trailing_slash().layer(router)
}
