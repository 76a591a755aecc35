//! Per-client rate limiting for the API using a token bucket.
//!
//! Requests exceeding the limit receive `429 Too Many Requests`. Both
//! extractors need the peer address, so the server must be started with
//! `into_make_service_with_connect_info::<SocketAddr>()`.

use governor::clock::QuantaInstant;
use governor::middleware::NoOpMiddleware;
use std::sync::Arc;
use tower_governor::{
    GovernorLayer,
    governor::GovernorConfigBuilder,
    key_extractor::{PeerIpKeyExtractor, SmartIpKeyExtractor},
};

type Layer<K> = GovernorLayer<K, NoOpMiddleware<QuantaInstant>, axum::body::Body>;

/// Rate limiter keyed by the socket peer address.
///
/// `per_second` is the replenish interval in seconds for one request;
/// `burst` is the bucket size. Both must be non-zero.
///
/// # Example
///
/// ```rust,ignore
/// let api = api::routes::api_routes(config.max_content_length)
///     .layer(rate_limit::layer(2, 50));
/// ```
pub fn layer(per_second: u64, burst: u32) -> Layer<PeerIpKeyExtractor> {
    let governor_conf = Arc::new(
        GovernorConfigBuilder::default()
            .per_second(per_second)
            .burst_size(burst)
            .finish()
            .expect("rate limit values must be non-zero"),
    );

    GovernorLayer::new(governor_conf)
}

/// Rate limiter for deployments behind a trusted reverse proxy.
///
/// The client is identified by `X-Forwarded-For`, `X-Real-IP` or
/// `Forwarded`, falling back to the peer address. Never use this when
/// clients can reach the service directly, as they could spoof the headers.
pub fn proxied_layer(per_second: u64, burst: u32) -> Layer<SmartIpKeyExtractor> {
    let governor_conf = Arc::new(
        GovernorConfigBuilder::default()
            .per_second(per_second)
            .burst_size(burst)
            .key_extractor(SmartIpKeyExtractor)
            .finish()
            .expect("rate limit values must be non-zero"),
    );

    GovernorLayer::new(governor_conf)
}
