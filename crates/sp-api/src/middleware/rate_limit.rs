use axum::Router;
use tower_governor::{
    GovernorLayer, governor::GovernorConfigBuilder, key_extractor::SmartIpKeyExtractor,
};

/// Strict rate limiting for authentication endpoints: 5 requests per second
/// with a burst of 10, keyed by client IP (forwarded headers first, then the
/// peer address).
pub fn apply_auth_rate_limit<S>(router: Router<S>) -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    let governor_conf = GovernorConfigBuilder::default()
        .per_second(5)
        .burst_size(10)
        .key_extractor(SmartIpKeyExtractor)
        .use_headers()
        .finish()
        .expect("Failed to build auth rate limiter configuration");

    router.layer(GovernorLayer::new(governor_conf))
}

/// Moderate rate limiting for general endpoints: 10 requests per second with
/// a burst of 20.
pub fn apply_general_rate_limit<S>(router: Router<S>) -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    let governor_conf = GovernorConfigBuilder::default()
        .per_second(10)
        .burst_size(20)
        .key_extractor(SmartIpKeyExtractor)
        .use_headers()
        .finish()
        .expect("Failed to build general rate limiter configuration");

    router.layer(GovernorLayer::new(governor_conf))
}
