use frailty_index::config::CorsConfig;
use metrics_exporter_prometheus::PrometheusHandle;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Permissive unless an origin list is configured. The permissive policy
/// mirrors the caller's origin so credentialed requests keep working.
pub(crate) fn cors_layer(config: &CorsConfig) -> CorsLayer {
    match &config.allowed_origins {
        None => CorsLayer::very_permissive(),
        Some(origins) => CorsLayer::new()
            .allow_origin(AllowOrigin::list(origins.iter().cloned()))
            .allow_methods(Any)
            .allow_headers(Any),
    }
}
