use axum::{Router, http::HeaderValue, routing::get};
use tower_http::{
    cors::{AllowOrigin, Any, CorsLayer},
    trace::TraceLayer,
};
use tracing::warn;

use crate::{AppState, handlers::health::ping_handler, infra::config::Config, routes};

/// Full application router with middleware, ready for `with_state`.
pub fn create_app(state: AppState) -> Router<()> {
    let cors_layer = cors_layer(state.config());

    Router::new()
        .route("/ping", get(ping_handler))
        .merge(routes::create_api_router(state.clone()))
        .layer(cors_layer)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

// Permissive in dev, allow-list otherwise.
fn cors_layer(config: &Config) -> CorsLayer {
    if config.dev_mode {
        return CorsLayer::permissive();
    }

    let origins: Vec<HeaderValue> = config
        .cors
        .allowed_origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                warn!(origin = %origin, "ignoring invalid CORS origin");
                None
            }
        })
        .collect();
    let allow_origin = if origins.is_empty() {
        AllowOrigin::any()
    } else {
        AllowOrigin::list(origins)
    };

    CorsLayer::new()
        .allow_origin(allow_origin)
        .allow_methods(Any)
        .allow_headers(Any)
}
