//! HTTP layer: router assembly, handlers and middleware

pub mod handlers;
pub mod middleware;
pub mod routes;

use crate::{config::ServerConfig, state::AppState};
use axum::{
    extract::DefaultBodyLimit,
    http::{header, HeaderValue, Method},
    routing::get,
    Router,
};
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    trace::TraceLayer,
};

/// Build the application router with all routes and layers.
pub fn create_router(state: AppState) -> Router {
    let server = state.config.server.clone();

    let mut router = Router::new()
        .route("/health", get(handlers::system::health))
        .route("/metrics", get(handlers::system::metrics))
        .merge(routes::entity_routes(state.country_service.clone()))
        .merge(routes::entity_routes(state.greeting_service.clone()))
        .layer(DefaultBodyLimit::max(server.max_request_body_size))
        .layer(axum::middleware::from_fn(
            middleware::security_headers_middleware,
        ));

    if let Some(cors) = cors_layer(&server) {
        router = router.layer(cors);
    }

    router
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// CORS for the configured origins. No layer at all when none are configured.
fn cors_layer(server: &ServerConfig) -> Option<CorsLayer> {
    let origins: Vec<HeaderValue> = server
        .cors_origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(origin = %origin, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    if origins.is_empty() {
        return None;
    }

    Some(
        CorsLayer::new()
            .allow_origin(AllowOrigin::list(origins))
            .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
            .allow_headers([header::CONTENT_TYPE, header::ACCEPT]),
    )
}
