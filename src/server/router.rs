use axum::http::{HeaderValue, Method};
use axum::routing::{get, post};
use axum::{middleware, Router};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use super::handlers;
use super::rate_limit;
use super::state::AppState;

/// Create the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    let cors = cors_layer(&state.config().server.cors_origin);

    Router::new()
        .route("/api/health", get(handlers::health))
        .route("/api/search", post(handlers::search))
        .route(
            "/api/book/{hexagon}/{wall}/{shelf}/{volume}",
            get(handlers::book),
        )
        .route("/api/random-book", get(handlers::random_book))
        .route("/api/concepts", get(handlers::concepts))
        .route("/api/explore/{concept}", get(handlers::explore))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            rate_limit::enforce,
        ))
        .with_state(state)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}

fn cors_layer(origin: &str) -> CorsLayer {
    let layer = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST])
        .allow_headers(Any);
    if origin == "*" {
        return layer.allow_origin(Any);
    }
    match HeaderValue::from_str(origin) {
        Ok(value) => layer.allow_origin(value),
        Err(_) => {
            tracing::warn!(origin, "invalid cors_origin, cross-origin requests will be refused");
            layer
        }
    }
}
