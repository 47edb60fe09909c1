use super::handlers::{self, AppState};
use axum::{Router, routing::get};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

/// Create the Axum router with all endpoints
pub fn create_router(state: AppState) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        // Demo page
        .route("/", get(handlers::demo_page))
        // Health check
        .route("/health", get(handlers::health_check))
        // Speed test endpoints (JSON API)
        .route("/test", get(handlers::speed_test))
        .route("/invalidate", get(handlers::invalidate_cache))
        // Cache diagnostics
        .route("/cache/status", get(handlers::cache_status))
        .route("/cache/stats", get(handlers::cache_stats))
        // Add state and middleware
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}
