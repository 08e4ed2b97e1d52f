//! Router configuration for the HTTP API.
//!
//! Sets up all routes and middleware (CORS, tracing) and returns the
//! axum router ready for serving.

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use super::handlers;
use super::state::AppState;

/// Create the application router with all routes and middleware.
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(handlers::health_check))
        // Schedule CRUD
        .route(
            "/schedule",
            get(handlers::list_entries).post(handlers::create_entry),
        )
        .route(
            "/schedule/{id}",
            get(handlers::get_entry)
                .put(handlers::update_entry)
                .delete(handlers::delete_entry),
        )
        // Dry run and visual timeline
        .route("/schedule/check-overlap", post(handlers::check_overlap))
        .route("/schedule/timeline", get(handlers::get_timeline))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
