use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use super::handlers;
use super::AppState;
use crate::middleware::{make_span_with_request_id, request_id_middleware};

/// Creates the main API router with all routes
pub fn create_router(state: AppState) -> Router {
    // Request IDs are assigned before the trace span is opened so the span can record them
    let layers = ServiceBuilder::new()
        .layer(CorsLayer::permissive())
        .layer(middleware::from_fn(request_id_middleware))
        .layer(TraceLayer::new_for_http().make_span_with(make_span_with_request_id));

    Router::new()
        .route("/health", get(handlers::health_check))
        // Dataset
        .route("/movies", get(handlers::list_movies))
        .route("/movies/:title", get(handlers::get_movie))
        .route("/dataset/reload", post(handlers::reload_dataset))
        // Recommendations
        .route("/recommendations", get(handlers::recommend))
        .layer(layers)
        .with_state(state)
}
