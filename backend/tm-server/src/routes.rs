use crate::{
    ApiError, AppState, accept_proposal, create_project, get_project, health, list_projects,
    moderate_project, next_payment, payment_callback, stream_projects, submit_proposal,
    update_progress,
};

use std::panic::Location;

use axum::{
    Router,
    error_handling::HandleErrorLayer,
    routing::{get, post, put},
};
use error_location::ErrorLocation;
use tower::{BoxError, ServiceBuilder, timeout::error::Elapsed};
use tower_http::cors::{Any, CorsLayer};

/// Build the application router with all endpoints
pub fn build_router(state: AppState) -> Router {
    let request_timeout = state.config.server.request_timeout();
    let max_connections = state.config.server.max_connections;

    Router::new()
        // Health check endpoints
        .route("/health", get(health::health_check))
        .route("/live", get(health::liveness_check))
        .route("/ready", get(health::readiness_check))
        // Projects
        .route("/api/v1/projects", get(list_projects).post(create_project))
        .route("/api/v1/projects/stream", get(stream_projects))
        .route("/api/v1/projects/{id}", get(get_project))
        .route("/api/v1/projects/{id}/moderation", put(moderate_project))
        .route("/api/v1/projects/{id}/proposals", post(submit_proposal))
        .route(
            "/api/v1/projects/{id}/proposals/{vendor_id}/accept",
            post(accept_proposal),
        )
        .route("/api/v1/projects/{id}/progress", put(update_progress))
        // Payments
        .route("/api/v1/projects/{id}/payments/next", post(next_payment))
        .route("/api/v1/payments/callback", post(payment_callback))
        .with_state(state)
        .layer(
            ServiceBuilder::new()
                .layer(HandleErrorLayer::new(handle_middleware_error))
                .concurrency_limit(max_connections)
                .timeout(request_timeout),
        )
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
}

async fn handle_middleware_error(error: BoxError) -> ApiError {
    if error.is::<Elapsed>() {
        ApiError::Timeout {
            location: ErrorLocation::from(Location::caller()),
        }
    } else {
        ApiError::internal(format!("Unhandled middleware error: {}", error))
    }
}
