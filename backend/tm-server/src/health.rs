use crate::AppState;

use axum::{
    Json,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;

/// GET /health - component status
pub async fn health_check(State(state): State<AppState>) -> Response {
    let database_ok = ping(&state).await;
    let (status, overall, database) = if database_ok {
        (StatusCode::OK, "healthy", "operational")
    } else {
        (StatusCode::SERVICE_UNAVAILABLE, "degraded", "unavailable")
    };
    let gateway = if state.config.gateway.is_configured() {
        "configured"
    } else {
        "not_configured"
    };

    let health = json!({
        "status": overall,
        "version": env!("CARGO_PKG_VERSION"),
        "components": {
            "database": database,
            "gateway": gateway,
            "project_stream_subscribers": state.repo.feed().subscriber_count(),
        },
        "timestamp": state.clock.now().to_rfc3339(),
    });

    (status, Json(health)).into_response()
}

/// GET /live - the process answers
pub async fn liveness_check() -> Response {
    (StatusCode::OK, "OK").into_response()
}

/// GET /ready - the database answers
pub async fn readiness_check(State(state): State<AppState>) -> Response {
    if ping(&state).await {
        (StatusCode::OK, "Ready").into_response()
    } else {
        (StatusCode::SERVICE_UNAVAILABLE, "Database unavailable").into_response()
    }
}

async fn ping(state: &AppState) -> bool {
    match sqlx::query("SELECT 1").execute(&state.pool).await {
        Ok(_) => true,
        Err(e) => {
            log::warn!("Database ping failed: {}", e);
            false
        }
    }
}
