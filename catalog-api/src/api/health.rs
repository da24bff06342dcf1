use axum::{
    routing::get,
    Router,
    Json,
    extract::State,
    http::StatusCode,
};
use std::sync::Arc;

use crate::domain::services::health_service::HealthReport;
use crate::server::AppState;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/live", get(live))
        .route("/ready", get(ready))
}

async fn live(
    State(state): State<Arc<AppState>>,
) -> Json<HealthReport> {
    Json(state.health_check().liveness())
}

async fn ready(
    State(state): State<Arc<AppState>>,
) -> (StatusCode, Json<HealthReport>) {
    let report = state.health_check().readiness().await;

    let status = if report.is_healthy() {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    (status, Json(report))
}
