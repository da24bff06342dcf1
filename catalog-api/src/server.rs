use axum::{routing::get, Json, Router};
use std::sync::Arc;
use tower_http::{
    cors::{CorsLayer, Any},
    trace::TraceLayer,
};

use crate::api::{health, items};
use crate::config::Config;
use crate::domain::repositories::ItemsRepository;
use crate::domain::services::health_service::HealthCheck;
use utoipa::OpenApi;

#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub items: Arc<dyn ItemsRepository>,
}

impl AppState {
    pub fn new(config: Config, items: Arc<dyn ItemsRepository>) -> Self {
        Self { config, items }
    }

    pub fn health_check(&self) -> HealthCheck {
        HealthCheck::new(self.items.clone(), self.config.storage.readiness_timeout())
    }
}

pub fn create_app(state: AppState) -> Router {
    let app_state = Arc::new(state);

    Router::new()
        .nest("/items", items::routes())
        .nest("/health", health::routes())
        .route("/api-docs/openapi.json", get(openapi_document))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::new().allow_origin(Any))
        .with_state(app_state)
}

async fn openapi_document() -> Json<utoipa::openapi::OpenApi> {
    Json(items::ItemsApiDoc::openapi())
}

/// Ctrl-C 或 SIGTERM 到达时返回
pub async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl-C: {}", e);
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => tracing::error!("Failed to listen for SIGTERM: {}", e),
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received, draining connections");
}
