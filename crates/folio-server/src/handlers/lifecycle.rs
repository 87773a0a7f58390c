use axum::Json;

use crate::protocol::{HealthResponse, ServiceInfo};

/// `GET /`
pub async fn handle_root() -> Json<ServiceInfo> {
    Json(ServiceInfo {
        message: "Folio notes API".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// `GET /health`
pub async fn handle_health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
    })
}

/// Resolves on Ctrl-C so `axum::serve` can drain connections
pub async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        log::error!("Failed to listen for shutdown signal: {}", e);
        return;
    }
    log::info!("Shutting down folio-server...");
}
