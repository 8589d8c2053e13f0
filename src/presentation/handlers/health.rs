use axum::Json;
use serde::Serialize;

/// Liveness probe body. The check never touches the model or the error log.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
}

pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse { status: "healthy" })
}
