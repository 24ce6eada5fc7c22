//! 首页与健康检查

use axum::{extract::State, response::Json};
use serde::Serialize;

use super::{docs::OPENAPI_PATH, AppState};

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub products: usize,
    pub timestamp: String,
}

pub async fn welcome() -> String {
    format!("Welcome to the pot shop catalog API! Documentation: {OPENAPI_PATH}")
}

pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        products: state.product_service.product_count(),
        timestamp: chrono::Utc::now().to_rfc3339(),
    })
}
