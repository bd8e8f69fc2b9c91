//! 健康检查处理器

use axum::{extract::State, http::StatusCode, Json};
use serde::Serialize;

use crate::gateway::state::AppState;

/// 健康检查响应
#[derive(Serialize)]
pub struct HealthResponse {
    status: &'static str,
    message: &'static str,
}

/// GET /api/health
///
/// 上游客户端未初始化时返回 500
pub async fn handle_health(State(state): State<AppState>) -> (StatusCode, Json<HealthResponse>) {
    if state.relay().is_connected() {
        (
            StatusCode::OK,
            Json(HealthResponse {
                status: "ok",
                message: "Gemini API connected",
            }),
        )
    } else {
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(HealthResponse {
                status: "error",
                message: "Gemini API not connected",
            }),
        )
    }
}
