//! 废弃物分析处理器

use axum::{
    extract::{rejection::JsonRejection, State},
    response::{IntoResponse, Response},
    Json,
};
use serde::Deserialize;
use serde_json::{Map, Value};

use crate::gateway::state::AppState;
use crate::relay::RelayError;

/// 请求体；缺少 `waste_description` 时按空描述处理
#[derive(Debug, Deserialize)]
pub struct AnalyzeRequest {
    #[serde(default)]
    waste_description: String,
}

/// POST /api/analyze-waste 处理器
pub async fn handle_analyze_waste(
    State(state): State<AppState>,
    payload: Result<Json<AnalyzeRequest>, JsonRejection>,
) -> Response {
    let result: Result<Map<String, Value>, RelayError> = async {
        let Json(request) = payload.map_err(|e| RelayError::System(e.body_text()))?;
        state.relay().analyze(&request.waste_description).await
    }
    .await;

    match result {
        Ok(object) => Json(Value::Object(object)).into_response(),
        Err(err) => {
            tracing::info!(status = err.status_code().as_u16(), "analysis rejected: {err}");
            err.into_response()
        }
    }
}
