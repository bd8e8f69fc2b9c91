//! Gateway 中间件

use axum::{
    extract::Request,
    http::StatusCode,
    middleware::Next,
    response::{IntoResponse, Response},
    BoxError, Json,
};
use serde_json::json;
use std::any::Any;
use std::sync::atomic::{AtomicU64, Ordering};
use tracing::Instrument;

use crate::relay::RelayError;

/// 全局请求计数器，用于生成 request_id
static REQUEST_COUNTER: AtomicU64 = AtomicU64::new(1);

/// 请求日志中间件
pub async fn request_logger(request: Request, next: Next) -> Response {
    let request_id = REQUEST_COUNTER.fetch_add(1, Ordering::Relaxed);
    let method = request.method().clone();
    let path = request.uri().path().to_string();

    let span = tracing::info_span!(
        "req",
        id = request_id,
        %method,
        %path,
    );

    async move {
        let start = std::time::Instant::now();
        let response = next.run(request).await;
        let latency_ms = start.elapsed().as_millis() as u64;
        let status = response.status().as_u16();

        tracing::info!(status, latency_ms, "done");

        response
    }
    .instrument(span)
    .await
}

/// 处理器 panic 时的兜底响应
///
/// 转换为 `System` 错误（500），保证故障不会泄漏到传输层
pub fn panic_response(err: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(s) = err.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        s.to_string()
    } else {
        "unknown panic".to_string()
    };

    tracing::error!("handler panicked: {detail}");
    RelayError::System(detail).into_response()
}

/// 超时等中间层错误的响应
///
/// 超时返回 408，其余返回 500，响应体都是 `System` 错误
pub async fn handle_layer_error(err: BoxError) -> Response {
    let (status, error) = if err.is::<tower::timeout::error::Elapsed>() {
        (
            StatusCode::REQUEST_TIMEOUT,
            RelayError::System("request timed out".to_string()),
        )
    } else {
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            RelayError::System(err.to_string()),
        )
    };

    tracing::warn!(status = status.as_u16(), "{error}");
    (status, Json(json!({ "error": error.to_string() }))).into_response()
}
