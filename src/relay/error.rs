//! 请求级错误分类及其 HTTP 映射

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

/// 单次分析请求可能出现的失败
///
/// 所有错误对当前请求都是终结性的，不做重试
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RelayError {
    #[error("Please describe your waste item")]
    EmptyInput,

    /// 启动时上游客户端没有初始化成功
    #[error("Gemini API is not connected")]
    ServiceUnavailable,

    #[error("Quota exceeded. Please wait for reset or upgrade your plan.")]
    QuotaExceeded,

    #[error("Gemini API error: {0}")]
    Upstream(String),

    /// 上游有回复，但其中找不到可解析的 JSON 对象
    #[error("No valid response from Gemini")]
    NoValidResponse,

    #[error("System error: {0}")]
    System(String),
}

impl RelayError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            RelayError::EmptyInput => StatusCode::BAD_REQUEST,
            RelayError::QuotaExceeded => StatusCode::TOO_MANY_REQUESTS,
            RelayError::ServiceUnavailable
            | RelayError::Upstream(_)
            | RelayError::NoValidResponse
            | RelayError::System(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

impl IntoResponse for RelayError {
    fn into_response(self) -> Response {
        let body = ErrorBody {
            error: self.to_string(),
        };
        (self.status_code(), Json(body)).into_response()
    }
}
