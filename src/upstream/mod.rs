//! 上游模型抽象层
//!
//! 定义文本生成模型的统一接口，relay 只依赖这个 trait

pub mod gemini;
#[cfg(test)]
pub mod mock;

use async_trait::async_trait;
use http::StatusCode;
use std::sync::Arc;

use crate::config::Config;

pub use gemini::GeminiClient;

/// 上游调用错误
#[derive(Debug, thiserror::Error)]
pub enum UpstreamError {
    /// 上游返回了非成功状态码
    #[error("{status}: {message}")]
    Api { status: StatusCode, message: String },

    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("malformed response: {0}")]
    Decode(String),
}

impl UpstreamError {
    /// 是否为配额耗尽（限流）
    ///
    /// 优先检查结构化的状态码；其余情况退回到在错误文本中查找 "429"，
    /// 这只是尽力而为的判断
    pub fn is_quota_exceeded(&self) -> bool {
        match self {
            UpstreamError::Api { status, .. } if *status == StatusCode::TOO_MANY_REQUESTS => true,
            other => other.to_string().contains("429"),
        }
    }
}

/// LanguageModel Trait - 所有文本生成服务的统一接口
#[async_trait]
pub trait LanguageModel: Send + Sync {
    /// 模型名称（用于日志和标识）
    fn name(&self) -> &str;

    /// 发送提示词并返回模型的原始文本回复
    ///
    /// 回复可能为空字符串，由调用方决定如何处理
    async fn generate(&self, prompt: &str) -> Result<String, UpstreamError>;
}

/// 初始化上游模型
///
/// 失败时只记录错误并返回 `None`，服务仍然启动，但会报告自身不健康
pub async fn connect(config: &Config) -> Option<Arc<dyn LanguageModel>> {
    match GeminiClient::connect(config).await {
        Ok(client) => Some(Arc::new(client)),
        Err(e) => {
            tracing::error!("Gemini API connection failed: {e:#}");
            None
        }
    }
}
