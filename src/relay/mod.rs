//! 废弃物查询中继
//!
//! 校验描述、节流、构建提示词、调用上游模型、从回复中提取 JSON，
//! 并把各种失败归类为 [`RelayError`]

mod error;
mod extract;
mod prompt;
mod report;
mod throttle;

pub use error::RelayError;
pub use extract::extract_json;
pub use prompt::build_prompt;
pub use report::{DisposalReport, WasteItem};
pub use throttle::Throttle;

use serde_json::{Map, Value};
use std::sync::Arc;
use std::time::Duration;

use crate::upstream::LanguageModel;

pub struct Relay {
    model: Option<Arc<dyn LanguageModel>>,
    throttle: Throttle,
}

impl Relay {
    /// `model` 为 `None` 表示启动时上游客户端初始化失败
    pub fn new(model: Option<Arc<dyn LanguageModel>>, interval: Duration) -> Self {
        Self {
            model,
            throttle: Throttle::new(interval),
        }
    }

    pub fn is_connected(&self) -> bool {
        self.model.is_some()
    }

    /// 分析一段废弃物描述
    ///
    /// # 流程
    ///
    /// 1. 描述去除首尾空白后为空时直接拒绝，不调用上游
    /// 2. 上游客户端不可用时拒绝
    /// 3. 节流等待
    /// 4. 调用模型并从回复中提取 JSON 对象
    ///
    /// 成功时原样返回提取出的对象；不会返回部分结果
    pub async fn analyze(&self, description: &str) -> Result<Map<String, Value>, RelayError> {
        let description = description.trim();
        if description.is_empty() {
            return Err(RelayError::EmptyInput);
        }

        let model = self.model.as_ref().ok_or(RelayError::ServiceUnavailable)?;

        let waited = self.throttle.wait_then_mark().await;
        let prompt = build_prompt(description);

        tracing::info!(
            model = model.name(),
            waited_ms = waited.as_millis() as u64,
            bytes = description.len(),
            "upstream request"
        );

        let reply = model.generate(&prompt).await.map_err(|err| {
            if err.is_quota_exceeded() {
                tracing::warn!(model = model.name(), "upstream quota exceeded");
                RelayError::QuotaExceeded
            } else {
                tracing::error!(model = model.name(), "Gemini API error: {err}");
                RelayError::Upstream(err.to_string())
            }
        })?;

        let object = extract_json(&reply)
            .filter(|object| !object.is_empty())
            .ok_or_else(|| {
                tracing::warn!(reply_bytes = reply.len(), "no JSON object in upstream reply");
                RelayError::NoValidResponse
            })?;

        let report = DisposalReport::from_object(&object);
        tracing::info!(
            model = model.name(),
            items = report.item_count(),
            unclear = report.needs_clarification().count(),
            "upstream response"
        );

        Ok(object)
    }
}
