//! Gemini Provider
//!
//! 基于 API key 的 Google Gemini `generateContent` 客户端

use anyhow::{Context, Result};
use async_trait::async_trait;
use http::{header, HeaderMap, HeaderValue};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::config::Config;
use crate::upstream::{LanguageModel, UpstreamError};
use crate::utils::should_disable_tls_verify;

/// API 请求超时（秒）
const API_TIMEOUT_SECS: u64 = 60;

/// 启动时用于检测连通性的提示词
const PROBE_PROMPT: &str = "ping";

pub struct GeminiClient {
    client: Client,
    endpoint: String,
    model: String,
}

impl GeminiClient {
    pub fn new(base_url: &str, model: &str, api_key: &str) -> Result<Self> {
        let mut headers = HeaderMap::new();
        let mut key = HeaderValue::from_str(api_key).context("Invalid Gemini API key for header")?;
        key.set_sensitive(true);
        headers.insert("x-goog-api-key", key);
        headers.insert(
            header::CONTENT_TYPE,
            HeaderValue::from_static("application/json"),
        );

        let mut builder = Client::builder()
            .timeout(Duration::from_secs(API_TIMEOUT_SECS))
            .default_headers(headers);

        if should_disable_tls_verify() {
            tracing::warn!("TLS certificate verification is DISABLED - for debugging only!");
            builder = builder.danger_accept_invalid_certs(true);
        }

        let client = builder.build().context("Failed to create Gemini API client")?;

        Ok(Self {
            client,
            endpoint: format!(
                "{}/models/{}:generateContent",
                base_url.trim_end_matches('/'),
                model
            ),
            model: model.to_string(),
        })
    }

    /// 根据配置创建客户端并做一次连通性探测
    ///
    /// # 错误
    ///
    /// - 如果 `GEMINI_API_KEY` 未设置
    /// - 如果探测请求失败
    ///
    /// 探测成功但没有返回文本时只记录警告，客户端仍然可用
    pub async fn connect(config: &Config) -> Result<Self> {
        let api_key = config
            .api_key
            .as_deref()
            .context("GEMINI_API_KEY environment variable is not set")?;

        let client = Self::new(&config.base_url, &config.model, api_key)?;

        let reply = client
            .generate(PROBE_PROMPT)
            .await
            .context("Gemini connectivity probe failed")?;

        if reply.trim().is_empty() {
            tracing::warn!(model = %client.model, "Gemini API connected but did not return text");
        } else {
            tracing::info!(model = %client.model, "Gemini API connected");
        }

        Ok(client)
    }
}

#[async_trait]
impl LanguageModel for GeminiClient {
    fn name(&self) -> &str {
        &self.model
    }

    async fn generate(&self, prompt: &str) -> Result<String, UpstreamError> {
        let body = GenerateRequest {
            contents: vec![RequestContent {
                parts: vec![RequestPart { text: prompt }],
            }],
        };

        let response = self.client.post(&self.endpoint).json(&body).send().await?;

        let status = response.status();
        if !status.is_success() {
            let error_body = response.text().await.unwrap_or_default();
            return Err(UpstreamError::Api {
                status,
                message: api_error_message(&error_body),
            });
        }

        let reply: GenerateResponse = response
            .json()
            .await
            .map_err(|e| UpstreamError::Decode(e.to_string()))?;

        Ok(reply.text())
    }
}

/// 从 Gemini 错误响应中取出 message，失败时原样返回响应体
fn api_error_message(body: &str) -> String {
    serde_json::from_str::<ErrorEnvelope>(body)
        .map(|e| e.error.message)
        .unwrap_or_else(|_| body.trim().to_string())
}

// --- API types ---

#[derive(Serialize)]
struct GenerateRequest<'a> {
    contents: Vec<RequestContent<'a>>,
}

#[derive(Serialize)]
struct RequestContent<'a> {
    parts: Vec<RequestPart<'a>>,
}

#[derive(Serialize)]
struct RequestPart<'a> {
    text: &'a str,
}

#[derive(Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

impl GenerateResponse {
    /// 拼接第一个候选回复中的所有文本片段
    fn text(&self) -> String {
        self.candidates
            .first()
            .and_then(|c| c.content.as_ref())
            .map(|content| {
                content
                    .parts
                    .iter()
                    .filter_map(|p| p.text.as_deref())
                    .collect::<String>()
            })
            .unwrap_or_default()
    }
}

#[derive(Deserialize)]
struct Candidate {
    content: Option<ResponseContent>,
}

#[derive(Deserialize)]
struct ResponseContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Deserialize)]
struct ResponsePart {
    text: Option<String>,
}

#[derive(Deserialize)]
struct ErrorEnvelope {
    error: ErrorDetail,
}

#[derive(Deserialize)]
struct ErrorDetail {
    message: String,
}
