//! 应用配置模块
//!
//! 负责从环境变量加载应用配置，包括：
//! - 服务器监听地址和端口
//! - Gemini API 密钥、模型与地址
//! - 上游调用节流间隔和请求超时

use anyhow::{Context, Result};
use std::time::Duration;

const DEFAULT_MODEL: &str = "gemini-2.0-flash";
const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// 日志输出格式
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Text,
    Json,
}

/// 应用配置
///
/// 包含服务器运行所需的所有配置项
#[derive(Debug, Clone)]
pub struct Config {
    /// 服务器监听地址（如 "0.0.0.0" 或 "127.0.0.1"）
    pub host: String,
    /// 服务器监听端口
    pub port: u16,
    /// Gemini API 密钥，缺失时服务照常启动但报告不健康
    pub api_key: Option<String>,
    /// Gemini 模型名称
    pub model: String,
    /// Gemini REST API 基础地址
    pub base_url: String,
    /// 两次上游调用之间的最小间隔
    pub request_interval: Duration,
    /// 单个 HTTP 请求的超时时间
    pub request_timeout: Duration,
    pub log_format: LogFormat,
}

impl Config {
    /// 从环境变量加载配置
    ///
    /// # 环境变量
    ///
    /// - `WASTEWISE_HOST`: 服务器监听地址（默认: "127.0.0.1"）
    /// - `WASTEWISE_PORT`: 服务器监听端口（默认: 5000）
    /// - `GEMINI_API_KEY`: Gemini API 密钥（可选）
    /// - `GEMINI_MODEL`: 模型名称（默认: "gemini-2.0-flash"）
    /// - `GEMINI_BASE_URL`: API 地址
    /// - `WASTEWISE_REQUEST_INTERVAL_MS`: 上游调用最小间隔（默认: 2000）
    /// - `WASTEWISE_REQUEST_TIMEOUT_SECS`: HTTP 请求超时（默认: 120）
    /// - `WASTEWISE_LOG_FORMAT`: `text` 或 `json`（默认: text）
    ///
    /// # 错误
    ///
    /// - 如果数值类变量无法解析
    /// - 如果 `WASTEWISE_LOG_FORMAT` 不是已知格式
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// 使用自定义的查找函数加载配置，便于测试
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let host = lookup("WASTEWISE_HOST").unwrap_or_else(|| "127.0.0.1".to_string());

        let port = lookup("WASTEWISE_PORT")
            .unwrap_or_else(|| "5000".to_string())
            .parse()
            .context("WASTEWISE_PORT must be a valid port number")?;

        let api_key = lookup("GEMINI_API_KEY")
            .map(|k| k.trim().to_string())
            .filter(|k| !k.is_empty());

        let model = lookup("GEMINI_MODEL").unwrap_or_else(|| DEFAULT_MODEL.to_string());

        let base_url = lookup("GEMINI_BASE_URL")
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string())
            .trim_end_matches('/')
            .to_string();

        let interval_ms: u64 = lookup("WASTEWISE_REQUEST_INTERVAL_MS")
            .unwrap_or_else(|| "2000".to_string())
            .parse()
            .context("WASTEWISE_REQUEST_INTERVAL_MS must be a number of milliseconds")?;

        let timeout_secs: u64 = lookup("WASTEWISE_REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|| "120".to_string())
            .parse()
            .context("WASTEWISE_REQUEST_TIMEOUT_SECS must be a number of seconds")?;

        let log_format = match lookup("WASTEWISE_LOG_FORMAT").as_deref() {
            None | Some("text") => LogFormat::Text,
            Some("json") => LogFormat::Json,
            Some(other) => anyhow::bail!("Unknown WASTEWISE_LOG_FORMAT: {other}"),
        };

        Ok(Self {
            host,
            port,
            api_key,
            model,
            base_url,
            request_interval: Duration::from_millis(interval_ms),
            request_timeout: Duration::from_secs(timeout_secs),
            log_format,
        })
    }
}
