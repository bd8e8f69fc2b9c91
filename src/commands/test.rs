//! Test 命令 - 发送测试请求到本地服务器
//!
//! 此模块实现 `test` 命令，用于向本地运行的服务器发送一条示例描述，
//! 验证服务是否正常工作。

use anyhow::{Context, Result};

use crate::config::Config;
use crate::utils::get_shared_client;

const SAMPLE_DESCRIPTION: &str = "banana peel";

/// 执行测试命令
///
/// 先查询 `/api/health`，再向 `/api/analyze-waste` 发送示例描述并显示响应
pub async fn test_command(config: Config) -> Result<()> {
    let base = format!("http://{}:{}", config.host, config.port);
    let client = get_shared_client();

    let health = client
        .get(format!("{}/api/health", base))
        .send()
        .await
        .context("Request failed. Make sure the server is running.")?;
    let health_status = health.status();
    let health_body = health.text().await.unwrap_or_default();
    println!("Health: {} {}", health_status, health_body);

    let url = format!("{}/api/analyze-waste", base);
    println!("Request URL: {}", url);

    let response = client
        .post(&url)
        .json(&serde_json::json!({ "waste_description": SAMPLE_DESCRIPTION }))
        .send()
        .await
        .context("Request failed. Make sure the server is running.")?;

    let status = response.status();
    println!("Response status: {}", status);

    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        anyhow::bail!("Request failed: {}", body);
    }

    let body: serde_json::Value = response
        .json()
        .await
        .context("Failed to read response body")?;

    println!("Response:");
    println!("{}", serde_json::to_string_pretty(&body)?);

    Ok(())
}
