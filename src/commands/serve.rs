//! Serve 命令 - 启动 API 服务器
//!
//! 此模块实现 `serve` 命令，启动 HTTP API 服务器，把废弃物描述转发给 Gemini。

use anyhow::Result;

use crate::config::Config;
use crate::gateway;

/// 执行服务器启动命令
///
/// # 功能
///
/// - 连接 Gemini（失败时以不健康状态继续启动）
/// - 初始化 HTTP 路由和中间件
/// - 启动服务器并等待关闭信号
/// - 支持优雅关闭（Ctrl+C 或 SIGTERM）
pub async fn serve_command(config: Config) -> Result<()> {
    gateway::serve(config).await
}
