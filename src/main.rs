//! WasteWise - 废弃物分类与处置建议中继服务
//!
//! 接收一段自由文本的废弃物描述，转发给 Gemini，并把回复中的 JSON
//! 处置建议返回给调用方。
//!
//! # 功能特性
//!
//! - 上游调用最小间隔节流
//! - 多条目分类提示词
//! - 从模型回复中提取 JSON
//! - 配额耗尽映射为 429，其余失败映射为 500
//!
//! # 命令行接口
//!
//! - `serve`: 启动 API 服务器
//! - `analyze`: 在本进程内分析一段描述
//! - `test`: 向本地服务器发送测试请求

mod commands;
mod config;
mod gateway;
mod relay;
mod upstream;
mod utils;

use anyhow::Result;
use clap::{Parser, Subcommand};
use config::{Config, LogFormat};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// WasteWise CLI
#[derive(Parser)]
#[command(name = "wastewise")]
#[command(about = "Waste classification relay backed by Gemini", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// 可用的命令
#[derive(Subcommand)]
enum Commands {
    /// 启动 API 中继服务器
    Serve,
    /// 分析一段废弃物描述并输出 JSON
    Analyze {
        /// 废弃物描述，多个条目用逗号分隔
        #[arg(required = true, num_args = 1..)]
        description: Vec<String>,
    },
    /// 向本地服务器发送测试请求
    Test,
}

#[tokio::main]
async fn main() -> Result<()> {
    // 加载 .env 文件（如果存在）
    if let Ok(dotenv_path) = std::env::var("WASTEWISE_ENV_FILE") {
        dotenvy::from_path(&dotenv_path).ok();
    } else {
        dotenvy::dotenv().ok();
    }

    // 解析命令行参数和配置
    let cli = Cli::parse();
    let config = Config::from_env()?;

    // 初始化日志系统
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "wastewise=info".into());
    match config.log_format {
        LogFormat::Text => tracing_subscriber::registry()
            .with(filter)
            .with(
                tracing_subscriber::fmt::layer()
                    .with_target(false)
                    .with_thread_ids(false)
                    .with_thread_names(false),
            )
            .init(),
        LogFormat::Json => tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().json())
            .init(),
    }

    // 执行相应的命令
    match cli.command {
        Commands::Serve => commands::serve_command(config).await,
        Commands::Analyze { description } => {
            commands::analyze_command(config, description.join(" ")).await
        }
        Commands::Test => commands::test_command(config).await,
    }
}
