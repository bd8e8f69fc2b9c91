//! Gateway 应用层
//!
//! HTTP 服务器和请求处理

mod handlers;
mod middleware;
mod state;

pub use state::AppState;

use anyhow::Result;
use axum::{
    error_handling::HandleErrorLayer,
    middleware as axum_middleware,
    routing::{get, post},
    Router,
};
use std::net::SocketAddr;
use tokio::signal;
use tower::{timeout::TimeoutLayer, ServiceBuilder};
use tower_http::{catch_panic::CatchPanicLayer, trace::TraceLayer};

use crate::config::Config;
use crate::relay::Relay;
use crate::upstream;

pub async fn serve(config: Config) -> Result<()> {
    let model = upstream::connect(&config).await;
    if model.is_none() {
        tracing::warn!("Starting without Gemini; /api/analyze-waste will be rejected");
    }

    let state = AppState::new(Relay::new(model, config.request_interval));
    let app = build_router(state, &config);
    let addr: SocketAddr = format!("{}:{}", config.host, config.port).parse()?;
    tracing::info!("Starting server on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server shutdown complete");
    Ok(())
}

fn build_router(state: AppState, config: &Config) -> Router {
    let routes = Router::new()
        .route("/", get(handlers::handle_index))
        .route("/api/health", get(handlers::handle_health))
        .route("/api/analyze-waste", post(handlers::handle_analyze_waste));

    with_layers(routes, config).with_state(state)
}

/// 日志、超时和 panic 兜底；超时与 panic 都返回 `{"error": ...}` 响应体
fn with_layers(routes: Router<AppState>, config: &Config) -> Router<AppState> {
    routes.layer(
        ServiceBuilder::new()
            .layer(axum_middleware::from_fn(middleware::request_logger))
            .layer(TraceLayer::new_for_http())
            .layer(HandleErrorLayer::new(middleware::handle_layer_error))
            .layer(TimeoutLayer::new(config.request_timeout))
            .layer(CatchPanicLayer::custom(middleware::panic_response)),
    )
}

async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(unix)]
    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    #[cfg(not(unix))]
    tokio::select! {
        _ = ctrl_c => {},
    }

    tracing::info!("Shutdown signal received, starting graceful shutdown...");
}
