use reqwest::Client;
use std::sync::OnceLock;
use std::time::Duration;

/// 是否禁用 TLS 验证（用于调试 mitmproxy 等场景）
pub fn should_disable_tls_verify() -> bool {
    std::env::var("WASTEWISE_DISABLE_TLS_VERIFY")
        .map(|v| v == "1" || v.eq_ignore_ascii_case("true"))
        .unwrap_or(false)
}

/// 获取共享的 HTTP 客户端（用于 CLI 向本地服务器发请求等）
static SHARED_CLIENT: OnceLock<Client> = OnceLock::new();

pub fn get_shared_client() -> &'static Client {
    SHARED_CLIENT.get_or_init(|| {
        Client::builder()
            .timeout(Duration::from_secs(180))
            .build()
            .expect("Failed to create HTTP client")
    })
}
