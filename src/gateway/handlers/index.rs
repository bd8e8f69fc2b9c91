//! 首页

use axum::response::Html;

const INDEX_HTML: &str = include_str!("../../../assets/index.html");

/// GET /
pub async fn handle_index() -> Html<&'static str> {
    Html(INDEX_HTML)
}
