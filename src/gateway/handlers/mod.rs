//! HTTP 请求处理器

pub mod analyze;
pub mod health;
pub mod index;

pub use analyze::handle_analyze_waste;
pub use health::handle_health;
pub use index::handle_index;
