//! Analyze 命令 - 在本进程内执行一次分析
//!
//! 与 HTTP 接口走同一个 relay，不需要启动服务器。

use anyhow::{Context, Result};
use serde_json::Value;

use crate::config::Config;
use crate::relay::{DisposalReport, Relay, WasteItem};
use crate::upstream;

/// 执行分析命令
///
/// 输出提取出的 JSON 以及每个条目的简要摘要；relay 返回错误时以非零状态退出
pub async fn analyze_command(config: Config, description: String) -> Result<()> {
    let model = upstream::connect(&config).await;
    let relay = Relay::new(model, config.request_interval);

    let object = relay
        .analyze(&description)
        .await
        .with_context(|| format!("Analysis failed for {:?}", description.trim()))?;

    let report = DisposalReport::from_object(&object);
    println!("{}", serde_json::to_string_pretty(&Value::Object(object))?);

    if report.item_count() > 0 {
        println!();
        for item in &report.waste_items {
            println!("{}", summarize(item));
        }
    }

    Ok(())
}

fn summarize(item: &WasteItem) -> String {
    let mut line = format!(
        "- {} [{}]: {} disposal method(s), {} recycling option(s)",
        item.item,
        item.classification,
        item.disposal_methods.len(),
        item.recycling_options.len()
    );
    if let Some(question) = item
        .clarification_needed
        .as_deref()
        .filter(|q| !q.trim().is_empty())
    {
        line.push_str(&format!("\n  ? {}", question));
    }
    line
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn summary_includes_clarification() {
        let item = WasteItem {
            item: "battery".to_string(),
            classification: "hazardous".to_string(),
            disposal_methods: vec!["drop-off".to_string()],
            clarification_needed: Some("Lithium or alkaline?".to_string()),
            ..Default::default()
        };
        assert_eq!(
            summarize(&item),
            "- battery [hazardous]: 1 disposal method(s), 0 recycling option(s)\n  ? Lithium or alkaline?"
        );
    }

    #[test]
    fn summary_skips_blank_clarification() {
        let item = WasteItem {
            item: "can".to_string(),
            classification: "metal".to_string(),
            clarification_needed: Some(" ".to_string()),
            ..Default::default()
        };
        assert!(!summarize(&item).contains('?'));
    }
}
