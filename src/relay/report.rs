//! 处置建议的类型化视图
//!
//! HTTP 响应始终原样返回提取出的 JSON；这里的结构只用于日志和命令行展示，
//! 所有字段都有默认值，模型漏掉字段不会导致解析失败。

use serde::Deserialize;
use serde_json::{Map, Value};

/// 一次分析的结果（多条目格式）
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DisposalReport {
    #[serde(default)]
    pub waste_items: Vec<WasteItem>,
}

/// 单个废弃物条目
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct WasteItem {
    pub item: String,
    pub classification: String,
    #[serde(deserialize_with = "one_or_many")]
    pub sub_classification: Vec<String>,
    #[serde(deserialize_with = "one_or_many")]
    pub disposal_methods: Vec<String>,
    #[serde(deserialize_with = "one_or_many")]
    pub safety_precautions: Vec<String>,
    #[serde(deserialize_with = "one_or_many")]
    pub recycling_options: Vec<String>,
    pub clarification_needed: Option<String>,
}

impl DisposalReport {
    /// 尽力把 JSON 对象解读为报告，格式不符时得到空报告
    pub fn from_object(object: &Map<String, Value>) -> Self {
        serde_json::from_value(Value::Object(object.clone())).unwrap_or_default()
    }

    pub fn item_count(&self) -> usize {
        self.waste_items.len()
    }

    /// 需要向用户追问的条目
    pub fn needs_clarification(&self) -> impl Iterator<Item = &WasteItem> {
        self.waste_items.iter().filter(|item| {
            item.clarification_needed
                .as_deref()
                .is_some_and(|q| !q.trim().is_empty())
        })
    }
}

/// 模型有时把列表字段写成单个字符串，或者写成 null
fn one_or_many<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum OneOrMany {
        One(String),
        Many(Vec<String>),
    }

    Ok(match Option::<OneOrMany>::deserialize(deserializer)? {
        None => Vec::new(),
        Some(OneOrMany::One(s)) => vec![s],
        Some(OneOrMany::Many(v)) => v,
    })
}
