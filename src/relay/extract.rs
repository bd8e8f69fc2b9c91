//! 从模型回复中提取 JSON
//!
//! 回复里可能夹杂说明文字或 markdown 代码块。这里取第一个 `{` 到最后一个 `}`
//! 之间的文本（跨行、贪婪匹配）整体解析；回复中存在多个独立对象，
//! 或字符串值里有不配对的花括号时会提取失败。

use regex::Regex;
use serde_json::{Map, Value};
use std::sync::OnceLock;

static OBJECT_SPAN: OnceLock<Regex> = OnceLock::new();

fn object_span() -> &'static Regex {
    OBJECT_SPAN.get_or_init(|| Regex::new(r"(?s)\{.*\}").expect("valid object span pattern"))
}

/// 提取回复中的 JSON 对象
///
/// 找不到花括号区间或区间内容不是合法 JSON 时返回 `None`
pub fn extract_json(text: &str) -> Option<Map<String, Value>> {
    let span = object_span().find(text)?;
    match serde_json::from_str::<Value>(span.as_str()) {
        Ok(Value::Object(map)) => Some(map),
        Ok(_) => None,
        Err(e) => {
            tracing::debug!(error = %e, "reply span is not valid JSON");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn plain_object() {
        let map = extract_json(r#"{"a": 1}"#).unwrap();
        assert_eq!(Value::Object(map), json!({"a": 1}));
    }

    #[test]
    fn object_surrounded_by_prose() {
        let text = "Here is the result:\n{\"waste_items\":[{\"item\":\"banana peel\",\"classification\":\"organic\"}]} Thanks!";
        let map = extract_json(text).unwrap();
        assert_eq!(
            Value::Object(map),
            json!({"waste_items": [{"item": "banana peel", "classification": "organic"}]})
        );
    }

    #[test]
    fn object_inside_markdown_fence() {
        let text = "```json\n{\n  \"waste_items\": [\n    {\"item\": \"can\"}\n  ]\n}\n```";
        let map = extract_json(text).unwrap();
        assert_eq!(Value::Object(map), json!({"waste_items": [{"item": "can"}]}));
    }

    #[test]
    fn nested_braces_are_kept() {
        let text = r#"ok {"outer": {"inner": {"deep": true}}} done"#;
        let map = extract_json(text).unwrap();
        assert_eq!(map["outer"]["inner"]["deep"], json!(true));
    }

    #[test]
    fn no_braces_is_none() {
        assert!(extract_json("I cannot help with that.").is_none());
        assert!(extract_json("").is_none());
    }

    #[test]
    fn unparseable_span_is_none() {
        assert!(extract_json("{not json at all}").is_none());
        assert!(extract_json(r#"{"a": 1,}"#).is_none());
    }

    #[test]
    fn two_separate_objects_are_not_merged() {
        // 贪婪匹配会把两个对象连同中间文本一起截取
        assert!(extract_json(r#"{"a": 1} and also {"b": 2}"#).is_none());
    }

    #[test]
    fn unbalanced_brace_in_trailing_prose_breaks_extraction() {
        assert!(extract_json(r#"{"a": 1} see note }"#).is_none());
    }

    #[test]
    fn truncated_reply_is_none() {
        assert!(extract_json(r#"{"waste_items": [{"item": "cup""#).is_none());
    }
}
