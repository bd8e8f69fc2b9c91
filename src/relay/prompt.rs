//! 提示词构建

const PROMPT_HEADER: &str = r#"You are an intelligent waste management assistant.
The user may provide a single waste item or multiple items separated by commas/spaces.
For **each item separately**, classify it and provide multiple safe, eco-friendly, advanced, and legal disposal methods.

Return the result in valid JSON only, with this structure:

{
    "waste_items": [
        {
            "item": "name of the waste item",
            "classification": "broad_category",
            "sub_classification": ["possible_sub_categories_if_any"],
            "disposal_methods": [
                "method1 - short explanation",
                "method2 - short explanation",
                "innovative/advanced method - short explanation"
            ],
            "safety_precautions": [
                "precaution1",
                "precaution2"
            ],
            "recycling_options": [
                "option1",
                "option2"
            ],
            "clarification_needed": "Question to ask user if item description is vague"
        }
    ]
}

Guidelines:
- If multiple items are given, repeat this structure for each one inside "waste_items".
- Always return all possible solutions, not just one.
- Prefer advanced and sustainable solutions.
- If an item is unclear, add a clarifying question in "clarification_needed".
- Respond ONLY with valid JSON, no extra text or markdown.

Waste description: "#;

/// 为一段废弃物描述构建完整的提示词
pub fn build_prompt(description: &str) -> String {
    let mut prompt = String::with_capacity(PROMPT_HEADER.len() + description.len());
    prompt.push_str(PROMPT_HEADER);
    prompt.push_str(description);
    prompt
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ends_with_description() {
        let prompt = build_prompt("banana peel");
        assert!(prompt.ends_with("Waste description: banana peel"));
        assert_eq!(prompt.matches("banana peel").count(), 1);
    }

    #[test]
    fn asks_for_multi_item_json() {
        let prompt = build_prompt("battery, glass jar");
        assert!(prompt.contains("\"waste_items\""));
        assert!(prompt.contains("clarification_needed"));
        assert!(prompt.contains("Respond ONLY with valid JSON"));
    }

    #[test]
    fn is_deterministic() {
        assert_eq!(build_prompt("old phone"), build_prompt("old phone"));
    }
}
