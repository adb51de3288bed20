//! Read-only preview of a task payload.

use serde_json::{Map, Value};

/// Keys tried, in order, when pulling the prompt out of a payload object.
const PROMPT_KEYS: [&str; 3] = ["prompt", "prompt_text", "prompt_path"];

/// Text shown in the payload preview of the detail modal.
///
/// String payloads are parsed as JSON first. From an object the first
/// non-empty prompt field wins; a string that does not hold such an object is
/// shown as-is, and an object without prompt fields is shown as JSON.
pub fn payload_preview(payload: &Value) -> String {
    match payload {
        Value::Null => String::new(),
        Value::String(raw) => match serde_json::from_str::<Value>(raw) {
            Ok(Value::Object(map)) => prompt_field(&map).unwrap_or_else(|| raw.clone()),
            _ => raw.clone(),
        },
        Value::Object(map) => prompt_field(map).unwrap_or_else(|| {
            serde_json::to_string_pretty(payload).unwrap_or_else(|_| payload.to_string())
        }),
        other => other.to_string(),
    }
}

fn prompt_field(map: &Map<String, Value>) -> Option<String> {
    PROMPT_KEYS.iter().find_map(|key| match map.get(*key)? {
        Value::Null => None,
        Value::String(text) if text.is_empty() => None,
        Value::String(text) => Some(text.clone()),
        other => Some(other.to_string()),
    })
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::payload_preview;

    #[test]
    fn prompt_keys_in_priority_order() {
        assert_eq!(payload_preview(&json!({"prompt_text": "hi"})), "hi");
        assert_eq!(
            payload_preview(&json!({"prompt_path": "/p.md", "prompt_text": "text", "prompt": "first"})),
            "first"
        );
        assert_eq!(payload_preview(&json!({"prompt": "", "prompt_path": "/p.md"})), "/p.md");
    }

    #[test]
    fn string_payloads_are_parsed_or_shown_raw() {
        assert_eq!(payload_preview(&json!("not json")), "not json");
        assert_eq!(payload_preview(&json!(r#"{"prompt":"from string"}"#)), "from string");
        assert_eq!(payload_preview(&json!(r#"{"other":1}"#)), r#"{"other":1}"#);
        assert_eq!(payload_preview(&json!("[1,2]")), "[1,2]");
    }

    #[test]
    fn objects_without_prompt_are_serialised() {
        assert_eq!(payload_preview(&json!({})), "{}");
        assert_eq!(payload_preview(&json!({"a": 1})), "{\n  \"a\": 1\n}");
    }

    #[test]
    fn null_and_scalars() {
        assert_eq!(payload_preview(&json!(null)), "");
        assert_eq!(payload_preview(&json!(7)), "7");
    }
}
