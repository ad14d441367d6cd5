use serde_json::Value;

/// `choices[0].message.content`, either a plain string or an array of
/// `{ "type": "text", "text": ... }` parts.
pub fn reply_text(body: &Value) -> String {
    let content = body
        .get("choices")
        .and_then(Value::as_array)
        .and_then(|choices| choices.first())
        .and_then(|choice| choice.get("message"))
        .and_then(|message| message.get("content"));

    match content {
        Some(Value::String(text)) => text.clone(),
        Some(Value::Array(parts)) => parts
            .iter()
            .filter_map(|part| part.get("text").and_then(Value::as_str))
            .collect(),
        _ => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn reads_string_content() {
        let body = json!({"choices": [{"message": {"role": "assistant", "content": "{\"overallVerdict\":\"GO\"}"}}]});
        assert_eq!(reply_text(&body), "{\"overallVerdict\":\"GO\"}");
    }

    #[test]
    fn joins_content_parts() {
        let body = json!({"choices": [{"message": {"content": [
            {"type": "text", "text": "{\"a\":"},
            {"type": "text", "text": "2}"}
        ]}}]});
        assert_eq!(reply_text(&body), "{\"a\":2}");
    }

    #[test]
    fn refusal_or_missing_content_is_empty() {
        assert_eq!(
            reply_text(&json!({"choices": [{"message": {"content": null, "refusal": "no"}}]})),
            ""
        );
        assert_eq!(reply_text(&json!({})), "");
    }
}
