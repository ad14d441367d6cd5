use serde_json::Value;
use tracing::debug;

/// Concatenate the text parts of the first candidate.
pub fn reply_text(body: &Value) -> String {
    let Some(candidate) = body
        .get("candidates")
        .and_then(Value::as_array)
        .and_then(|candidates| candidates.first())
    else {
        debug!(
            prompt_feedback = ?body.get("promptFeedback"),
            "generateContent response has no candidates"
        );
        return String::new();
    };

    if let Some(reason) = candidate.get("finishReason").and_then(Value::as_str)
        && reason != "STOP"
    {
        debug!(finish_reason = reason, "generateContent candidate did not finish cleanly");
    }

    candidate
        .get("content")
        .and_then(|content| content.get("parts"))
        .and_then(Value::as_array)
        .map(|parts| {
            parts
                .iter()
                .filter(|part| !part.get("thought").and_then(Value::as_bool).unwrap_or(false))
                .filter_map(|part| part.get("text").and_then(Value::as_str))
                .collect::<String>()
        })
        .unwrap_or_default()
}
