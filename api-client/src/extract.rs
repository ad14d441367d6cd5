//! Recover the analysis JSON object from free-form model output.

use std::sync::OnceLock;

use eda_copilot_protocol::MultiLogAnalysisResult;
use serde_json::Value;
use tracing::debug;

use crate::error::Error;
use crate::error::Result;

fn end_marker_regex() -> &'static regex_lite::Regex {
    static RE: OnceLock<regex_lite::Regex> = OnceLock::new();
    #[expect(clippy::unwrap_used)]
    RE.get_or_init(|| regex_lite::Regex::new(r"End-of-[a-zA-Z-]+").unwrap())
}

/// Remove `End-of-...` marker tokens the model sometimes emits, then trim.
pub fn strip_end_markers(text: &str) -> String {
    end_marker_regex().replace_all(text, "").trim().to_string()
}

/// The substring from the first `{` through the last `}`, if both exist in
/// that order.
pub fn extract_json_object(text: &str) -> Option<&str> {
    let (Some(start), Some(end)) = (text.find('{'), text.rfind('}')) else {
        return None;
    };
    if start > end {
        return None;
    }
    text.get(start..=end)
}

/// Parse model output into a result.
///
/// A reply that is already a bare JSON object is used as is. Otherwise the
/// span between the first `{` and the last `}` is parsed, which tolerates
/// prose or code fences around the object.
pub fn parse_analysis(text: &str) -> Result<MultiLogAnalysisResult> {
    let cleaned = strip_end_markers(text);

    if let Ok(value @ Value::Object(_)) = serde_json::from_str::<Value>(&cleaned) {
        return serde_json::from_value(value).map_err(Error::JsonParse);
    }

    let Some(span) = extract_json_object(&cleaned) else {
        debug!(len = cleaned.len(), "model reply contains no JSON object");
        return Err(Error::MalformedResponse);
    };
    if span.len() != cleaned.len() {
        debug!(
            span_len = span.len(),
            total_len = cleaned.len(),
            "trimmed prose around model JSON"
        );
    }
    let value: Value = serde_json::from_str(span).map_err(Error::JsonParse)?;
    serde_json::from_value(value).map_err(Error::JsonParse)
}
