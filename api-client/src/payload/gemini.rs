use serde_json::Value;
use serde_json::json;

use crate::error::Result;
use crate::payload::PayloadBuilder;
use crate::prompt::Prompt;
use crate::schema::to_gemini_schema;

/// Body for `models/{model}:generateContent`. The model name is part of the
/// URL, not the body.
#[derive(Default)]
pub struct GeminiPayloadBuilder;

impl GeminiPayloadBuilder {
    pub fn new() -> Self {
        Self
    }
}

impl PayloadBuilder for GeminiPayloadBuilder {
    fn build(&self, prompt: &Prompt) -> Result<Value> {
        Ok(json!({
            "systemInstruction": {
                "parts": [{ "text": prompt.instructions }]
            },
            "contents": [{
                "role": "user",
                "parts": [{ "text": prompt.input }]
            }],
            "generationConfig": {
                "responseMimeType": "application/json",
                "responseSchema": to_gemini_schema(&prompt.output_schema),
                "maxOutputTokens": prompt.max_output_tokens,
            }
        }))
    }
}
