use serde_json::Value;
use serde_json::json;

use crate::error::Result;
use crate::payload::PayloadBuilder;
use crate::prompt::Prompt;

const SCHEMA_NAME: &str = "tape_out_review";

pub struct ChatPayloadBuilder {
    model: String,
}

impl ChatPayloadBuilder {
    pub fn new(model: String) -> Self {
        Self { model }
    }
}

impl PayloadBuilder for ChatPayloadBuilder {
    fn build(&self, prompt: &Prompt) -> Result<Value> {
        let messages = vec![
            json!({ "role": "system", "content": prompt.instructions }),
            json!({ "role": "user", "content": prompt.input }),
        ];

        // Not every field is required by the schema, which rules out
        // OpenAI's strict structured-output mode.
        Ok(json!({
            "model": self.model,
            "messages": messages,
            "max_tokens": prompt.max_output_tokens,
            "stream": false,
            "response_format": {
                "type": "json_schema",
                "json_schema": {
                    "name": SCHEMA_NAME,
                    "schema": prompt.output_schema,
                    "strict": false,
                }
            }
        }))
    }
}
