//! Pull the model's reply text out of a provider response envelope.
//!
//! A reply without text decodes to an empty string; the caller then fails
//! with `MalformedResponse` when no JSON object can be found in it.

use serde_json::Value;

use crate::model_provider::WireApi;

pub mod chat;
pub mod gemini;

pub fn reply_text(wire_api: WireApi, body: &Value) -> String {
    match wire_api {
        WireApi::Gemini => gemini::reply_text(body),
        WireApi::Chat => chat::reply_text(body),
    }
}
