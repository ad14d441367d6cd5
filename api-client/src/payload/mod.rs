use serde_json::Value;

use crate::error::Result;
use crate::prompt::Prompt;

pub mod chat;
pub mod gemini;

/// Turns a provider-neutral [`Prompt`] into a wire-specific JSON body.
pub trait PayloadBuilder {
    fn build(&self, prompt: &Prompt) -> Result<Value>;
}
