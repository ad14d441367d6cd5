use reqwest::StatusCode;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("missing env var {var}: {instructions:?}")]
    MissingEnvVar {
        var: String,
        instructions: Option<String>,
    },
    #[error(transparent)]
    Http(#[from] reqwest::Error),
    #[error("unexpected status {status}: {body}")]
    UnexpectedStatus { status: StatusCode, body: String },
    /// The HTTP envelope itself (not the model's text) could not be decoded.
    #[error("unexpected response from model provider: {0}")]
    UnexpectedResponse(String),
    /// The model's reply contains no `{ ... }` span.
    #[error("Analysis engine failed to produce a valid JSON stream.")]
    MalformedResponse,
    /// The extracted `{ ... }` span is not valid JSON.
    #[error("failed to parse analysis JSON: {0}")]
    JsonParse(#[source] serde_json::Error),
}
