use std::path::PathBuf;

use eda_copilot_api_client::Error as ApiError;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, CopilotErr>;

/// Message shown for every failure to recover a result from the model's
/// reply, whichever step failed.
pub const INVALID_JSON_STREAM_MESSAGE: &str =
    "Analysis engine failed to produce a valid JSON stream.";

#[derive(Error, Debug)]
pub enum CopilotErr {
    /// A selected file could not be read. The whole batch is abandoned.
    #[error("failed to read {}: {source}", path.display())]
    InputRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The analysis call failed before a reply could be read.
    #[error("{0}")]
    Transport(String),

    /// The reply contains no `{ ... }` span.
    #[error("model reply contains no JSON object")]
    MalformedResponse,

    /// The extracted span is not valid JSON.
    #[error("model reply is not valid JSON: {0}")]
    JsonParse(String),

    #[error("missing API key: set {var}{}", instructions_suffix(instructions))]
    MissingCredential {
        var: String,
        instructions: Option<String>,
    },

    /// A batch is already being analyzed.
    #[error("an analysis is already in progress")]
    Busy,

    /// The last batch failed; the session must be reset first.
    #[error("session halted; reset before submitting again")]
    SessionHalted,

    #[error("no stored analysis matches `{0}`")]
    HistoryNotFound(String),

    #[error("`{0}` matches more than one stored analysis")]
    AmbiguousHistoryId(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("invalid configuration: {0}")]
    Config(String),
}

fn instructions_suffix(instructions: &Option<String>) -> String {
    instructions
        .as_deref()
        .map(|i| format!(" ({i})"))
        .unwrap_or_default()
}

impl CopilotErr {
    /// Text for the halted banner. Parse failures collapse into one generic
    /// message; transport errors keep the provider's wording.
    pub fn user_message(&self) -> String {
        match self {
            Self::MalformedResponse | Self::JsonParse(_) => INVALID_JSON_STREAM_MESSAGE.to_string(),
            other => other.to_string(),
        }
    }
}

impl From<ApiError> for CopilotErr {
    fn from(err: ApiError) -> Self {
        match err {
            ApiError::MissingEnvVar { var, instructions } => {
                Self::MissingCredential { var, instructions }
            }
            ApiError::MalformedResponse => Self::MalformedResponse,
            ApiError::JsonParse(err) => Self::JsonParse(err.to_string()),
            err @ (ApiError::Http(_)
            | ApiError::UnexpectedStatus { .. }
            | ApiError::UnexpectedResponse(_)) => Self::Transport(err.to_string()),
        }
    }
}
