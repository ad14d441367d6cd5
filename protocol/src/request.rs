use serde::Deserialize;
use serde::Serialize;

/// One uploaded log file. Created per upload and consumed by one request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogInput {
    pub name: String,
    pub content: String,
}

impl LogInput {
    pub fn new(name: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            content: content.into(),
        }
    }
}

/// Everything sent to the analysis model for one batch. Never persisted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisRequest {
    pub logs: Vec<LogInput>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_question: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub historical_context: Option<String>,
}

impl AnalysisRequest {
    pub fn file_names(&self) -> Vec<&str> {
        self.logs.iter().map(|log| log.name.as_str()).collect()
    }
}
