use serde::Deserialize;
use serde::Serialize;

use crate::MultiLogAnalysisResult;

/// A saved analysis. Immutable once created.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub id: String,
    /// Milliseconds since the Unix epoch.
    pub timestamp: i64,
    pub label: String,
    pub result: MultiLogAnalysisResult,
}

impl HistoryEntry {
    /// Human label summarising file count and verdict, e.g.
    /// `Review of 3 files (NO-GO)`.
    pub fn label_for(result: &MultiLogAnalysisResult) -> String {
        format!(
            "Review of {} files ({})",
            result.logs.len(),
            result.verdict_label()
        )
    }
}
