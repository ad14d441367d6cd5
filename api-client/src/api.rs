use async_trait::async_trait;
use eda_copilot_protocol::AnalysisRequest;
use eda_copilot_protocol::MultiLogAnalysisResult;

use crate::client::AnalysisClient;
use crate::error::Result;

/// Seam between the submission pipeline and the hosted model.
#[async_trait]
pub trait Analyzer: Send + Sync {
    async fn analyze(&self, request: &AnalysisRequest) -> Result<MultiLogAnalysisResult>;
}

#[async_trait]
impl Analyzer for AnalysisClient {
    async fn analyze(&self, request: &AnalysisRequest) -> Result<MultiLogAnalysisResult> {
        AnalysisClient::analyze(self, request).await
    }
}
