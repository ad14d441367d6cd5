use eda_copilot_protocol::AnalysisRequest;
use eda_copilot_protocol::MultiLogAnalysisResult;
use tracing::debug;
use tracing::trace;

use crate::error::Result;
use crate::extract::parse_analysis;
use crate::model_provider::ModelProviderInfo;
use crate::model_provider::WireApi;
use crate::payload::PayloadBuilder;
use crate::payload::chat::ChatPayloadBuilder;
use crate::payload::gemini::GeminiPayloadBuilder;
use crate::prompt::Prompt;

pub mod http;

#[derive(Clone)]
/// Configuration for [`AnalysisClient`].
///
/// - `http_client`: Reqwest client used for HTTP requests.
/// - `provider`: Provider configuration (base URL, credential env var, headers).
/// - `model`: Model name sent to the provider.
pub struct AnalysisClientConfig {
    pub http_client: reqwest::Client,
    pub provider: ModelProviderInfo,
    pub model: String,
}

#[derive(Clone)]
pub struct AnalysisClient {
    config: AnalysisClientConfig,
    api_key: Option<String>,
}

impl AnalysisClient {
    /// Resolve the provider credential up front; a missing key fails here,
    /// before any request is attempted.
    pub fn new(config: AnalysisClientConfig) -> Result<Self> {
        let api_key = config.provider.api_key()?;
        Ok(Self { config, api_key })
    }

    /// Send one batch to the model and parse its reply.
    pub async fn analyze(&self, request: &AnalysisRequest) -> Result<MultiLogAnalysisResult> {
        let prompt = Prompt::for_request(request);
        let text = self.complete(&prompt).await?;
        debug!(reply_len = text.len(), "received analysis reply");
        parse_analysis(&text)
    }

    /// Single request/response round trip returning the raw reply text.
    pub async fn complete(&self, prompt: &Prompt) -> Result<String> {
        let provider = &self.config.provider;
        let payload = self.payload_builder().build(prompt)?;

        trace!(
            "POST to {}: {}",
            provider.get_full_url(&self.config.model),
            serde_json::to_string(&payload)
                .unwrap_or_else(|_| "<unable to serialize payload>".to_string())
        );

        let response = http::build_request(
            &self.config.http_client,
            provider,
            &self.config.model,
            self.api_key.as_deref(),
        )
        .json(&payload)
        .send()
        .await?;

        let body = http::read_json_body(response).await?;
        Ok(crate::decode::reply_text(provider.wire_api, &body))
    }

    fn payload_builder(&self) -> Box<dyn PayloadBuilder + Send + Sync> {
        match self.config.provider.wire_api {
            WireApi::Gemini => Box::new(GeminiPayloadBuilder::new()),
            WireApi::Chat => Box::new(ChatPayloadBuilder::new(self.config.model.clone())),
        }
    }
}
