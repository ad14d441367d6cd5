use std::time::Duration;

use serde_json::Value;

use crate::error::Error;
use crate::error::Result;
use crate::model_provider::ModelProviderInfo;

const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);
const ERROR_SNIPPET_CHARS: usize = 200;

/// HTTP client shared by every analysis request. Only the connect phase is
/// bounded; the request itself waits for the provider unless the provider
/// sets `request_timeout_ms`.
pub fn default_http_client() -> Result<reqwest::Client> {
    let version = env!("CARGO_PKG_VERSION");
    reqwest::Client::builder()
        .user_agent(format!("eda-copilot/{version}"))
        .connect_timeout(CONNECT_TIMEOUT)
        .build()
        .map_err(Error::from)
}

/// Build a request builder with provider/auth headers applied.
pub fn build_request(
    http_client: &reqwest::Client,
    provider: &ModelProviderInfo,
    model: &str,
    api_key: Option<&str>,
) -> reqwest::RequestBuilder {
    provider.create_request_builder(http_client, model, api_key)
}

/// Read a provider response as JSON, turning non-2xx statuses into
/// [`Error::UnexpectedStatus`].
pub async fn read_json_body(response: reqwest::Response) -> Result<Value> {
    let status = response.status();
    let body = response.text().await?;
    if !status.is_success() {
        return Err(Error::UnexpectedStatus { status, body });
    }
    serde_json::from_str(&body).map_err(|err| {
        let snippet = body.chars().take(ERROR_SNIPPET_CHARS).collect::<String>();
        Error::UnexpectedResponse(format!("{err}; body starts with: {snippet:?}"))
    })
}
