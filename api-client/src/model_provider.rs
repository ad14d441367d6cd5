use std::collections::HashMap;
use std::env::VarError;
use std::time::Duration;

use serde::Deserialize;
use serde::Serialize;

use crate::error::Error;
use crate::error::Result;

pub const BUILT_IN_GEMINI_PROVIDER_ID: &str = "gemini";
pub const BUILT_IN_OPENAI_PROVIDER_ID: &str = "openai";

const DEFAULT_GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
const DEFAULT_OPENAI_BASE_URL: &str = "https://api.openai.com/v1";
const GEMINI_API_KEY_HEADER: &str = "x-goog-api-key";

/// Wire protocol that the provider speaks.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WireApi {
    /// Google `models/{model}:generateContent`.
    #[default]
    Gemini,
    /// OpenAI-compatible `/chat/completions`.
    Chat,
}

/// Serializable representation of a provider definition, as found under
/// `[model_providers.<id>]` in `config.toml`.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct ModelProviderInfo {
    /// Friendly display name.
    pub name: String,
    /// Base URL for the provider's API.
    pub base_url: Option<String>,
    /// Environment variable that stores the API key for this provider.
    pub env_key: Option<String>,
    /// Optional instructions to help the user set the environment variable.
    pub env_key_instructions: Option<String>,
    /// API key to use as is. Prefer `env_key` when possible.
    pub experimental_api_key: Option<String>,
    /// Which wire protocol this provider expects.
    #[serde(default)]
    pub wire_api: WireApi,
    /// Optional query parameters to append to the request URL.
    pub query_params: Option<HashMap<String, String>>,
    /// Additional static HTTP headers to include in requests.
    pub http_headers: Option<HashMap<String, String>>,
    /// Optional HTTP headers whose values come from environment variables.
    pub env_http_headers: Option<HashMap<String, String>>,
    /// Overall timeout for the analysis request. Unset means wait for the
    /// provider indefinitely.
    pub request_timeout_ms: Option<u64>,
}

impl ModelProviderInfo {
    fn get_query_string(&self) -> String {
        self.query_params
            .as_ref()
            .map_or_else(String::new, |params| {
                let mut pairs = params
                    .iter()
                    .map(|(k, v)| format!("{k}={v}"))
                    .collect::<Vec<_>>();
                pairs.sort();
                format!("?{}", pairs.join("&"))
            })
    }

    pub fn get_full_url(&self, model: &str) -> String {
        let default_base_url = match self.wire_api {
            WireApi::Gemini => DEFAULT_GEMINI_BASE_URL,
            WireApi::Chat => DEFAULT_OPENAI_BASE_URL,
        };
        let base_url = self
            .base_url
            .clone()
            .unwrap_or_else(|| default_base_url.to_string());
        let base_url = base_url.trim_end_matches('/');
        let query_string = self.get_query_string();

        match self.wire_api {
            WireApi::Gemini => format!("{base_url}/models/{model}:generateContent{query_string}"),
            WireApi::Chat => format!("{base_url}/chat/completions{query_string}"),
        }
    }

    /// Build a `POST` request with auth and configured headers applied.
    pub fn create_request_builder(
        &self,
        client: &reqwest::Client,
        model: &str,
        api_key: Option<&str>,
    ) -> reqwest::RequestBuilder {
        let mut builder = client.post(self.get_full_url(model));

        if let Some(key) = api_key {
            builder = match self.wire_api {
                WireApi::Gemini => builder.header(GEMINI_API_KEY_HEADER, key),
                WireApi::Chat => builder.bearer_auth(key),
            };
        }
        if let Some(timeout) = self.request_timeout() {
            builder = builder.timeout(timeout);
        }

        self.apply_http_headers(builder)
    }

    fn apply_http_headers(&self, mut builder: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        if let Some(extra) = &self.http_headers {
            for (k, v) in extra {
                builder = builder.header(k, v);
            }
        }

        if let Some(env_headers) = &self.env_http_headers {
            for (header, env_var) in env_headers {
                if let Ok(val) = std::env::var(env_var)
                    && !val.trim().is_empty()
                {
                    builder = builder.header(header, val);
                }
            }
        }
        builder
    }

    /// Resolve the API key: `experimental_api_key` first, then the variable
    /// named by `env_key`. A provider with neither needs no credential.
    pub fn api_key(&self) -> Result<Option<String>> {
        if let Some(key) = &self.experimental_api_key {
            return Ok(Some(key.clone()));
        }
        match &self.env_key {
            Some(env_key) => {
                let env_value = std::env::var(env_key);
                env_value
                    .and_then(|v| {
                        if v.trim().is_empty() {
                            Err(VarError::NotPresent)
                        } else {
                            Ok(Some(v))
                        }
                    })
                    .map_err(|_| Error::MissingEnvVar {
                        var: env_key.clone(),
                        instructions: self.env_key_instructions.clone(),
                    })
            }
            None => Ok(None),
        }
    }

    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_ms.map(Duration::from_millis)
    }
}

pub fn built_in_model_providers() -> HashMap<String, ModelProviderInfo> {
    use ModelProviderInfo as P;

    [
        (
            BUILT_IN_GEMINI_PROVIDER_ID,
            P {
                name: "Gemini".into(),
                base_url: std::env::var("GEMINI_BASE_URL")
                    .ok()
                    .filter(|v| !v.trim().is_empty()),
                env_key: Some("API_KEY".into()),
                env_key_instructions: Some(
                    "Export API_KEY with a Gemini API key before running an analysis.".into(),
                ),
                experimental_api_key: None,
                wire_api: WireApi::Gemini,
                query_params: None,
                http_headers: None,
                env_http_headers: None,
                request_timeout_ms: None,
            },
        ),
        (
            BUILT_IN_OPENAI_PROVIDER_ID,
            P {
                name: "OpenAI".into(),
                base_url: std::env::var("OPENAI_BASE_URL")
                    .ok()
                    .filter(|v| !v.trim().is_empty()),
                env_key: Some("OPENAI_API_KEY".into()),
                env_key_instructions: None,
                experimental_api_key: None,
                wire_api: WireApi::Chat,
                query_params: None,
                http_headers: None,
                env_http_headers: Some(
                    [
                        (
                            "OpenAI-Organization".to_string(),
                            "OPENAI_ORGANIZATION".to_string(),
                        ),
                        ("OpenAI-Project".to_string(), "OPENAI_PROJECT".to_string()),
                    ]
                    .into_iter()
                    .collect(),
                ),
                request_timeout_ms: None,
            },
        ),
    ]
    .into_iter()
    .map(|(k, v)| (k.to_string(), v))
    .collect()
}
