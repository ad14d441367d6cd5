//! Client for the hosted model that reviews EDA tool logs.
//!
//! One [`AnalysisRequest`](eda_copilot_protocol::AnalysisRequest) becomes
//! exactly one HTTP request. There is no chunking and no retry: a failed
//! call surfaces directly to the caller.

pub mod api;
pub mod client;
pub mod decode;
pub mod error;
pub mod extract;
pub mod model_provider;
pub mod payload;
pub mod prompt;
pub mod schema;

pub use crate::api::Analyzer;
pub use crate::client::AnalysisClient;
pub use crate::client::AnalysisClientConfig;
pub use crate::error::Error;
pub use crate::error::Result;
pub use crate::extract::parse_analysis;
pub use crate::model_provider::BUILT_IN_GEMINI_PROVIDER_ID;
pub use crate::model_provider::BUILT_IN_OPENAI_PROVIDER_ID;
pub use crate::model_provider::ModelProviderInfo;
pub use crate::model_provider::WireApi;
pub use crate::model_provider::built_in_model_providers;
pub use crate::prompt::MAX_LOG_CHARS;
pub use crate::prompt::Prompt;
