//! Data model shared by the EDA Copilot crates.
//!
//! Everything the analysis model returns is untrusted. The result types in
//! [`models`] therefore deserialize leniently: missing fields, `null`s and
//! values of the wrong JSON type become `None` instead of failing the parse.
//! Defaults are substituted only when a result is rendered.

pub mod decision;
pub mod history;
pub mod lenient;
pub mod models;
pub mod request;

pub use decision::TapeOutDecision;
pub use history::HistoryEntry;
pub use models::FixStrategy;
pub use models::Issue;
pub use models::LogAnalysis;
pub use models::MultiLogAnalysisResult;
pub use models::RootCauseEntry;
pub use models::TierCounts;
pub use models::ValueMetrics;
pub use models::VerilogFix;
pub use request::AnalysisRequest;
pub use request::LogInput;
