use serde::Deserialize;
use serde::Serialize;
use strum_macros::Display;
use strum_macros::EnumIter;

/// Tape-out readiness decision for a single log or a whole batch.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumIter,
)]
pub enum TapeOutDecision {
    #[serde(rename = "GO")]
    #[strum(serialize = "GO")]
    Go,
    #[serde(rename = "CONDITIONAL GO")]
    #[strum(serialize = "CONDITIONAL GO")]
    ConditionalGo,
    #[serde(rename = "NO-GO")]
    #[strum(serialize = "NO-GO")]
    NoGo,
}

impl TapeOutDecision {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Go => "GO",
            Self::ConditionalGo => "CONDITIONAL GO",
            Self::NoGo => "NO-GO",
        }
    }

    /// Recognise one of the three decision strings, ignoring case and
    /// surrounding whitespace.
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_uppercase().as_str() {
            "GO" => Some(Self::Go),
            "CONDITIONAL GO" => Some(Self::ConditionalGo),
            "NO-GO" => Some(Self::NoGo),
            _ => None,
        }
    }

    /// Resolve a model-supplied decision. Anything unrecognised, including a
    /// missing value, is treated as `NoGo`.
    pub fn resolve(raw: Option<&str>) -> Self {
        raw.and_then(Self::parse).unwrap_or(Self::NoGo)
    }
}
