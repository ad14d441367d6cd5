use eda_copilot_protocol::LogAnalysis;
use eda_copilot_protocol::MultiLogAnalysisResult;

use crate::style::Tone;

const HIGH_RISK_THRESHOLD: f64 = 70.0;
const ELEVATED_RISK_THRESHOLD: f64 = 30.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RiskBand {
    Low,
    Elevated,
    High,
}

impl RiskBand {
    pub fn label(self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Elevated => "elevated",
            Self::High => "high",
        }
    }

    pub fn tone(self) -> Tone {
        match self {
            Self::Low => Tone::Good,
            Self::Elevated => Tone::Warn,
            Self::High => Tone::Bad,
        }
    }
}

pub fn risk_band(score: f64) -> RiskBand {
    if score > HIGH_RISK_THRESHOLD {
        RiskBand::High
    } else if score > ELEVATED_RISK_THRESHOLD {
        RiskBand::Elevated
    } else {
        RiskBand::Low
    }
}

fn needs_attention(log: &LogAnalysis) -> bool {
    log.is_explicit_no_go() || log.risk_score_or_default() > HIGH_RISK_THRESHOLD
}

/// Log to open first: the first one that is explicitly `NO-GO` or high
/// risk, otherwise the first log. `None` when there are no logs.
pub fn default_selection(result: &MultiLogAnalysisResult) -> Option<usize> {
    if result.logs.is_empty() {
        return None;
    }
    Some(result.logs.iter().position(needs_attention).unwrap_or(0))
}
