use eda_copilot_protocol::TapeOutDecision;

use crate::style::Tone;

/// Headline shown for a verdict. Anything that is not a recognised decision
/// is shown as blocked.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecisionBadge {
    pub decision: TapeOutDecision,
}

impl DecisionBadge {
    pub fn resolve(raw: Option<&str>) -> Self {
        Self {
            decision: TapeOutDecision::resolve(raw),
        }
    }

    pub fn label(self) -> &'static str {
        match self.decision {
            TapeOutDecision::Go => "GO FOR TAPE-OUT",
            TapeOutDecision::ConditionalGo => "CONDITIONAL GO",
            TapeOutDecision::NoGo => "TAPE-OUT BLOCKED",
        }
    }

    pub fn icon(self) -> &'static str {
        match self.decision {
            TapeOutDecision::Go => "✓",
            TapeOutDecision::ConditionalGo => "!",
            TapeOutDecision::NoGo => "✕",
        }
    }

    pub fn tone(self) -> Tone {
        decision_tone(self.decision)
    }
}

pub(crate) fn decision_tone(decision: TapeOutDecision) -> Tone {
    match decision {
        TapeOutDecision::Go => Tone::Good,
        TapeOutDecision::ConditionalGo => Tone::Warn,
        TapeOutDecision::NoGo => Tone::Bad,
    }
}
