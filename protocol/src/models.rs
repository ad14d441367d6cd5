//! Result payload returned by the analysis model.
//!
//! Field names follow the camelCase JSON schema sent with every request.
//! Every field is optional on the Rust side; see [`crate::lenient`].

use serde::Deserialize;
use serde::Serialize;

use crate::TapeOutDecision;
use crate::lenient;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Issue {
    #[serde(default, deserialize_with = "lenient::text", skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "lenient::text", skip_serializing_if = "Option::is_none")]
    pub impact: Option<String>,
}

/// A claimed cause/effect pair with the model's confidence in `[0, 1]`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RootCauseEntry {
    #[serde(default, deserialize_with = "lenient::text", skip_serializing_if = "Option::is_none")]
    pub cause: Option<String>,
    #[serde(default, deserialize_with = "lenient::text", skip_serializing_if = "Option::is_none")]
    pub effect: Option<String>,
    #[serde(default, deserialize_with = "lenient::number", skip_serializing_if = "Option::is_none")]
    pub confidence: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FixStrategy {
    #[serde(default, deserialize_with = "lenient::text", skip_serializing_if = "Option::is_none")]
    pub recommendation: Option<String>,
    #[serde(default, deserialize_with = "lenient::text", skip_serializing_if = "Option::is_none")]
    pub cost: Option<String>,
    #[serde(default, deserialize_with = "lenient::text", skip_serializing_if = "Option::is_none")]
    pub risk: Option<String>,
    #[serde(default, deserialize_with = "lenient::text", skip_serializing_if = "Option::is_none")]
    pub debt: Option<String>,
}

/// Optional RTL-level patch suggested for timing or fanout fixes.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VerilogFix {
    #[serde(default, deserialize_with = "lenient::text", skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "lenient::text", skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    #[serde(default, deserialize_with = "lenient::text", skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValueMetrics {
    #[serde(default, deserialize_with = "lenient::number", skip_serializing_if = "Option::is_none")]
    pub debug_time_saved_hours: Option<f64>,
    #[serde(default, deserialize_with = "lenient::number", skip_serializing_if = "Option::is_none")]
    pub iterations_avoided: Option<f64>,
    #[serde(default, deserialize_with = "lenient::text", skip_serializing_if = "Option::is_none")]
    pub value_statement: Option<String>,
}

/// Bucket counts of analyzed logs by severity.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TierCounts {
    #[serde(default, deserialize_with = "lenient::number", skip_serializing_if = "Option::is_none")]
    pub green: Option<f64>,
    #[serde(default, deserialize_with = "lenient::number", skip_serializing_if = "Option::is_none")]
    pub yellow: Option<f64>,
    #[serde(default, deserialize_with = "lenient::number", skip_serializing_if = "Option::is_none")]
    pub red: Option<f64>,
    #[serde(default, deserialize_with = "lenient::number", skip_serializing_if = "Option::is_none")]
    pub critical: Option<f64>,
}

/// Per-file assessment.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LogAnalysis {
    #[serde(default, deserialize_with = "lenient::text", skip_serializing_if = "Option::is_none")]
    pub file_name: Option<String>,
    #[serde(default, deserialize_with = "lenient::text", skip_serializing_if = "Option::is_none")]
    pub tool: Option<String>,
    /// Raw decision string as produced by the model. Use
    /// [`LogAnalysis::decision`] to interpret it.
    #[serde(
        default,
        rename = "decision",
        deserialize_with = "lenient::text",
        skip_serializing_if = "Option::is_none"
    )]
    pub raw_decision: Option<String>,
    #[serde(default, deserialize_with = "lenient::number", skip_serializing_if = "Option::is_none")]
    pub risk_score: Option<f64>,
    #[serde(default, deserialize_with = "lenient::text", skip_serializing_if = "Option::is_none")]
    pub executive_summary: Option<String>,
    #[serde(default, deserialize_with = "lenient::list", skip_serializing_if = "Option::is_none")]
    pub top_issues: Option<Vec<Issue>>,
    #[serde(default, deserialize_with = "lenient::list", skip_serializing_if = "Option::is_none")]
    pub root_cause_analysis: Option<Vec<RootCauseEntry>>,
    #[serde(default, deserialize_with = "lenient::text", skip_serializing_if = "Option::is_none")]
    pub counterfactual_insights: Option<String>,
    #[serde(default, deserialize_with = "lenient::option", skip_serializing_if = "Option::is_none")]
    pub fix_strategy: Option<FixStrategy>,
    #[serde(default, deserialize_with = "lenient::option", skip_serializing_if = "Option::is_none")]
    pub verilog_fix: Option<VerilogFix>,
    #[serde(default, deserialize_with = "lenient::text", skip_serializing_if = "Option::is_none")]
    pub predictive_outcomes: Option<String>,
    #[serde(default, deserialize_with = "lenient::text", skip_serializing_if = "Option::is_none")]
    pub debug_playbook: Option<String>,
    #[serde(default, deserialize_with = "lenient::option", skip_serializing_if = "Option::is_none")]
    pub value_metrics: Option<ValueMetrics>,
}

impl LogAnalysis {
    /// Decision with unknown values resolved to `NoGo`.
    pub fn decision(&self) -> TapeOutDecision {
        TapeOutDecision::resolve(self.raw_decision.as_deref())
    }

    /// `true` only when the decision is exactly `NO-GO`, with no
    /// normalisation.
    pub fn is_explicit_no_go(&self) -> bool {
        self.raw_decision.as_deref() == Some(TapeOutDecision::NoGo.as_str())
    }

    pub fn risk_score_or_default(&self) -> f64 {
        self.risk_score.unwrap_or(0.0)
    }
}

/// Batch-level assessment wrapping one [`LogAnalysis`] per submitted file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MultiLogAnalysisResult {
    #[serde(default, deserialize_with = "lenient::text", skip_serializing_if = "Option::is_none")]
    pub overall_verdict: Option<String>,
    #[serde(default, deserialize_with = "lenient::number", skip_serializing_if = "Option::is_none")]
    pub overall_risk_score: Option<f64>,
    #[serde(default, deserialize_with = "lenient::text", skip_serializing_if = "Option::is_none")]
    pub global_summary: Option<String>,
    #[serde(default, deserialize_with = "lenient::option", skip_serializing_if = "Option::is_none")]
    pub tier_counts: Option<TierCounts>,
    #[serde(default, deserialize_with = "lenient::vec")]
    pub logs: Vec<LogAnalysis>,
}

impl MultiLogAnalysisResult {
    pub fn overall_decision(&self) -> TapeOutDecision {
        TapeOutDecision::resolve(self.overall_verdict.as_deref())
    }

    /// Verdict text as reported, falling back to `NO-GO` when absent.
    pub fn verdict_label(&self) -> &str {
        match self.overall_verdict.as_deref().map(str::trim) {
            Some(verdict) if !verdict.is_empty() => verdict,
            _ => TapeOutDecision::NoGo.as_str(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn parses_full_payload() {
        let result: MultiLogAnalysisResult = serde_json::from_value(json!({
            "overallVerdict": "CONDITIONAL GO",
            "overallRiskScore": 55,
            "globalSummary": "Two hold violations on the scan chain.",
            "tierCounts": {"green": 1, "yellow": 1, "red": 0, "critical": 0},
            "logs": [{
                "fileName": "sta.log",
                "tool": "PrimeTime",
                "decision": "CONDITIONAL GO",
                "riskScore": 55,
                "topIssues": [{"title": "Hold violation", "impact": "-12ps on scan_en"}],
                "rootCauseAnalysis": [{"cause": "Clock skew", "effect": "Hold failure", "confidence": 0.9}],
                "fixStrategy": {"recommendation": "Insert delay cells", "cost": "Low", "risk": "Low", "debt": "None"},
                "verilogFix": {"title": "Retime", "summary": "Add pipeline stage", "code": "assign q = d;"},
                "valueMetrics": {"debugTimeSavedHours": 4, "iterationsAvoided": 2, "valueStatement": "Saved a run"}
            }]
        }))
        .unwrap_or_else(|err| panic!("payload should parse: {err}"));

        assert_eq!(result.overall_decision(), TapeOutDecision::ConditionalGo);
        assert_eq!(result.logs.len(), 1);
        let log = &result.logs[0];
        assert_eq!(log.decision(), TapeOutDecision::ConditionalGo);
        assert_eq!(log.risk_score, Some(55.0));
        assert_eq!(
            log.root_cause_analysis.as_ref().map(|rc| rc[0].confidence),
            Some(Some(0.9))
        );
        assert_eq!(
            log.verilog_fix.as_ref().and_then(|fix| fix.code.as_deref()),
            Some("assign q = d;")
        );
    }

    #[test]
    fn tolerates_schema_drift() {
        let result: MultiLogAnalysisResult = serde_json::from_value(json!({
            "overallVerdict": null,
            "overallRiskScore": "high",
            "tierCounts": "n/a",
            "logs": [
                {"fileName": "drc.log", "decision": "maybe", "fixStrategy": "just fix it"},
                "not an object"
            ]
        }))
        .unwrap_or_else(|err| panic!("payload should parse: {err}"));

        assert_eq!(result.overall_verdict, None);
        assert_eq!(result.overall_risk_score, None);
        assert_eq!(result.tier_counts, None);
        assert_eq!(result.verdict_label(), "NO-GO");
        assert_eq!(result.logs.len(), 1);
        assert_eq!(result.logs[0].decision(), TapeOutDecision::NoGo);
        assert!(!result.logs[0].is_explicit_no_go());
        assert_eq!(result.logs[0].fix_strategy, None);
    }

    #[test]
    fn missing_logs_is_an_empty_batch() {
        let result: MultiLogAnalysisResult =
            serde_json::from_value(json!({"overallVerdict": "GO", "overallRiskScore": 3}))
                .unwrap_or_else(|err| panic!("payload should parse: {err}"));
        assert!(result.logs.is_empty());
        assert_eq!(result.verdict_label(), "GO");
    }

    #[test]
    fn serialization_omits_absent_fields() {
        let log = LogAnalysis {
            file_name: Some("synth.log".to_string()),
            raw_decision: Some("GO".to_string()),
            ..Default::default()
        };
        let value = serde_json::to_value(&log)
            .unwrap_or_else(|err| panic!("serialize log analysis: {err}"));
        assert_eq!(value, json!({"fileName": "synth.log", "decision": "GO"}));
    }
}
