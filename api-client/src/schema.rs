//! Response schema sent with every analysis request.
//!
//! The schema is advisory: the provider may still return something else, so
//! the result types deserialize leniently regardless of what is declared
//! here.

use serde_json::Map;
use serde_json::Value;
use serde_json::json;

/// JSON Schema (lowercase type names) describing `MultiLogAnalysisResult`.
pub fn analysis_response_schema() -> Value {
    let string = || json!({ "type": "string" });
    let number = || json!({ "type": "number" });

    let log_entry = json!({
        "type": "object",
        "properties": {
            "fileName": string(),
            "tool": string(),
            "decision": string(),
            "riskScore": number(),
            "executiveSummary": string(),
            "topIssues": {
                "type": "array",
                "items": {
                    "type": "object",
                    "properties": { "title": string(), "impact": string() }
                }
            },
            "rootCauseAnalysis": {
                "type": "array",
                "items": {
                    "type": "object",
                    "properties": {
                        "cause": string(),
                        "effect": string(),
                        "confidence": number()
                    }
                }
            },
            "counterfactualInsights": string(),
            "fixStrategy": {
                "type": "object",
                "properties": {
                    "recommendation": string(),
                    "cost": string(),
                    "risk": string(),
                    "debt": string()
                }
            },
            "verilogFix": {
                "type": "object",
                "properties": {
                    "title": string(),
                    "summary": string(),
                    "code": string()
                }
            },
            "predictiveOutcomes": string(),
            "debugPlaybook": string(),
            "valueMetrics": {
                "type": "object",
                "properties": {
                    "debugTimeSavedHours": number(),
                    "iterationsAvoided": number(),
                    "valueStatement": string()
                }
            }
        },
        "required": ["fileName", "decision", "riskScore", "fixStrategy"]
    });

    json!({
        "type": "object",
        "properties": {
            "overallVerdict": string(),
            "overallRiskScore": number(),
            "globalSummary": string(),
            "tierCounts": {
                "type": "object",
                "properties": {
                    "green": number(),
                    "yellow": number(),
                    "red": number(),
                    "critical": number()
                }
            },
            "logs": { "type": "array", "items": log_entry }
        },
        "required": ["overallVerdict", "overallRiskScore", "logs"]
    })
}

/// Gemini's `responseSchema` uses upper-case OpenAPI type names
/// (`OBJECT`, `STRING`, ...). Everything else is passed through.
pub fn to_gemini_schema(schema: &Value) -> Value {
    match schema {
        Value::Object(map) => {
            let converted = map
                .iter()
                .map(|(key, value)| {
                    let value = match (key.as_str(), value) {
                        ("type", Value::String(ty)) => Value::String(ty.to_ascii_uppercase()),
                        ("properties", Value::Object(props)) => Value::Object(
                            props
                                .iter()
                                .map(|(name, prop)| (name.clone(), to_gemini_schema(prop)))
                                .collect::<Map<_, _>>(),
                        ),
                        _ => to_gemini_schema(value),
                    };
                    (key.clone(), value)
                })
                .collect::<Map<_, _>>();
            Value::Object(converted)
        }
        Value::Array(items) => Value::Array(items.iter().map(to_gemini_schema).collect()),
        other => other.clone(),
    }
}
