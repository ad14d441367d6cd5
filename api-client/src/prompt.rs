use eda_copilot_protocol::AnalysisRequest;
use eda_copilot_protocol::LogInput;
use serde_json::Value;
use tracing::debug;

use crate::schema::analysis_response_schema;

/// Per-file character budget. Content past this point is dropped silently
/// before transmission.
pub const MAX_LOG_CHARS: usize = 4500;

/// Output token budget; large enough to leave room for Verilog patches.
pub const MAX_OUTPUT_TOKENS: u32 = 4000;

pub const DEFAULT_OBJECTIVE: &str =
    "Perform standard tape-out gate review and generate RTL fixes where needed.";

const LOG_SEPARATOR: &str = "\n---\n";

pub const SYSTEM_INSTRUCTIONS: &str = r#"Act as an Autonomous Senior VLSI CAD Architect & RTL Expert.
Task: AUTHORITATIVE BATCH LOG REVIEW & RTL REMEDIATION.

VERILOG ACTIVATION RULE:
Generate synthesizable Verilog code ONLY if the fix involves RTL-level modification (e.g., register duplication for fanout, pipelining, clock gating, drive strength modeling).

VERILOG REQUIREMENTS (MANDATORY):
- FORMAT: Standard Horizontal RTL Style. One statement per line.
- INDENTATION: Strict 2-space indentation.
- MODULES: Single-line module headers unless parameters are excessive.
- ALIGNMENT: Aligned signal declarations for professional readability.
- ASSIGNMENTS: Clean, horizontal assignments (assign q = d;).
- SYNTHESIS: Strictly synthesizable. No vendor-specific primitives, no macros, no simulation-only constructs.
- REASONING: Include 3-4 lines of REASONING (WHY required, WHAT it fixes, WHY it is safe).

NON-NEGOTIABLE ENFORCEMENT:
1. EVERY log must identify a specific Root Cause and concrete Fix.
2. COUNTERFACTUALS: Quantitative. Example: "Slack is estimated to improve by ~100ps if drive strength of REG_15 is increased."
3. FIX STRATEGY: Actionable command. Example: "Upsize critical path drivers and re-buffer net_49. Minimal area overhead expected."
4. PREDICTIVE OUTCOMES: Strictly "PASS", "RISK", or "FAIL" + 1-sentence logic.
5. RISK: >70% for timing/DRC/LVS failures.

JSON BEHAVIOR:
- Return ONLY the JSON object.
- Terminate at }.
- Output formatted for a Senior Engineering Review Board."#;

/// Provider-neutral request content. Wire payloads are built from this by a
/// [`crate::payload::PayloadBuilder`].
#[derive(Debug, Clone)]
pub struct Prompt {
    pub instructions: String,
    pub input: String,
    pub output_schema: Value,
    pub max_output_tokens: u32,
}

impl Prompt {
    pub fn for_request(request: &AnalysisRequest) -> Self {
        Self {
            instructions: SYSTEM_INSTRUCTIONS.to_string(),
            input: render_review_input(request),
            output_schema: analysis_response_schema(),
            max_output_tokens: MAX_OUTPUT_TOKENS,
        }
    }
}

/// Keep at most `max_chars` characters, never splitting a code point.
pub fn truncate_chars(content: &str, max_chars: usize) -> &str {
    match content.char_indices().nth(max_chars) {
        Some((byte_idx, _)) => &content[..byte_idx],
        None => content,
    }
}

fn render_log(log: &LogInput) -> String {
    let content = truncate_chars(&log.content, MAX_LOG_CHARS);
    if content.len() < log.content.len() {
        debug!(
            file = %log.name,
            kept_chars = MAX_LOG_CHARS,
            "truncated log content before transmission"
        );
    }
    format!("FILE: {}\nCONTENT: {content}", log.name)
}

fn render_review_input(request: &AnalysisRequest) -> String {
    let manifest = request.file_names().join(", ");
    let objective = request
        .user_question
        .as_deref()
        .map(str::trim)
        .filter(|q| !q.is_empty())
        .unwrap_or(DEFAULT_OBJECTIVE);
    let history = request
        .historical_context
        .as_deref()
        .filter(|ctx| !ctx.trim().is_empty())
        .map(|ctx| format!("HISTORICAL_DATA:\n{ctx}\n"))
        .unwrap_or_default();
    let log_stream = request
        .logs
        .iter()
        .map(render_log)
        .collect::<Vec<_>>()
        .join(LOG_SEPARATOR);

    format!(
        "REVIEW_INITIATED:\n\
         BATCH_MANIFEST: {manifest}\n\
         USER_OBJECTIVE: {objective}\n\
         {history}\n\
         LOG_STREAM:\n\
         {log_stream}\n\n\
         INSTRUCTION: Generate the 10-point JSON assessment. If an RTL change is required for a timing or fanout fix, include the \"verilogFix\" object. Terminate at }}.\n"
    )
}
