use std::io;
use std::io::Write;

use eda_copilot_protocol::LogAnalysis;
use eda_copilot_protocol::MultiLogAnalysisResult;
use eda_copilot_protocol::TapeOutDecision;
use eda_copilot_protocol::TierCounts;
use textwrap::Options as WrapOptions;

use crate::badge::DecisionBadge;
use crate::badge::decision_tone;
use crate::selection::default_selection;
use crate::selection::risk_band;
use crate::style::Tone;
use crate::style::format_number;
use crate::style::format_percent;
use crate::style::paint;

const WRAP_WIDTH: usize = 88;
const INDENT: &str = "  ";

pub const DEFAULT_GLOBAL_SUMMARY: &str = "Consolidated analysis summary pending.";
pub const DEFAULT_EXECUTIVE_SUMMARY: &str = "No technical summary provided.";
pub const NO_ISSUES: &str = "Structural analysis complete. No violations detected.";
pub const DEFAULT_ISSUE_TITLE: &str = "Artifact Error";
pub const DEFAULT_ISSUE_IMPACT: &str = "Critical Impact";
pub const NO_ROOT_CAUSES: &str = "Primary causal logic remains stable.";
pub const DEFAULT_CAUSE: &str = "Under deterministic review";
pub const DEFAULT_EFFECT: &str = "Observational impact analysis";
pub const DEFAULT_COUNTERFACTUAL: &str = "Metric delta estimation unavailable.";
pub const DEFAULT_PREDICTION: &str = "Predictive modeling engine offline.";
pub const DEFAULT_RECOMMENDATION: &str = "Manual intervention required.";
pub const DEFAULT_COST: &str = "Undefined engineering cost.";
pub const DEFAULT_FIX_RISK: &str = "Risk profile undefined.";
pub const DEFAULT_DEBT: &str = "No secondary debt recorded.";
pub const DEFAULT_PLAYBOOK: &str = "Playbook generation skipped for non-critical artifacts.";
pub const DEFAULT_VALUE_STATEMENT: &str = "Efficiency optimized via autonomous review protocol.";
pub const DEFAULT_FILE_NAME: &str = "LOG_FILE";
pub const DEFAULT_TOOL: &str = "GENERIC";
const DEFAULT_DETAIL_TITLE: &str = "Analysis Report";
const DEFAULT_DETAIL_TOOL: &str = "EDA Tool";
const DEFAULT_HEADLINE_CONFIDENCE: f64 = 0.8;
const DEFAULT_CAUSE_CONFIDENCE: f64 = 0.5;

fn or_default<'a>(value: Option<&'a str>, default: &'a str) -> &'a str {
    match value.map(str::trim) {
        Some(text) if !text.is_empty() => text,
        _ => default,
    }
}

fn write_wrapped<W: Write>(writer: &mut W, text: &str, indent: &str) -> io::Result<()> {
    let options = WrapOptions::new(WRAP_WIDTH)
        .initial_indent(indent)
        .subsequent_indent(indent);
    for line in textwrap::wrap(text, options) {
        writeln!(writer, "{}", line.trim_end())?;
    }
    Ok(())
}

fn write_heading<W: Write>(writer: &mut W, title: &str, color_enabled: bool) -> io::Result<()> {
    writeln!(writer)?;
    writeln!(writer, "{}", paint(title, Tone::Heading, color_enabled))
}

/// Raw decision as reported for one log, `NO-GO` when absent.
fn decision_tag(log: &LogAnalysis) -> (&str, Tone) {
    let raw = or_default(log.raw_decision.as_deref(), TapeOutDecision::NoGo.as_str());
    let tone = match TapeOutDecision::parse(raw) {
        Some(decision) => decision_tone(decision),
        None => Tone::Warn,
    };
    (raw, tone)
}

fn write_tier_counts<W: Write>(
    writer: &mut W,
    counts: Option<&TierCounts>,
    color_enabled: bool,
) -> io::Result<()> {
    let counts = counts.cloned().unwrap_or_default();
    let tiers = [
        ("green", counts.green, Tone::Good),
        ("yellow", counts.yellow, Tone::Warn),
        ("red", counts.red, Tone::Bad),
        ("critical", counts.critical, Tone::Bad),
    ];
    let cells = tiers
        .iter()
        .map(|(name, count, tone)| {
            let count = format_number(count.unwrap_or(0.0));
            format!("{} {name}", paint(&count, *tone, color_enabled))
        })
        .collect::<Vec<_>>();
    writeln!(writer, "Tiers: {}", cells.join("  "))
}

/// Full report: batch header, log inventory and the detail of one log.
///
/// `selected` picks the log to expand; when it is `None` or out of range the
/// default selection applies.
pub fn render_report<W: Write>(
    result: &MultiLogAnalysisResult,
    selected: Option<usize>,
    color_enabled: bool,
    writer: &mut W,
) -> io::Result<()> {
    let badge = DecisionBadge::resolve(result.overall_verdict.as_deref());
    writeln!(
        writer,
        "{}",
        paint(
            &format!("{} {}", badge.icon(), badge.label()),
            badge.tone(),
            color_enabled
        )
    )?;

    let overall_risk = result.overall_risk_score.unwrap_or(0.0);
    let band = risk_band(overall_risk);
    writeln!(
        writer,
        "Overall risk: {} ({})",
        paint(
            &format!("{}%", format_number(overall_risk)),
            band.tone(),
            color_enabled
        ),
        band.label()
    )?;
    write_tier_counts(writer, result.tier_counts.as_ref(), color_enabled)?;

    write_heading(writer, "Master Executive Summary", color_enabled)?;
    write_wrapped(
        writer,
        or_default(result.global_summary.as_deref(), DEFAULT_GLOBAL_SUMMARY),
        INDENT,
    )?;

    let selected = selected
        .filter(|index| *index < result.logs.len())
        .or_else(|| default_selection(result));

    writeln!(writer)?;
    render_log_inventory(result, selected, color_enabled, writer)?;

    if let Some(log) = selected.and_then(|index| result.logs.get(index)) {
        writeln!(writer)?;
        render_log_detail(log, color_enabled, writer)?;
    }
    Ok(())
}

/// One line per log: decision, risk, file name and tool. The selected log
/// is marked with `>`.
pub fn render_log_inventory<W: Write>(
    result: &MultiLogAnalysisResult,
    selected: Option<usize>,
    color_enabled: bool,
    writer: &mut W,
) -> io::Result<()> {
    writeln!(
        writer,
        "{}",
        paint(
            &format!("Design Assets ({} artifacts)", result.logs.len()),
            Tone::Heading,
            color_enabled
        )
    )?;
    if result.logs.is_empty() {
        writeln!(writer, "{INDENT}none")?;
        return Ok(());
    }

    let tag_width = result
        .logs
        .iter()
        .map(|log| decision_tag(log).0.chars().count())
        .max()
        .unwrap_or(0);
    for (index, log) in result.logs.iter().enumerate() {
        let marker = if Some(index) == selected { ">" } else { " " };
        let (tag, tone) = decision_tag(log);
        let padded = format!("{tag:<tag_width$}");
        let risk = format!("{}%", format_number(log.risk_score_or_default()));
        writeln!(
            writer,
            "{marker} {}. [{}] {risk:>4} risk  {} ({})",
            index + 1,
            paint(&padded, tone, color_enabled),
            or_default(log.file_name.as_deref(), DEFAULT_FILE_NAME),
            or_default(log.tool.as_deref(), DEFAULT_TOOL),
        )?;
    }
    Ok(())
}

fn outcome_tone(prediction: &str) -> (&'static str, Tone) {
    if prediction.contains("PASS") {
        ("PASS", Tone::Good)
    } else if prediction.contains("FAIL") {
        ("FAIL", Tone::Bad)
    } else {
        ("RISK", Tone::Warn)
    }
}

/// The ten-point inspection of a single log.
pub fn render_log_detail<W: Write>(
    log: &LogAnalysis,
    color_enabled: bool,
    writer: &mut W,
) -> io::Result<()> {
    let title = or_default(log.file_name.as_deref(), DEFAULT_DETAIL_TITLE);
    writeln!(
        writer,
        "{}",
        paint(&format!("== {title} =="), Tone::Heading, color_enabled)
    )?;

    let root_causes = log.root_cause_analysis.as_deref().unwrap_or_default();
    let headline_confidence = root_causes
        .first()
        .and_then(|rc| rc.confidence)
        .unwrap_or(DEFAULT_HEADLINE_CONFIDENCE);
    let risk = log.risk_score_or_default();
    let band = risk_band(risk);
    writeln!(
        writer,
        "Tool: {}  Confidence: {}  Risk: {} ({})",
        or_default(log.tool.as_deref(), DEFAULT_DETAIL_TOOL),
        format_percent(headline_confidence),
        paint(&format!("{}%", format_number(risk)), band.tone(), color_enabled),
        band.label()
    )?;

    write_heading(writer, "03. Executive Summary", color_enabled)?;
    write_wrapped(
        writer,
        or_default(log.executive_summary.as_deref(), DEFAULT_EXECUTIVE_SUMMARY),
        INDENT,
    )?;

    write_heading(writer, "04. Critical Failure Points", color_enabled)?;
    match log.top_issues.as_deref() {
        Some(issues) if !issues.is_empty() => {
            for issue in issues {
                write_wrapped(
                    writer,
                    &format!(
                        "- {}: {}",
                        or_default(issue.title.as_deref(), DEFAULT_ISSUE_TITLE),
                        or_default(issue.impact.as_deref(), DEFAULT_ISSUE_IMPACT)
                    ),
                    INDENT,
                )?;
            }
        }
        _ => write_wrapped(writer, NO_ISSUES, INDENT)?,
    }

    write_heading(writer, "05. Causal Traceability", color_enabled)?;
    if root_causes.is_empty() {
        write_wrapped(writer, NO_ROOT_CAUSES, INDENT)?;
    }
    for rc in root_causes {
        writeln!(
            writer,
            "{INDENT}- [{} match]",
            format_percent(rc.confidence.unwrap_or(DEFAULT_CAUSE_CONFIDENCE))
        )?;
        write_wrapped(
            writer,
            &format!(
                "Root cause: {}",
                or_default(rc.cause.as_deref(), DEFAULT_CAUSE)
            ),
            "    ",
        )?;
        write_wrapped(
            writer,
            &format!(
                "Downstream: {}",
                or_default(rc.effect.as_deref(), DEFAULT_EFFECT)
            ),
            "    ",
        )?;
    }

    if let Some(fix) = &log.verilog_fix {
        write_heading(
            writer,
            "RTL Modification (Synthesizable Verilog)",
            color_enabled,
        )?;
        if let Some(title) = fix.title.as_deref() {
            writeln!(writer, "{INDENT}{}", paint(title, Tone::Heading, color_enabled))?;
        }
        if let Some(summary) = fix.summary.as_deref() {
            write_wrapped(writer, summary, INDENT)?;
        }
        if let Some(code) = fix.code.as_deref() {
            writeln!(writer)?;
            for line in code.lines() {
                writeln!(writer, "    {line}")?;
            }
        }
    }

    write_heading(writer, "06. Counterfactual Analysis", color_enabled)?;
    write_wrapped(
        writer,
        or_default(
            log.counterfactual_insights.as_deref(),
            DEFAULT_COUNTERFACTUAL,
        ),
        INDENT,
    )?;

    let strategy = log.fix_strategy.clone().unwrap_or_default();
    write_heading(writer, "07. Authorized Fix Strategy", color_enabled)?;
    for (label, value, default) in [
        (
            "Recommendation",
            strategy.recommendation.as_deref(),
            DEFAULT_RECOMMENDATION,
        ),
        ("Cost", strategy.cost.as_deref(), DEFAULT_COST),
        ("Risk", strategy.risk.as_deref(), DEFAULT_FIX_RISK),
        ("Technical debt", strategy.debt.as_deref(), DEFAULT_DEBT),
    ] {
        write_wrapped(
            writer,
            &format!("{label}: {}", or_default(value, default)),
            INDENT,
        )?;
    }

    write_heading(writer, "08. Predictive Outcome Modeling", color_enabled)?;
    let prediction = or_default(log.predictive_outcomes.as_deref(), DEFAULT_PREDICTION);
    let (outcome, tone) = outcome_tone(log.predictive_outcomes.as_deref().unwrap_or_default());
    writeln!(
        writer,
        "{INDENT}Next run: {}",
        paint(outcome, tone, color_enabled)
    )?;
    write_wrapped(writer, prediction, INDENT)?;

    write_heading(writer, "09. Debug Playbook", color_enabled)?;
    write_wrapped(
        writer,
        or_default(log.debug_playbook.as_deref(), DEFAULT_PLAYBOOK),
        INDENT,
    )?;

    let metrics = log.value_metrics.clone().unwrap_or_default();
    write_heading(writer, "10. Value Metrics", color_enabled)?;
    writeln!(
        writer,
        "{INDENT}MTTD reduction: {}h",
        format_number(metrics.debug_time_saved_hours.unwrap_or(0.0))
    )?;
    writeln!(
        writer,
        "{INDENT}Closed-loop savings: {}",
        format_number(metrics.iterations_avoided.unwrap_or(0.0))
    )?;
    write_wrapped(
        writer,
        or_default(metrics.value_statement.as_deref(), DEFAULT_VALUE_STATEMENT),
        INDENT,
    )?;
    Ok(())
}
