use std::io;
use std::io::Write;

use chrono::DateTime;
use chrono::Local;
use eda_copilot_protocol::HistoryEntry;
use eda_copilot_protocol::TapeOutDecision;

use crate::badge::decision_tone;
use crate::style::Tone;
use crate::style::paint;

/// Characters of the id shown in listings; enough to address an entry.
pub const SHORT_ID_LEN: usize = 8;

pub fn short_id(id: &str) -> &str {
    match id.char_indices().nth(SHORT_ID_LEN) {
        Some((idx, _)) => &id[..idx],
        None => id,
    }
}

pub fn format_timestamp(timestamp_ms: i64) -> String {
    DateTime::from_timestamp_millis(timestamp_ms)
        .map(|dt| dt.with_timezone(&Local).format("%Y-%m-%d %H:%M").to_string())
        .unwrap_or_else(|| "unknown time".to_string())
}

/// Listing of stored analyses, newest first.
pub fn render_history_list<W: Write>(
    entries: &[HistoryEntry],
    color_enabled: bool,
    writer: &mut W,
) -> io::Result<()> {
    writeln!(
        writer,
        "{}",
        paint(
            &format!("Analysis History ({})", entries.len()),
            Tone::Heading,
            color_enabled
        )
    )?;
    if entries.is_empty() {
        writeln!(writer, "  No history yet")?;
        return Ok(());
    }

    for entry in entries {
        let verdict = entry.result.verdict_label();
        let tone = TapeOutDecision::parse(verdict).map_or(Tone::Warn, decision_tone);
        writeln!(
            writer,
            "  {}  {}  [{}]  {}",
            paint(short_id(&entry.id), Tone::Dim, color_enabled),
            format_timestamp(entry.timestamp),
            paint(verdict, tone, color_enabled),
            entry.label
        )?;
    }
    Ok(())
}
