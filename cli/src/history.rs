use std::io;
use std::io::Write;

use anyhow::Result;
use eda_copilot_core::HistoryStore;
use eda_copilot_core::Session;
use eda_copilot_core::SessionState;
use eda_copilot_protocol::HistoryEntry;
use eda_copilot_report::format_timestamp;
use eda_copilot_report::render_history_list;
use eda_copilot_report::render_report;
use eda_copilot_report::short_id;

use crate::RunContext;
use crate::args::DeleteArgs;
use crate::args::ListArgs;
use crate::args::ShowArgs;

pub(crate) async fn run_list(ctx: &RunContext, args: ListArgs) -> Result<()> {
    let store = HistoryStore::load_from_home(&ctx.home).await;
    if args.json {
        println!("{}", serde_json::to_string_pretty(store.entries())?);
        return Ok(());
    }

    let stdout = io::stdout();
    render_history_list(store.entries(), ctx.stdout_color, &mut stdout.lock())?;
    Ok(())
}

pub(crate) async fn run_show(ctx: &RunContext, args: ShowArgs) -> Result<()> {
    let store = HistoryStore::load_from_home(&ctx.home).await;
    if args.json {
        let entry = store.get(&args.id)?;
        println!("{}", serde_json::to_string_pretty(entry)?);
        return Ok(());
    }

    let mut session = Session::new(store);
    session.load_from_history(&args.id)?;
    let SessionState::Complete {
        result,
        history_id: Some(id),
    } = session.state()
    else {
        return Ok(());
    };
    let entry = session.history().get(id)?;
    let selected = args.log.map(|n| n as usize - 1);

    let stdout = io::stdout();
    let mut out = stdout.lock();
    write_entry_header(entry, &mut out)?;
    render_report(result, selected, ctx.stdout_color, &mut out)?;
    Ok(())
}

pub(crate) async fn run_delete(ctx: &RunContext, args: DeleteArgs) -> Result<()> {
    let mut store = HistoryStore::load_from_home(&ctx.home).await;
    let id = store.get(&args.id)?.id.clone();
    if store.delete(&id).await? {
        println!("Deleted {}", short_id(&id));
    }
    Ok(())
}

fn write_entry_header<W: Write>(entry: &HistoryEntry, writer: &mut W) -> io::Result<()> {
    writeln!(
        writer,
        "{}  {}  {}",
        entry.id,
        format_timestamp(entry.timestamp),
        entry.label
    )?;
    writeln!(writer)
}

#[cfg(test)]
mod tests {
    use super::*;
    use eda_copilot_protocol::MultiLogAnalysisResult;

    #[test]
    fn header_names_the_entry() {
        let result = MultiLogAnalysisResult {
            overall_verdict: Some("GO".to_string()),
            ..Default::default()
        };
        let entry = HistoryEntry {
            id: "0f8e2c3a-1111-4222-8333-944455556666".to_string(),
            timestamp: 1_772_366_400_000,
            label: HistoryEntry::label_for(&result),
            result,
        };
        let mut buffer = Vec::new();
        write_entry_header(&entry, &mut buffer).unwrap_or_else(|err| panic!("write: {err}"));
        let output = String::from_utf8(buffer).unwrap_or_else(|err| panic!("utf8: {err}"));
        let first = output.lines().next().unwrap_or_default();
        assert!(first.starts_with("0f8e2c3a-1111-4222-8333-944455556666  "), "{first}");
        assert!(first.ends_with("  Review of 0 files (GO)"), "{first}");
        assert!(output.ends_with("\n\n"));
    }
}
