//! Turn a selection of log files into one [`AnalysisRequest`].

use std::path::Path;
use std::path::PathBuf;

use chrono::DateTime;
use eda_copilot_protocol::AnalysisRequest;
use eda_copilot_protocol::HistoryEntry;
use eda_copilot_protocol::LogInput;
use futures::future::try_join_all;
use tracing::debug;

use crate::error::CopilotErr;
use crate::error::Result;

/// Extensions picked up when a directory is expanded.
pub const LOG_EXTENSIONS: [&str; 3] = ["log", "txt", "out"];

/// Number of past analyses summarised into the request.
pub const HISTORY_CONTEXT_ENTRIES: usize = 3;

const CONTEXT_SEPARATOR: &str = "\n---\n";

#[derive(Debug, Clone, PartialEq)]
pub enum BatchOutcome {
    /// Nothing was selected; no request should be sent.
    Empty,
    Ready(AnalysisRequest),
}

fn has_log_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| {
            LOG_EXTENSIONS
                .iter()
                .any(|known| ext.eq_ignore_ascii_case(known))
        })
}

/// Expand directories into the log files they directly contain. Paths that
/// are not directories are kept as given, whatever their extension.
pub async fn collect_log_paths(args: &[PathBuf]) -> Result<Vec<PathBuf>> {
    let mut paths = Vec::new();
    for arg in args {
        if !tokio::fs::metadata(arg).await.is_ok_and(|m| m.is_dir()) {
            paths.push(arg.clone());
            continue;
        }

        let input_err = |source| CopilotErr::InputRead {
            path: arg.clone(),
            source,
        };
        let mut dir = tokio::fs::read_dir(arg).await.map_err(input_err)?;
        let mut found = Vec::new();
        while let Some(entry) = dir.next_entry().await.map_err(input_err)? {
            let path = entry.path();
            let is_file = entry
                .file_type()
                .await
                .is_ok_and(|file_type| file_type.is_file());
            if is_file && has_log_extension(&path) {
                found.push(path);
            }
        }
        found.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
        debug!("expanded {} into {} log files", arg.display(), found.len());
        paths.extend(found);
    }
    Ok(paths)
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

/// Read every file concurrently. The first failure fails the whole batch;
/// there are no partial batches.
pub async fn read_log_inputs(paths: &[PathBuf]) -> Result<Vec<LogInput>> {
    try_join_all(paths.iter().map(|path| async move {
        let content = tokio::fs::read_to_string(path)
            .await
            .map_err(|source| CopilotErr::InputRead {
                path: path.clone(),
                source,
            })?;
        Ok::<_, CopilotErr>(LogInput::new(display_name(path), content))
    }))
    .await
}

fn format_date(timestamp_ms: i64) -> String {
    DateTime::from_timestamp_millis(timestamp_ms)
        .map(|dt| dt.format("%Y-%m-%d").to_string())
        .unwrap_or_else(|| "unknown".to_string())
}

/// Summarise the newest history entries for the model, newest first.
/// `entries` is expected newest first, as kept by the history store.
pub fn historical_context(entries: &[HistoryEntry]) -> String {
    entries
        .iter()
        .take(HISTORY_CONTEXT_ENTRIES)
        .map(|entry| {
            format!(
                "DATE: {}\nVERDICT: {}\nEXECUTIVE: {}",
                format_date(entry.timestamp),
                entry.result.verdict_label(),
                entry.result.global_summary.as_deref().unwrap_or_default()
            )
        })
        .collect::<Vec<_>>()
        .join(CONTEXT_SEPARATOR)
}

fn non_empty(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(str::to_string)
}

/// Assemble the request. Context typed by the user replaces the derived
/// history summary entirely.
pub fn build_request(
    logs: Vec<LogInput>,
    user_question: Option<&str>,
    user_context: Option<&str>,
    history: &[HistoryEntry],
) -> BatchOutcome {
    if logs.is_empty() {
        return BatchOutcome::Empty;
    }
    let historical_context =
        non_empty(user_context).or_else(|| non_empty(Some(historical_context(history).as_str())));
    BatchOutcome::Ready(AnalysisRequest {
        logs,
        user_question: non_empty(user_question),
        historical_context,
    })
}

/// Read `paths` and build the request. An empty selection reads nothing.
pub async fn prepare_batch(
    paths: &[PathBuf],
    user_question: Option<&str>,
    user_context: Option<&str>,
    history: &[HistoryEntry],
) -> Result<BatchOutcome> {
    if paths.is_empty() {
        return Ok(BatchOutcome::Empty);
    }
    let logs = read_log_inputs(paths).await?;
    Ok(build_request(logs, user_question, user_context, history))
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use eda_copilot_protocol::MultiLogAnalysisResult;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    fn temp_dir() -> TempDir {
        TempDir::new().unwrap_or_else(|err| panic!("tempdir: {err}"))
    }

    fn write(dir: &Path, name: &str, contents: &[u8]) -> PathBuf {
        let path = dir.join(name);
        std::fs::write(&path, contents).unwrap_or_else(|err| panic!("write {name}: {err}"));
        path
    }

    fn entry(id: &str, timestamp: i64, verdict: &str, summary: &str) -> HistoryEntry {
        let result = MultiLogAnalysisResult {
            overall_verdict: Some(verdict.to_string()),
            global_summary: Some(summary.to_string()),
            ..Default::default()
        };
        HistoryEntry {
            id: id.to_string(),
            timestamp,
            label: HistoryEntry::label_for(&result),
            result,
        }
    }

    // 2026-03-01T12:00:00Z and the following days.
    const MAR_1: i64 = 1_772_366_400_000;
    const DAY_MS: i64 = 86_400_000;

    #[tokio::test]
    async fn reads_all_files_in_order() {
        let dir = temp_dir();
        let a = write(dir.path(), "synth.log", b"latch inferred");
        let b = write(dir.path(), "drc.out", b"0 violations");

        let logs = read_log_inputs(&[a, b])
            .await
            .unwrap_or_else(|err| panic!("read: {err}"));
        assert_eq!(
            logs,
            vec![
                LogInput::new("synth.log", "latch inferred"),
                LogInput::new("drc.out", "0 violations"),
            ]
        );
    }

    #[tokio::test]
    async fn one_unreadable_file_fails_the_batch() {
        let dir = temp_dir();
        let good = write(dir.path(), "sta.log", b"WNS 0.0");
        let missing = dir.path().join("missing.log");

        let Err(err) = read_log_inputs(&[good, missing.clone()]).await else {
            panic!("missing file should fail");
        };
        assert_matches!(err, CopilotErr::InputRead { path, .. } if path == missing);
    }

    #[tokio::test]
    async fn non_utf8_content_is_an_input_error() {
        let dir = temp_dir();
        let binary = write(dir.path(), "dump.log", &[0xff, 0xfe, 0x00, 0x80]);
        let Err(err) = read_log_inputs(&[binary]).await else {
            panic!("binary file should fail");
        };
        assert_matches!(err, CopilotErr::InputRead { .. });
    }

    #[tokio::test]
    async fn directories_expand_to_log_files_sorted() {
        let dir = temp_dir();
        write(dir.path(), "b_route.LOG", b"");
        write(dir.path(), "a_sta.txt", b"");
        write(dir.path(), "c_lvs.out", b"");
        write(dir.path(), "notes.md", b"");
        std::fs::create_dir(dir.path().join("nested.log"))
            .unwrap_or_else(|err| panic!("mkdir: {err}"));
        let explicit = write(dir.path(), "report.rpt", b"");

        let paths = collect_log_paths(&[dir.path().to_path_buf(), explicit.clone()])
            .await
            .unwrap_or_else(|err| panic!("collect: {err}"));
        let names = paths
            .iter()
            .map(PathBuf::as_path)
            .map(display_name)
            .collect::<Vec<_>>();
        assert_eq!(
            names,
            vec!["a_sta.txt", "b_route.LOG", "c_lvs.out", "report.rpt"]
        );
        assert_eq!(paths[3], explicit);
    }

    #[test]
    fn history_context_is_newest_first_and_capped() {
        let history = vec![
            entry("4", MAR_1 + 3 * DAY_MS, "GO", "all clean"),
            entry("3", MAR_1 + 2 * DAY_MS, "NO-GO", "LVS short on VDD"),
            entry("2", MAR_1 + DAY_MS, "CONDITIONAL GO", "hold fixes pending"),
            entry("1", MAR_1, "NO-GO", "oldest, dropped"),
        ];

        assert_eq!(
            historical_context(&history),
            "DATE: 2026-03-04\nVERDICT: GO\nEXECUTIVE: all clean\n---\n\
             DATE: 2026-03-03\nVERDICT: NO-GO\nEXECUTIVE: LVS short on VDD\n---\n\
             DATE: 2026-03-02\nVERDICT: CONDITIONAL GO\nEXECUTIVE: hold fixes pending"
        );
        assert_eq!(historical_context(&[]), "");
    }

    #[test]
    fn user_context_replaces_history() {
        let history = vec![entry("1", MAR_1, "NO-GO", "LVS short")];
        let logs = vec![LogInput::new("sta.log", "WNS -0.1")];

        let with_user = build_request(logs.clone(), Some("  "), Some("Block B is new"), &history);
        assert_matches!(
            with_user,
            BatchOutcome::Ready(AnalysisRequest { user_question: None, historical_context: Some(ctx), .. })
                if ctx == "Block B is new"
        );

        let derived = build_request(logs.clone(), Some("Check DDR"), Some("   "), &history);
        assert_eq!(
            derived,
            BatchOutcome::Ready(AnalysisRequest {
                logs: logs.clone(),
                user_question: Some("Check DDR".to_string()),
                historical_context: Some(
                    "DATE: 2026-03-01\nVERDICT: NO-GO\nEXECUTIVE: LVS short".to_string()
                ),
            })
        );

        let neither = build_request(logs, None, None, &[]);
        assert_matches!(
            neither,
            BatchOutcome::Ready(AnalysisRequest { historical_context: None, .. })
        );
    }

    #[tokio::test]
    async fn empty_selection_reads_nothing() {
        let outcome = prepare_batch(&[], Some("anything"), None, &[])
            .await
            .unwrap_or_else(|err| panic!("prepare: {err}"));
        assert_eq!(outcome, BatchOutcome::Empty);
        assert_eq!(build_request(Vec::new(), None, None, &[]), BatchOutcome::Empty);
    }
}
