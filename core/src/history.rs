//! Durable list of past analyses, newest first.
//!
//! The whole list lives in one JSON array at `<home>/history.json` and is
//! rewritten on every change. Reading never fails: a missing, unreadable or
//! corrupt file is treated as an empty history.

use std::io::Error as IoError;
use std::io::ErrorKind;
use std::path::Path;
use std::path::PathBuf;

use chrono::Utc;
use eda_copilot_protocol::HistoryEntry;
use eda_copilot_protocol::MultiLogAnalysisResult;
use tracing::info;
use tracing::warn;
use uuid::Uuid;

use crate::error::CopilotErr;
use crate::error::Result;

pub const HISTORY_FILE: &str = "history.json";

/// Maximum number of retained entries. Older entries are evicted first.
pub const HISTORY_LIMIT: usize = 50;

pub fn history_path(eda_copilot_home: &Path) -> PathBuf {
    eda_copilot_home.join(HISTORY_FILE)
}

#[derive(Debug, Clone)]
pub struct HistoryStore {
    path: PathBuf,
    entries: Vec<HistoryEntry>,
}

impl HistoryStore {
    /// Load the history stored at `path`.
    pub async fn load(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let entries = match tokio::fs::read_to_string(&path).await {
            Ok(text) => match serde_json::from_str::<Vec<HistoryEntry>>(&text) {
                Ok(entries) => entries,
                Err(err) => {
                    warn!("ignoring corrupt history at {}: {err}", path.display());
                    Vec::new()
                }
            },
            Err(err) if err.kind() == ErrorKind::NotFound => Vec::new(),
            Err(err) => {
                warn!("failed to read history at {}: {err}", path.display());
                Vec::new()
            }
        };
        Self { path, entries }
    }

    /// Load `<home>/history.json`.
    pub async fn load_from_home(eda_copilot_home: &Path) -> Self {
        Self::load(history_path(eda_copilot_home)).await
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn entries(&self) -> &[HistoryEntry] {
        &self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// The `n` newest entries.
    pub fn recent(&self, n: usize) -> &[HistoryEntry] {
        &self.entries[..n.min(self.entries.len())]
    }

    /// Look up an entry by full id, or by a prefix that matches exactly one
    /// entry.
    pub fn get(&self, id: &str) -> Result<&HistoryEntry> {
        if let Some(entry) = self.entries.iter().find(|entry| entry.id == id) {
            return Ok(entry);
        }
        let mut matches = self
            .entries
            .iter()
            .filter(|entry| !id.is_empty() && entry.id.starts_with(id));
        match (matches.next(), matches.next()) {
            (Some(entry), None) => Ok(entry),
            (Some(_), Some(_)) => Err(CopilotErr::AmbiguousHistoryId(id.to_string())),
            (None, _) => Err(CopilotErr::HistoryNotFound(id.to_string())),
        }
    }

    /// Record `result` as the newest entry and persist the list.
    pub async fn save(&mut self, result: MultiLogAnalysisResult) -> Result<HistoryEntry> {
        let entry = HistoryEntry {
            id: Uuid::new_v4().to_string(),
            timestamp: Utc::now().timestamp_millis(),
            label: HistoryEntry::label_for(&result),
            result,
        };
        self.entries.insert(0, entry.clone());
        self.entries.truncate(HISTORY_LIMIT);
        self.persist().await?;
        info!(id = %entry.id, label = %entry.label, "saved analysis to history");
        Ok(entry)
    }

    /// Remove the entry with exactly this id. Returns `false` and writes
    /// nothing when no entry matches.
    pub async fn delete(&mut self, id: &str) -> Result<bool> {
        let Some(index) = self.entries.iter().position(|entry| entry.id == id) else {
            return Ok(false);
        };
        self.entries.remove(index);
        self.persist().await?;
        Ok(true)
    }

    async fn persist(&self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        let json = serde_json::to_string_pretty(&self.entries)
            .map_err(|e| IoError::other(format!("failed to serialize history: {e}")))?;
        let tmp_path = self.path.with_extension("json.tmp");
        tokio::fs::write(&tmp_path, json).await?;
        tokio::fs::rename(tmp_path, &self.path).await?;
        Ok(())
    }
}
