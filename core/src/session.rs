//! State of one review session: what the user is looking at and whether a
//! batch is in flight.

use std::path::PathBuf;

use eda_copilot_api_client::Analyzer;
use eda_copilot_protocol::MultiLogAnalysisResult;
use tracing::debug;
use tracing::error;
use tracing::warn;

use crate::batch::BatchOutcome;
use crate::batch::HISTORY_CONTEXT_ENTRIES;
use crate::batch::prepare_batch;
use crate::error::CopilotErr;
use crate::error::Result;
use crate::history::HistoryStore;

#[derive(Debug, Clone, PartialEq)]
pub enum SessionState {
    Idle,
    Analyzing {
        file_count: usize,
    },
    Complete {
        result: MultiLogAnalysisResult,
        /// Id of the history entry holding `result`, when it was stored.
        history_id: Option<String>,
    },
    /// Terminal until [`Session::reset`].
    Halted {
        message: String,
    },
}

impl SessionState {
    pub fn is_analyzing(&self) -> bool {
        matches!(self, Self::Analyzing { .. })
    }
}

pub struct Session {
    state: SessionState,
    history: HistoryStore,
    question: String,
    context: String,
}

impl Session {
    pub fn new(history: HistoryStore) -> Self {
        Self {
            state: SessionState::Idle,
            history,
            question: String::new(),
            context: String::new(),
        }
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn history(&self) -> &HistoryStore {
        &self.history
    }

    pub fn history_mut(&mut self) -> &mut HistoryStore {
        &mut self.history
    }

    pub fn question(&self) -> &str {
        &self.question
    }

    pub fn context(&self) -> &str {
        &self.context
    }

    /// Review `paths` with `analyzer`.
    ///
    /// An empty selection changes nothing. Any failure while reading or
    /// analyzing leaves the session `Halted` with a user-facing message;
    /// only a submission that cannot start is returned as an error.
    pub async fn submit(
        &mut self,
        paths: &[PathBuf],
        question: &str,
        context: &str,
        analyzer: &dyn Analyzer,
    ) -> Result<&SessionState> {
        match self.state {
            SessionState::Analyzing { .. } => return Err(CopilotErr::Busy),
            SessionState::Halted { .. } => return Err(CopilotErr::SessionHalted),
            SessionState::Idle | SessionState::Complete { .. } => {}
        }
        if paths.is_empty() {
            debug!("no files selected; nothing to analyze");
            return Ok(&self.state);
        }

        self.question = question.to_string();
        self.context = context.to_string();
        self.state = SessionState::Analyzing {
            file_count: paths.len(),
        };

        self.state = match self.run_batch(paths, analyzer).await {
            Ok(Some((result, history_id))) => SessionState::Complete { result, history_id },
            Ok(None) => SessionState::Idle,
            Err(err) => {
                error!("analysis failed: {err}");
                SessionState::Halted {
                    message: err.user_message(),
                }
            }
        };
        Ok(&self.state)
    }

    async fn run_batch(
        &mut self,
        paths: &[PathBuf],
        analyzer: &dyn Analyzer,
    ) -> Result<Option<(MultiLogAnalysisResult, Option<String>)>> {
        let outcome = prepare_batch(
            paths,
            Some(&self.question),
            Some(&self.context),
            self.history.recent(HISTORY_CONTEXT_ENTRIES),
        )
        .await?;
        let BatchOutcome::Ready(request) = outcome else {
            return Ok(None);
        };

        let result = analyzer.analyze(&request).await?;
        let history_id = match self.history.save(result.clone()).await {
            Ok(entry) => Some(entry.id),
            Err(err) => {
                warn!("failed to save analysis to history: {err}");
                None
            }
        };
        Ok(Some((result, history_id)))
    }

    /// Show a stored result without calling the model.
    pub fn load_from_history(&mut self, id: &str) -> Result<&SessionState> {
        if self.state.is_analyzing() {
            return Err(CopilotErr::Busy);
        }
        let entry = self.history.get(id)?;
        self.state = SessionState::Complete {
            result: entry.result.clone(),
            history_id: Some(entry.id.clone()),
        };
        Ok(&self.state)
    }

    /// Back to `Idle` with an empty question and context.
    pub fn reset(&mut self) {
        self.state = SessionState::Idle;
        self.question.clear();
        self.context.clear();
    }
}
