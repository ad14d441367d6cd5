//! Root of the `eda-copilot-core` library: turning log files into analysis
//! requests, remembering past results, and tracking the review session.

// Prevent accidental direct writes to stdout/stderr in library code. All
// user-visible output must go through the CLI or the tracing stack.
#![deny(clippy::print_stdout, clippy::print_stderr)]

pub mod batch;
pub mod config;
pub mod error;
pub mod history;
pub mod session;

pub use batch::BatchOutcome;
pub use config::Config;
pub use config::ConfigOverrides;
pub use config::find_eda_copilot_home;
pub use error::CopilotErr;
pub use error::Result;
pub use history::HISTORY_LIMIT;
pub use history::HistoryStore;
pub use session::Session;
pub use session::SessionState;
