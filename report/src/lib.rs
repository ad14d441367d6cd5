//! Plain-text rendering of analysis results for the terminal.
//!
//! Model output is untrusted, so every renderer here accepts results with
//! any field missing and substitutes a fixed default text instead.

#![deny(clippy::print_stdout, clippy::print_stderr)]

mod badge;
mod history;
mod render;
mod selection;
mod style;

pub use badge::DecisionBadge;
pub use history::format_timestamp;
pub use history::render_history_list;
pub use history::short_id;
pub use render::render_log_detail;
pub use render::render_log_inventory;
pub use render::render_report;
pub use selection::RiskBand;
pub use selection::default_selection;
pub use selection::risk_band;
pub use style::Tone;
