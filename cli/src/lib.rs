//! Command-line front end for tape-out log review.

mod analyze;
pub mod args;
mod history;
mod logging;

use std::path::PathBuf;

use anyhow::Context;
use eda_copilot_core::Config;
use eda_copilot_core::ConfigOverrides;
use eda_copilot_core::find_eda_copilot_home;
use supports_color::Stream;

pub use crate::args::Cli;
pub use crate::args::Color;
use crate::args::Command;
use crate::args::HistoryCommand;

/// Settings shared by every subcommand.
pub(crate) struct RunContext {
    pub home: PathBuf,
    pub overrides: ConfigOverrides,
    pub stdout_color: bool,
}

impl RunContext {
    pub async fn load_config(&self) -> anyhow::Result<Config> {
        Config::load_with_overrides(self.home.clone(), self.overrides.clone())
            .await
            .context("failed to load configuration")
    }
}

pub async fn run_main(cli: Cli) -> anyhow::Result<()> {
    let Cli {
        home,
        model,
        provider,
        color,
        command,
    } = cli;

    let (stdout_with_ansi, stderr_with_ansi) = match color {
        Color::Always => (true, true),
        Color::Never => (false, false),
        Color::Auto => (
            supports_color::on_cached(Stream::Stdout).is_some(),
            supports_color::on_cached(Stream::Stderr).is_some(),
        ),
    };
    logging::init(stderr_with_ansi);

    let home = match home {
        Some(home) => home,
        None => find_eda_copilot_home().context("failed to locate the eda-copilot home")?,
    };
    let ctx = RunContext {
        home,
        overrides: ConfigOverrides {
            model,
            model_provider: provider,
        },
        stdout_color: stdout_with_ansi,
    };

    match command {
        Command::Analyze(args) => analyze::run_analyze(&ctx, args).await,
        Command::History(HistoryCommand::List(args)) => history::run_list(&ctx, args).await,
        Command::History(HistoryCommand::Show(args)) => history::run_show(&ctx, args).await,
        Command::History(HistoryCommand::Delete(args)) => history::run_delete(&ctx, args).await,
    }
}
