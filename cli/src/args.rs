use std::path::PathBuf;

use clap::Parser;
use clap::Subcommand;
use clap::ValueEnum;

/// Tape-out readiness review of EDA tool logs.
#[derive(Debug, Parser)]
#[command(name = "eda-copilot", version)]
pub struct Cli {
    /// Directory holding `config.toml` and `history.json`
    /// (defaults to `$EDA_COPILOT_HOME` or `~/.eda-copilot`).
    #[arg(long = "home", value_name = "DIR", global = true)]
    pub home: Option<PathBuf>,

    /// Model the provider should use.
    #[arg(long, short = 'm', global = true)]
    pub model: Option<String>,

    /// Provider id from `config.toml` or a built-in one (`gemini`, `openai`).
    #[arg(long = "provider", value_name = "ID", global = true)]
    pub provider: Option<String>,

    /// Specifies color settings for use in the output.
    #[arg(long = "color", value_enum, default_value_t = Color::Auto, global = true)]
    pub color: Color,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
#[value(rename_all = "kebab-case")]
pub enum Color {
    Always,
    Never,
    #[default]
    Auto,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Review a batch of log files in a single model call.
    Analyze(AnalyzeArgs),

    /// Inspect or prune stored analyses.
    #[command(subcommand)]
    History(HistoryCommand),
}

#[derive(Debug, Parser)]
pub struct AnalyzeArgs {
    /// Log files, or directories to scan for `.log`, `.txt` and `.out` files.
    #[arg(value_name = "PATHS", required = true)]
    pub paths: Vec<PathBuf>,

    /// Question to put to the reviewer instead of the default objective.
    #[arg(long, short = 'q')]
    pub question: Option<String>,

    /// Design context. Replaces the summary of recent runs sent by default.
    #[arg(long)]
    pub context: Option<String>,

    /// Print the result as JSON instead of the report.
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Subcommand)]
pub enum HistoryCommand {
    /// List stored analyses, newest first.
    List(ListArgs),

    /// Show a stored analysis.
    Show(ShowArgs),

    /// Remove a stored analysis.
    Delete(DeleteArgs),
}

#[derive(Debug, Parser)]
pub struct ListArgs {
    /// Emit JSON instead of a table.
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Parser)]
pub struct ShowArgs {
    /// Entry id or a unique prefix of it.
    #[arg(value_name = "ID")]
    pub id: String,

    /// Open this log (1-based) instead of the one needing most attention.
    #[arg(long = "log", value_name = "N", value_parser = clap::value_parser!(u32).range(1..))]
    pub log: Option<u32>,

    /// Emit the stored entry as JSON.
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Parser)]
pub struct DeleteArgs {
    /// Entry id or a unique prefix of it.
    #[arg(value_name = "ID")]
    pub id: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(args).unwrap_or_else(|err| panic!("parse {args:?}: {err}"))
    }

    #[test]
    fn analyze_takes_paths_and_prompt_fields() {
        let cli = parse(&[
            "eda-copilot",
            "analyze",
            "timing.log",
            "runs/",
            "-q",
            "Is hold clean?",
            "--context",
            "7nm, 2GHz",
        ]);
        let Command::Analyze(args) = cli.command else {
            panic!("expected analyze");
        };
        assert_eq!(
            args.paths,
            vec![PathBuf::from("timing.log"), PathBuf::from("runs/")]
        );
        assert_eq!(args.question.as_deref(), Some("Is hold clean?"));
        assert_eq!(args.context.as_deref(), Some("7nm, 2GHz"));
        assert!(!args.json);
        assert_eq!(cli.color, Color::Auto);
    }

    #[test]
    fn analyze_requires_a_path() {
        assert!(Cli::try_parse_from(["eda-copilot", "analyze"]).is_err());
    }

    #[test]
    fn global_flags_follow_the_subcommand() {
        let cli = parse(&[
            "eda-copilot",
            "history",
            "list",
            "--color",
            "never",
            "--provider",
            "openai",
            "-m",
            "gpt-4.1",
        ]);
        assert_eq!(cli.color, Color::Never);
        assert_eq!(cli.provider.as_deref(), Some("openai"));
        assert_eq!(cli.model.as_deref(), Some("gpt-4.1"));
    }

    #[test]
    fn show_log_index_is_one_based() {
        assert!(
            Cli::try_parse_from(["eda-copilot", "history", "show", "abc", "--log", "0"]).is_err()
        );
        let cli = parse(&["eda-copilot", "history", "show", "abc", "--log", "2"]);
        let Command::History(HistoryCommand::Show(args)) = cli.command else {
            panic!("expected history show");
        };
        assert_eq!(args.log, Some(2));
    }
}
