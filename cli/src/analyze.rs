use std::io;
use std::io::Write;

use anyhow::Result;
use anyhow::anyhow;
use anyhow::bail;
use eda_copilot_api_client::AnalysisClient;
use eda_copilot_api_client::AnalysisClientConfig;
use eda_copilot_api_client::client::http::default_http_client;
use eda_copilot_core::CopilotErr;
use eda_copilot_core::HistoryStore;
use eda_copilot_core::Session;
use eda_copilot_core::SessionState;
use eda_copilot_core::batch::collect_log_paths;
use eda_copilot_protocol::MultiLogAnalysisResult;
use eda_copilot_report::render_report;
use eda_copilot_report::short_id;
use tracing::info;

use crate::RunContext;
use crate::args::AnalyzeArgs;

pub(crate) async fn run_analyze(ctx: &RunContext, args: AnalyzeArgs) -> Result<()> {
    let AnalyzeArgs {
        paths,
        question,
        context,
        json,
    } = args;

    let config = ctx.load_config().await?;
    let paths = collect_log_paths(&paths).await?;
    if paths.is_empty() {
        eprintln!("No log files found; nothing to analyze.");
        return Ok(());
    }

    let client = AnalysisClient::new(AnalysisClientConfig {
        http_client: default_http_client().map_err(user_facing)?,
        provider: config.model_provider.clone(),
        model: config.model.clone(),
    })
    .map_err(user_facing)?;
    info!(
        provider = %config.model_provider_id,
        model = %config.model,
        files = paths.len(),
        "submitting batch"
    );

    let history = HistoryStore::load_from_home(&config.eda_copilot_home).await;
    let mut session = Session::new(history);
    let state = session
        .submit(
            &paths,
            question.as_deref().unwrap_or_default(),
            context.as_deref().unwrap_or_default(),
            &client,
        )
        .await?;

    match state {
        SessionState::Complete { result, history_id } => {
            let stdout = io::stdout();
            let mut out = stdout.lock();
            write_result(result, json, ctx.stdout_color, &mut out)?;
            if let Some(id) = history_id {
                eprintln!("{}", saved_note(id));
            }
            Ok(())
        }
        SessionState::Halted { message } => bail!("{message}"),
        SessionState::Idle | SessionState::Analyzing { .. } => Ok(()),
    }
}

fn user_facing(err: eda_copilot_api_client::Error) -> anyhow::Error {
    anyhow!(CopilotErr::from(err).user_message())
}

pub(crate) fn write_result<W: Write>(
    result: &MultiLogAnalysisResult,
    json: bool,
    color_enabled: bool,
    writer: &mut W,
) -> Result<()> {
    if json {
        writeln!(writer, "{}", serde_json::to_string_pretty(result)?)?;
    } else {
        render_report(result, None, color_enabled, writer)?;
    }
    Ok(())
}

fn saved_note(id: &str) -> String {
    format!("Saved to history as {}", short_id(id))
}
