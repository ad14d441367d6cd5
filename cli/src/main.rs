use clap::Parser;
use eda_copilot_cli::Cli;
use eda_copilot_cli::run_main;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    run_main(Cli::parse()).await
}
