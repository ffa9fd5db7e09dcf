mod cli;

use std::process::ExitCode;

use anyhow::anyhow;
use clap::Parser;

use chatmate_infra::secret::load_dotenv;
use chatmate_observe::tracing_setup::{filter_for_verbosity, init_tracing, shutdown_tracing};

use cli::Cli;

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<ExitCode> {
    // Load .env before anything reads the environment
    load_dotenv();

    let cli = Cli::parse();

    init_tracing(filter_for_verbosity(cli.verbose, cli.quiet), cli.otel)
        .map_err(|e| anyhow!("failed to initialize tracing: {e}"))?;

    let result = cli::chat::loop_runner::run_chat_loop(&cli).await;

    shutdown_tracing();
    result
}
