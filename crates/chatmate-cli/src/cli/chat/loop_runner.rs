//! Main chat loop orchestration.
//!
//! Resolves configuration and credentials, prints the banner, then hands a
//! terminal line source and renderer to the core conversation loop.

use std::io::IsTerminal;
use std::process::ExitCode;

use chatmate_core::chat::client::CompletionClient;
use chatmate_core::chat::conversation::{
    ConversationOutcome, run_conversation, run_practice_session,
};
use chatmate_core::chat::history::ConversationHistory;
use chatmate_core::chat::input::LineSource;
use chatmate_core::chat::output::ChatOutput;
use chatmate_core::llm::provider::LlmProvider;
use chatmate_core::practice::SentenceValidator;
use chatmate_infra::config::{load_chat_config, resolve_data_dir};
use chatmate_infra::llm::initialize_client;
use chatmate_infra::secret::EnvSecretProvider;
use chatmate_types::error::{ConfigError, InputError};
use console::style;
use tracing::info;

use super::banner::{print_welcome_banner, write_missing_credential};
use super::input::{ChatInput, PipedInput};
use super::renderer::ChatRenderer;
use crate::cli::Cli;

/// Prompt shown before each user line.
const USER_PROMPT: &str = "You: ";

/// Run an interactive chat session.
///
/// Returns the process exit code: failure for a missing credential or
/// invalid configuration, success once the conversation ends. A broken
/// input stream is returned as an error.
pub async fn run_chat_loop(cli: &Cli) -> anyhow::Result<ExitCode> {
    let data_dir = resolve_data_dir();
    let mut config = match load_chat_config(&data_dir).await {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{} {e}", style("Error:").red().bold());
            return Ok(ExitCode::FAILURE);
        }
    };

    if let Some(model) = &cli.model {
        config.model = model.clone();
        if let Err(e) = config.validate() {
            eprintln!("{} {e}", style("Error:").red().bold());
            return Ok(ExitCode::FAILURE);
        }
    }

    let client = match initialize_client(&config, &EnvSecretProvider::new()) {
        Ok(client) => client,
        Err(ConfigError::MissingCredential { var }) => {
            write_missing_credential(&mut std::io::stdout(), &var)?;
            return Ok(ExitCode::FAILURE);
        }
        Err(e) => {
            eprintln!("{} {e}", style("Error:").red().bold());
            return Ok(ExitCode::FAILURE);
        }
    };

    let validator = if cli.practice {
        Some(SentenceValidator::new()?)
    } else {
        None
    };

    print_welcome_banner();

    let history = ConversationHistory::new(
        config.system_prompt_for(cli.name.as_deref()),
        config.history_window,
    );

    let outcome = if std::io::stdin().is_terminal() {
        let prompt = format!("{} ", style(USER_PROMPT.trim_end()).green().bold());
        let (mut input, writer) = ChatInput::new(prompt)?;
        let mut output = ChatRenderer::new(writer, std::io::stderr().is_terminal());
        let outcome = converse(&client, history, validator.as_ref(), &mut input, &mut output).await;
        input.flush();
        outcome?
    } else {
        let mut input = PipedInput::stdin(USER_PROMPT);
        let mut output = ChatRenderer::new(std::io::stdout(), false);
        converse(&client, history, validator.as_ref(), &mut input, &mut output).await?
    };

    log_outcome(&outcome);
    Ok(ExitCode::SUCCESS)
}

async fn converse<P, I, O>(
    client: &CompletionClient<P>,
    history: ConversationHistory,
    validator: Option<&SentenceValidator>,
    input: &mut I,
    output: &mut O,
) -> Result<ConversationOutcome, InputError>
where
    P: LlmProvider,
    I: LineSource,
    O: ChatOutput,
{
    match validator {
        Some(validator) => run_practice_session(client, history, validator, input, output).await,
        None => run_conversation(client, history, input, output).await,
    }
}

fn log_outcome(outcome: &ConversationOutcome) {
    info!(
        turns = outcome.turns,
        practiced = outcome.practiced,
        reason = ?outcome.reason,
        history_len = outcome.history.len(),
        "Chat session finished"
    );
}
