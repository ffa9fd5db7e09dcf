//! Main conversation loop.
//!
//! The loop is RUNNING until the user types an exit word or input ends, at
//! which point it is TERMINATED and hands the history back to the caller.
//! Each message turn appends the user text, asks the completion client for a
//! reply, shows it, appends it, and trims history to its window.
//!
//! A practice session runs the same loop with the TO BE sentence checker
//! attached; lines are checked locally until the user switches to chat.

use tracing::{debug, info};

use chatmate_types::error::InputError;

use crate::llm::provider::LlmProvider;
use crate::practice::{ChatMode, PRACTICE_INTRO, SentenceValidator, render_feedback, requested_mode};

use super::client::CompletionClient;
use super::history::ConversationHistory;
use super::input::{InputEvent, LineSource, TurnInput, classify};
use super::output::ChatOutput;

/// Why the conversation ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EndReason {
    /// The user typed bye, exit, or quit.
    ExitCommand,
    /// Input was closed.
    EndOfInput,
}

/// Final state of a finished conversation.
#[derive(Debug)]
pub struct ConversationOutcome {
    pub history: ConversationHistory,
    pub reason: EndReason,
    /// Number of messages sent to the model.
    pub turns: usize,
    /// Number of sentences checked in practice mode.
    pub practiced: usize,
}

/// Run one message turn: append, complete, show, append, truncate.
pub async fn take_turn<P, O>(
    client: &CompletionClient<P>,
    history: &mut ConversationHistory,
    text: &str,
    output: &mut O,
) where
    P: LlmProvider,
    O: ChatOutput,
{
    history.push_user(text);

    output.awaiting_reply();
    let reply = client.reply(history).await;
    output.reply(&reply);

    history.push_assistant(reply);
    let dropped = history.truncate_to_window();
    if dropped > 0 {
        debug!(dropped, len = history.len(), "History trimmed to window");
    }
}

/// Run the conversation until an exit word or end of input.
///
/// `history` is owned by the loop for its whole run and returned in the
/// outcome; it must contain only the system message when passed in for a
/// fresh conversation.
///
/// # Errors
///
/// Returns [`InputError`] when the line source fails. No farewell is shown
/// in that case.
pub async fn run_conversation<P, I, O>(
    client: &CompletionClient<P>,
    history: ConversationHistory,
    input: &mut I,
    output: &mut O,
) -> Result<ConversationOutcome, InputError>
where
    P: LlmProvider,
    I: LineSource,
    O: ChatOutput,
{
    drive(client, history, None, input, output).await
}

/// Run a session that starts in TO BE practice mode.
///
/// Sentences are checked by `validator` without contacting the model.
/// `chat` switches to the regular conversation, `practice` switches back.
/// Exit words and end of input behave as in [`run_conversation`].
pub async fn run_practice_session<P, I, O>(
    client: &CompletionClient<P>,
    history: ConversationHistory,
    validator: &SentenceValidator,
    input: &mut I,
    output: &mut O,
) -> Result<ConversationOutcome, InputError>
where
    P: LlmProvider,
    I: LineSource,
    O: ChatOutput,
{
    output.reply(PRACTICE_INTRO);
    drive(client, history, Some(validator), input, output).await
}

async fn drive<P, I, O>(
    client: &CompletionClient<P>,
    mut history: ConversationHistory,
    practice: Option<&SentenceValidator>,
    input: &mut I,
    output: &mut O,
) -> Result<ConversationOutcome, InputError>
where
    P: LlmProvider,
    I: LineSource,
    O: ChatOutput,
{
    let mut mode = match practice {
        Some(_) => ChatMode::Practice,
        None => ChatMode::Conversation,
    };
    let mut turns = 0;
    let mut practiced = 0;

    let reason = loop {
        let line = match input.read_line().await? {
            InputEvent::Line(line) => line,
            InputEvent::Eof => {
                output.farewell();
                break EndReason::EndOfInput;
            }
            InputEvent::Interrupted => {
                output.interrupted();
                continue;
            }
        };

        let text = match classify(&line) {
            TurnInput::Exit => {
                output.farewell();
                break EndReason::ExitCommand;
            }
            TurnInput::Skip => continue,
            TurnInput::Message(text) => text,
        };

        if let Some(validator) = practice {
            if let Some(next) = requested_mode(text).filter(|next| *next != mode) {
                debug!(mode = ?next, "Switching mode");
                mode = next;
                output.reply(next.announcement());
                continue;
            }

            if mode == ChatMode::Practice {
                practiced += 1;
                let verdict = validator.validate(text);
                debug!(sentence = practiced, verdict = ?verdict, "Sentence checked");
                output.reply(&render_feedback(text, &verdict));
                continue;
            }
        }

        turns += 1;
        debug!(turn = turns, chars = text.len(), "User message");
        take_turn(client, &mut history, text, output).await;
    };

    info!(turns, practiced, reason = ?reason, history_len = history.len(), "Conversation ended");

    Ok(ConversationOutcome {
        history,
        reason,
        turns,
        practiced,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chat::client::{CompletionParams, ERROR_REPLY_PREFIX};
    use crate::chat::output::{FAREWELL_MESSAGE, bot_line};
    use chatmate_types::llm::{
        CompletionRequest, CompletionResponse, LlmError, Message, MessageRole, StopReason, Usage,
    };
    use std::collections::VecDeque;
    use std::future::Future;
    use std::sync::atomic::{AtomicUsize, Ordering};

    // --- Test doubles ---

    /// Replies "reply N" for the Nth call and counts calls.
    struct CountingProvider {
        calls: AtomicUsize,
        fail: bool,
    }

    impl CountingProvider {
        fn ok() -> Self {
            Self {
                calls: AtomicUsize::new(0),
                fail: false,
            }
        }

        fn failing() -> Self {
            Self {
                calls: AtomicUsize::new(0),
                fail: true,
            }
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    impl LlmProvider for CountingProvider {
        fn name(&self) -> &str {
            "counting"
        }

        fn complete(
            &self,
            _request: &CompletionRequest,
        ) -> impl Future<Output = Result<CompletionResponse, LlmError>> + Send {
            let n = self.calls.fetch_add(1, Ordering::SeqCst) + 1;
            let fail = self.fail;
            async move {
                if fail {
                    return Err(LlmError::Provider {
                        message: "network unreachable".to_string(),
                    });
                }
                Ok(CompletionResponse {
                    id: format!("resp-{n}"),
                    content: format!("reply {n}"),
                    model: "test-model".to_string(),
                    stop_reason: StopReason::EndTurn,
                    usage: Usage::default(),
                })
            }
        }
    }

    /// Yields scripted events, then end of input.
    struct ScriptedInput {
        events: VecDeque<Result<InputEvent, InputError>>,
    }

    impl ScriptedInput {
        fn lines(lines: &[&str]) -> Self {
            Self {
                events: lines
                    .iter()
                    .map(|l| Ok(InputEvent::Line(l.to_string())))
                    .collect(),
            }
        }

        fn events(events: Vec<InputEvent>) -> Self {
            Self {
                events: events.into_iter().map(Ok).collect(),
            }
        }

        fn results(events: Vec<Result<InputEvent, InputError>>) -> Self {
            Self {
                events: events.into(),
            }
        }
    }

    impl LineSource for ScriptedInput {
        fn read_line(&mut self) -> impl Future<Output = Result<InputEvent, InputError>> {
            let event = self.events.pop_front().unwrap_or(Ok(InputEvent::Eof));
            async move { event }
        }
    }

    #[derive(Default)]
    struct RecordingOutput {
        lines: Vec<String>,
        awaiting: usize,
        interrupts: usize,
    }

    impl ChatOutput for RecordingOutput {
        fn awaiting_reply(&mut self) {
            self.awaiting += 1;
        }

        fn reply(&mut self, text: &str) {
            self.lines.push(bot_line(text));
        }

        fn farewell(&mut self) {
            self.lines.push(bot_line(FAREWELL_MESSAGE));
        }

        fn interrupted(&mut self) {
            self.interrupts += 1;
        }
    }

    fn client(provider: CountingProvider) -> CompletionClient<CountingProvider> {
        CompletionClient::new(provider, CompletionParams::default())
    }

    fn fresh_history() -> ConversationHistory {
        ConversationHistory::new("You are a helpful English conversation partner.", 20)
    }

    // --- Tests ---

    #[tokio::test]
    async fn test_exit_words_terminate_without_completion() {
        for word in ["bye", "EXIT", "  Quit  "] {
            let client = client(CountingProvider::ok());
            let mut input = ScriptedInput::lines(&[word, "Hello"]);
            let mut output = RecordingOutput::default();

            let outcome = run_conversation(&client, fresh_history(), &mut input, &mut output)
            .await
            .unwrap();

            assert_eq!(outcome.reason, EndReason::ExitCommand);
            assert_eq!(client.provider().calls(), 0);
            assert_eq!(outcome.history.len(), 1);
            assert_eq!(output.lines, vec![bot_line(FAREWELL_MESSAGE)]);
        }
    }

    #[tokio::test]
    async fn test_blank_input_never_calls_or_mutates() {
        let client = client(CountingProvider::ok());
        let mut input = ScriptedInput::lines(&["", "   ", "\t", "bye"]);
        let mut output = RecordingOutput::default();

        let outcome = run_conversation(&client, fresh_history(), &mut input, &mut output)
            .await
            .unwrap();

        assert_eq!(client.provider().calls(), 0);
        assert_eq!(outcome.turns, 0);
        assert_eq!(outcome.history.len(), 1);
        assert_eq!(output.awaiting, 0);
    }

    #[tokio::test]
    async fn test_hello_scenario() {
        let client = client(CountingProvider::ok());
        let mut input = ScriptedInput::lines(&["Hello", "bye"]);
        let mut output = RecordingOutput::default();

        let outcome = run_conversation(&client, fresh_history(), &mut input, &mut output)
            .await
            .unwrap();

        let messages = outcome.history.messages();
        assert_eq!(messages.len(), 3);
        assert_eq!(messages[0].role, MessageRole::System);
        assert_eq!(messages[1], Message::user("Hello"));
        assert_eq!(messages[2], Message::assistant("reply 1"));
        assert_eq!(output.lines[0], "Bot: reply 1");
        assert_eq!(output.awaiting, 1);
        assert_eq!(outcome.turns, 1);
    }

    #[tokio::test]
    async fn test_user_text_is_trimmed_before_append() {
        let client = client(CountingProvider::ok());
        let mut input = ScriptedInput::lines(&["   How are you?  "]);
        let mut output = RecordingOutput::default();

        let outcome = run_conversation(&client, fresh_history(), &mut input, &mut output)
            .await
            .unwrap();

        assert_eq!(outcome.history.messages()[1], Message::user("How are you?"));
    }

    #[tokio::test]
    async fn test_twenty_five_turns_keep_system_plus_last_twenty() {
        let client = client(CountingProvider::ok());
        let lines: Vec<String> = (1..=25).map(|i| format!("message {i}")).collect();
        let refs: Vec<&str> = lines.iter().map(String::as_str).collect();
        let mut input = ScriptedInput::lines(&refs);
        let mut output = RecordingOutput::default();

        let outcome = run_conversation(&client, fresh_history(), &mut input, &mut output)
            .await
            .unwrap();

        assert_eq!(client.provider().calls(), 25);
        assert_eq!(outcome.reason, EndReason::EndOfInput);
        let messages = outcome.history.messages();
        assert_eq!(messages.len(), 21);
        assert_eq!(messages[0].role, MessageRole::System);
        assert_eq!(messages[1], Message::user("message 16"));
        assert_eq!(messages[2], Message::assistant("reply 16"));
        assert_eq!(messages[20], Message::assistant("reply 25"));
    }

    #[tokio::test]
    async fn test_failing_client_reply_is_shown_and_kept() {
        let client = client(CountingProvider::failing());
        let mut input = ScriptedInput::lines(&["Hello", "Still there?", "quit"]);
        let mut output = RecordingOutput::default();

        let outcome = run_conversation(&client, fresh_history(), &mut input, &mut output)
            .await
            .unwrap();

        let replies = &output.lines[..2];
        for line in replies {
            assert!(line.starts_with(&format!("Bot: {ERROR_REPLY_PREFIX}")), "line: {line}");
        }
        let assistant: Vec<&Message> = outcome
            .history
            .messages()
            .iter()
            .filter(|m| m.role == MessageRole::Assistant)
            .collect();
        assert_eq!(assistant.len(), 2);
        for m in assistant {
            assert!(m.content.starts_with(ERROR_REPLY_PREFIX));
        }
    }

    #[tokio::test]
    async fn test_end_of_input_says_farewell() {
        let client = client(CountingProvider::ok());
        let mut input = ScriptedInput::lines(&["Hello"]);
        let mut output = RecordingOutput::default();

        let outcome = run_conversation(&client, fresh_history(), &mut input, &mut output)
            .await
            .unwrap();

        assert_eq!(outcome.reason, EndReason::EndOfInput);
        assert_eq!(output.lines.last().unwrap(), &bot_line(FAREWELL_MESSAGE));
        assert_eq!(outcome.history.len(), 3);
    }

    #[tokio::test]
    async fn test_interrupt_keeps_running() {
        let client = client(CountingProvider::ok());
        let mut input = ScriptedInput::events(vec![
            InputEvent::Interrupted,
            InputEvent::Line("Hello".to_string()),
            InputEvent::Interrupted,
            InputEvent::Line("exit".to_string()),
        ]);
        let mut output = RecordingOutput::default();

        let outcome = run_conversation(&client, fresh_history(), &mut input, &mut output)
            .await
            .unwrap();

        assert_eq!(output.interrupts, 2);
        assert_eq!(outcome.reason, EndReason::ExitCommand);
        assert_eq!(outcome.history.len(), 3);
    }

    #[tokio::test]
    async fn test_take_turn_truncates_after_append() {
        let client = client(CountingProvider::ok());
        let mut history = ConversationHistory::new("sys", 2);
        let mut output = RecordingOutput::default();

        take_turn(&client, &mut history, "one", &mut output).await;
        take_turn(&client, &mut history, "two", &mut output).await;

        assert_eq!(history.len(), 3);
        assert_eq!(history.system().content, "sys");
        assert_eq!(history.messages()[1], Message::user("two"));
        assert_eq!(history.messages()[2], Message::assistant("reply 2"));
    }

    #[tokio::test]
    async fn test_input_failure_stops_without_farewell() {
        let client = client(CountingProvider::ok());
        let mut input = ScriptedInput::results(vec![
            Ok(InputEvent::Line("Hello".to_string())),
            Err(InputError("stream did not contain valid UTF-8".to_string())),
            Ok(InputEvent::Line("How are you?".to_string())),
        ]);
        let mut output = RecordingOutput::default();

        let err = run_conversation(&client, fresh_history(), &mut input, &mut output)
            .await
            .unwrap_err();

        assert_eq!(
            err.to_string(),
            "failed to read input: stream did not contain valid UTF-8"
        );
        assert_eq!(client.provider().calls(), 1);
        assert_eq!(output.lines, vec!["Bot: reply 1".to_string()]);
        assert_eq!(input.events.len(), 1);
    }

    fn validator() -> SentenceValidator {
        SentenceValidator::new().unwrap()
    }

    #[tokio::test]
    async fn test_practice_checks_sentences_without_model() {
        let client = client(CountingProvider::ok());
        let validator = validator();
        let mut input = ScriptedInput::lines(&["I am a student.", "she are happy", "bye"]);
        let mut output = RecordingOutput::default();

        let outcome = run_practice_session(&client, fresh_history(), &validator, &mut input, &mut output)
            .await
            .unwrap();

        assert_eq!(client.provider().calls(), 0);
        assert_eq!(outcome.practiced, 2);
        assert_eq!(outcome.turns, 0);
        assert_eq!(outcome.history.len(), 1);
        assert_eq!(output.lines[0], bot_line(PRACTICE_INTRO));
        assert!(output.lines[1].starts_with("Bot: ✅ Correct sentence in present affirmative!"));
        assert!(output.lines[2].starts_with("Bot: ❌ Invalid sentence."));
        assert!(output.lines[2].contains("She is happy."));
        assert_eq!(output.lines[3], bot_line(FAREWELL_MESSAGE));
    }

    #[tokio::test]
    async fn test_practice_switches_to_chat_and_back() {
        let client = client(CountingProvider::ok());
        let validator = validator();
        let mut input = ScriptedInput::lines(&["chat", "Hello", "practice", "He is a teacher.", "quit"]);
        let mut output = RecordingOutput::default();

        let outcome = run_practice_session(&client, fresh_history(), &validator, &mut input, &mut output)
            .await
            .unwrap();

        assert_eq!(client.provider().calls(), 1);
        assert_eq!(outcome.turns, 1);
        assert_eq!(outcome.practiced, 1);
        assert_eq!(outcome.reason, EndReason::ExitCommand);
        assert_eq!(outcome.history.messages()[1], Message::user("Hello"));
        assert_eq!(output.lines[1], bot_line(ChatMode::Conversation.announcement()));
        assert_eq!(output.lines[2], "Bot: reply 1");
        assert_eq!(output.lines[3], bot_line(ChatMode::Practice.announcement()));
    }

    #[tokio::test]
    async fn test_mode_words_go_to_model_in_plain_conversation() {
        let client = client(CountingProvider::ok());
        let mut input = ScriptedInput::lines(&["practice", "chat"]);
        let mut output = RecordingOutput::default();

        let outcome = run_conversation(&client, fresh_history(), &mut input, &mut output)
            .await
            .unwrap();

        assert_eq!(client.provider().calls(), 2);
        assert_eq!(outcome.history.messages()[1], Message::user("practice"));
        assert_eq!(outcome.practiced, 0);
    }
}
