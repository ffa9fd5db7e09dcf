//! Input classification for the conversation loop.
//!
//! Raw lines come from a [`LineSource`] (a readline terminal in the binary,
//! scripted input in tests) and are classified into turn actions.

use std::future::Future;

use chatmate_types::error::InputError;

/// Words that end the conversation, compared case-insensitively after trimming.
pub const EXIT_WORDS: [&str; 3] = ["bye", "exit", "quit"];

/// Events produced by a line source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputEvent {
    /// User submitted a line.
    Line(String),
    /// End of input (Ctrl+D or closed stdin).
    Eof,
    /// Interrupt signal (Ctrl+C).
    Interrupted,
}

/// What the loop should do with a submitted line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TurnInput<'a> {
    /// The user asked to leave.
    Exit,
    /// Nothing to send.
    Skip,
    /// Trimmed text to send to the model.
    Message(&'a str),
}

/// Classify a raw input line.
pub fn classify(line: &str) -> TurnInput<'_> {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return TurnInput::Skip;
    }
    if EXIT_WORDS.iter().any(|w| trimmed.eq_ignore_ascii_case(w)) {
        return TurnInput::Exit;
    }
    TurnInput::Message(trimmed)
}

/// Source of user input lines for the conversation loop.
pub trait LineSource {
    /// Wait for the next input event.
    ///
    /// A closed stream is `Ok(InputEvent::Eof)`; an `Err` means the stream
    /// broke and the conversation must stop.
    fn read_line(&mut self) -> impl Future<Output = Result<InputEvent, InputError>>;
}
