//! Line sources for the chat loop.
//!
//! [`ChatInput`] wraps `rustyline_async::Readline` for interactive terminals,
//! with proper handling of EOF (Ctrl+D) and interrupt (Ctrl+C). [`PipedInput`]
//! reads plain lines when stdin is not a terminal. Read failures are
//! reported as [`InputError`], never as end of input.

use std::io::Write;

use chatmate_core::chat::input::{InputEvent, LineSource};
use chatmate_types::error::InputError;
use rustyline_async::{Readline, ReadlineError, ReadlineEvent, SharedWriter};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader, Lines, Stdin};

/// Async readline input handler.
pub struct ChatInput {
    rl: Readline,
}

impl ChatInput {
    /// Create a new chat input handler with the given prompt.
    ///
    /// Returns the input handler and a `SharedWriter` that can be used to
    /// print output without interfering with the readline prompt.
    pub fn new(prompt: String) -> Result<(Self, SharedWriter), ReadlineError> {
        let (rl, stdout) = Readline::new(prompt)?;
        Ok((Self { rl }, stdout))
    }

    /// Write out anything still buffered in the shared writer and clear
    /// the prompt line.
    pub fn flush(&mut self) {
        let _ = self.rl.flush();
    }
}

impl LineSource for ChatInput {
    async fn read_line(&mut self) -> Result<InputEvent, InputError> {
        match self.rl.readline().await {
            Ok(ReadlineEvent::Line(line)) => {
                self.rl.add_history_entry(line.clone());
                Ok(InputEvent::Line(line))
            }
            Ok(ReadlineEvent::Eof) => Ok(InputEvent::Eof),
            Ok(ReadlineEvent::Interrupted) => Ok(InputEvent::Interrupted),
            Err(e) => Err(InputError(e.to_string())),
        }
    }
}

/// Line reader for non-interactive stdin.
///
/// Echoes the prompt to stdout before each read so a piped transcript reads
/// the same as an interactive one.
pub struct PipedInput<R> {
    lines: Lines<R>,
    prompt: String,
}

impl PipedInput<BufReader<Stdin>> {
    pub fn stdin(prompt: impl Into<String>) -> Self {
        Self::new(BufReader::new(tokio::io::stdin()), prompt)
    }
}

impl<R: AsyncBufRead + Unpin> PipedInput<R> {
    pub fn new(reader: R, prompt: impl Into<String>) -> Self {
        Self {
            lines: reader.lines(),
            prompt: prompt.into(),
        }
    }
}

impl<R: AsyncBufRead + Unpin> LineSource for PipedInput<R> {
    async fn read_line(&mut self) -> Result<InputEvent, InputError> {
        print!("\n{}", self.prompt);
        let _ = std::io::stdout().flush();

        match self.lines.next_line().await {
            Ok(Some(line)) => Ok(InputEvent::Line(line)),
            Ok(None) => Ok(InputEvent::Eof),
            Err(e) => Err(InputError(e.to_string())),
        }
    }
}
