//! Terminal rendering of bot replies.

use std::io::Write;
use std::time::Duration;

use chatmate_core::chat::output::{BOT_LABEL, ChatOutput, FAREWELL_MESSAGE};
use console::style;
use indicatif::{ProgressBar, ProgressStyle};

/// Writes bot lines to the terminal, with a spinner while a reply is pending.
pub struct ChatRenderer<W> {
    out: W,
    show_spinner: bool,
    spinner: Option<ProgressBar>,
}

impl<W: Write> ChatRenderer<W> {
    /// Create a renderer writing to `out`.
    ///
    /// The spinner draws on stderr and should only be enabled when it is a
    /// terminal.
    pub fn new(out: W, show_spinner: bool) -> Self {
        Self {
            out,
            show_spinner,
            spinner: None,
        }
    }

    fn clear_spinner(&mut self) {
        if let Some(spinner) = self.spinner.take() {
            spinner.finish_and_clear();
        }
    }

    fn write_bot_line(&mut self, text: &str) {
        let _ = writeln!(self.out, "\n{}{text}", style(BOT_LABEL).cyan().bold());
        let _ = self.out.flush();
    }

    #[cfg(test)]
    fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> ChatOutput for ChatRenderer<W> {
    fn awaiting_reply(&mut self) {
        if !self.show_spinner {
            return;
        }

        let spinner = ProgressBar::new_spinner();
        if let Ok(spinner_style) = ProgressStyle::default_spinner().template("{spinner:.cyan} {msg}") {
            spinner.set_style(spinner_style);
        }
        spinner.set_message("thinking...");
        spinner.enable_steady_tick(Duration::from_millis(80));
        self.spinner = Some(spinner);
    }

    fn reply(&mut self, text: &str) {
        self.clear_spinner();
        self.write_bot_line(text);
    }

    fn farewell(&mut self) {
        self.clear_spinner();
        self.write_bot_line(FAREWELL_MESSAGE);
    }

    fn interrupted(&mut self) {
        let _ = writeln!(
            self.out,
            "{}",
            style("(Type 'bye', 'exit', or 'quit' to end our conversation.)").dim()
        );
        let _ = self.out.flush();
    }
}
