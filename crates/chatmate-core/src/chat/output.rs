//! Presentation port for the conversation loop.

/// Label printed before every bot line.
pub const BOT_LABEL: &str = "Bot: ";

/// Farewell printed when the conversation ends.
pub const FAREWELL_MESSAGE: &str =
    "Goodbye! It was nice chatting with you. Keep practicing your English! 👋";

/// Format a reply the way it is shown to the user.
pub fn bot_line(text: &str) -> String {
    format!("{BOT_LABEL}{text}")
}

/// Receives everything the conversation loop shows to the user.
pub trait ChatOutput {
    /// A request is about to be sent; the reply is pending.
    fn awaiting_reply(&mut self) {}

    /// Show the reply (or error text) for the last user message.
    fn reply(&mut self, text: &str);

    /// Show the farewell line.
    fn farewell(&mut self);

    /// Ctrl+C was pressed at the prompt.
    fn interrupted(&mut self) {}
}
