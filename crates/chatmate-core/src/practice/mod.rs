//! Grammar practice for the verb TO BE.
//!
//! A practice session alternates between two modes: checking the user's
//! sentences locally with [`SentenceValidator`], and the regular model
//! conversation. Typing `chat` or `practice` switches between them.

pub mod feedback;
pub mod validator;

pub use feedback::render_feedback;
pub use validator::{Assessment, IssueKind, SentenceKind, SentenceValidator, Verdict};

/// Introduction shown when a practice session starts.
pub const PRACTICE_INTRO: &str = "Let's practice grammar! Type a sentence in English using the verb TO BE (present or past). Type 'chat' to switch to conversation mode.";

/// Which half of a practice session is active.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChatMode {
    /// Lines go to the model.
    Conversation,
    /// Lines are checked by the sentence validator.
    Practice,
}

impl ChatMode {
    /// Line shown when switching into this mode.
    pub fn announcement(self) -> &'static str {
        match self {
            ChatMode::Conversation => {
                "Switching to chat mode! What would you like to talk about? Type 'practice' to go back to grammar practice."
            }
            ChatMode::Practice => {
                "Switching to practice mode! Please type a sentence using the verb TO BE."
            }
        }
    }
}

/// The mode a line asks for, if it is exactly `chat` or `practice`.
pub fn requested_mode(text: &str) -> Option<ChatMode> {
    let text = text.trim();
    if text.eq_ignore_ascii_case("chat") {
        Some(ChatMode::Conversation)
    } else if text.eq_ignore_ascii_case("practice") {
        Some(ChatMode::Practice)
    } else {
        None
    }
}
