//! Bounded conversation history.
//!
//! `ConversationHistory` keeps the system message at index 0 for its whole
//! lifetime and retains at most `window` user/assistant messages after it.
//! Messages are only handed out by shared reference, so nothing already in
//! history can be edited.

use chatmate_types::llm::Message;

/// Ordered conversation history anchored by a single system message.
#[derive(Debug, Clone)]
pub struct ConversationHistory {
    messages: Vec<Message>,
    window: usize,
}

impl ConversationHistory {
    /// Create a history holding only the system message.
    ///
    /// `window` is the number of most recent user/assistant messages kept
    /// by [`truncate_to_window`](Self::truncate_to_window).
    pub fn new(system_prompt: impl Into<String>, window: usize) -> Self {
        Self {
            messages: vec![Message::system(system_prompt)],
            window,
        }
    }

    /// Append a user message.
    pub fn push_user(&mut self, content: impl Into<String>) {
        self.messages.push(Message::user(content));
    }

    /// Append an assistant message.
    pub fn push_assistant(&mut self, content: impl Into<String>) {
        self.messages.push(Message::assistant(content));
    }

    /// Drop the oldest non-system messages until at most `1 + window` remain.
    ///
    /// Returns the number of messages removed.
    pub fn truncate_to_window(&mut self) -> usize {
        let limit = self.window + 1;
        if self.messages.len() <= limit {
            return 0;
        }
        let excess = self.messages.len() - limit;
        self.messages.drain(1..1 + excess);
        excess
    }

    /// All messages in order, system message first.
    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    /// The anchoring system message.
    pub fn system(&self) -> &Message {
        &self.messages[0]
    }

    /// Number of messages including the system message.
    pub fn len(&self) -> usize {
        self.messages.len()
    }

    /// True when no user or assistant message has been added.
    pub fn has_only_system(&self) -> bool {
        self.messages.len() == 1
    }

    pub fn window(&self) -> usize {
        self.window
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chatmate_types::llm::MessageRole;

    #[test]
    fn test_new_holds_only_system_message() {
        let history = ConversationHistory::new("Be helpful.", 20);
        assert_eq!(history.len(), 1);
        assert!(history.has_only_system());
        assert_eq!(history.system().role, MessageRole::System);
        assert_eq!(history.system().content, "Be helpful.");
    }

    #[test]
    fn test_push_keeps_insertion_order() {
        let mut history = ConversationHistory::new("sys", 20);
        history.push_user("Hello");
        history.push_assistant("Hi there!");

        let messages = history.messages();
        assert_eq!(messages.len(), 3);
        assert_eq!(messages[1], Message::user("Hello"));
        assert_eq!(messages[2], Message::assistant("Hi there!"));
        assert!(!history.has_only_system());
    }

    #[test]
    fn test_truncate_noop_within_window() {
        let mut history = ConversationHistory::new("sys", 4);
        history.push_user("a");
        history.push_assistant("b");
        assert_eq!(history.truncate_to_window(), 0);
        assert_eq!(history.len(), 3);
    }

    #[test]
    fn test_truncate_drops_oldest_and_keeps_system() {
        let mut history = ConversationHistory::new("sys", 4);
        for i in 0..3 {
            history.push_user(format!("q{i}"));
            history.push_assistant(format!("a{i}"));
        }
        assert_eq!(history.len(), 7);

        let removed = history.truncate_to_window();
        assert_eq!(removed, 2);
        assert_eq!(history.len(), 5);
        assert_eq!(history.system().content, "sys");
        let contents: Vec<&str> = history.messages()[1..]
            .iter()
            .map(|m| m.content.as_str())
            .collect();
        assert_eq!(contents, vec!["q1", "a1", "q2", "a2"]);
    }

    #[test]
    fn test_default_window_caps_at_twenty_one() {
        let mut history = ConversationHistory::new("sys", 20);
        for i in 0..30 {
            history.push_user(format!("q{i}"));
            history.push_assistant(format!("a{i}"));
            history.truncate_to_window();
            assert!(history.len() <= 21);
            assert_eq!(history.messages()[0].role, MessageRole::System);
        }
        assert_eq!(history.len(), 21);
        assert_eq!(history.messages()[1].content, "q20");
        assert_eq!(history.messages()[20].content, "a29");
    }

    #[test]
    fn test_zero_window_leaves_only_system() {
        let mut history = ConversationHistory::new("sys", 0);
        history.push_user("q");
        history.push_assistant("a");
        assert_eq!(history.truncate_to_window(), 2);
        assert_eq!(history.messages(), &[Message::system("sys")]);
    }
}
