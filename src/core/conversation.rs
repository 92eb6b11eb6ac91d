//! # Conversation
//!
//! Append-only transcript plus the busy flag that keeps exactly one chat
//! request in flight.
//!
//! ```text
//!   Idle ──begin()──▶ Sending ──finish()──▶ Idle
//! ```
//!
//! `begin()` checks `busy` synchronously before anything is pushed, so a
//! second Enter arriving before the next frame is drawn is rejected.

use crate::core::types::ChatTurn;

#[derive(Debug, Default, Clone)]
pub struct Conversation {
    turns: Vec<ChatTurn>,
    busy: bool,
}

impl Conversation {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn turns(&self) -> &[ChatTurn] {
        &self.turns
    }

    pub fn is_busy(&self) -> bool {
        self.busy
    }

    /// Start an exchange. Returns the trimmed question to send, or `None`
    /// when the text is blank or a request is already outstanding.
    pub fn begin(&mut self, text: &str) -> Option<String> {
        let question = text.trim();
        if question.is_empty() || self.busy {
            return None;
        }
        self.turns.push(ChatTurn::user(question));
        self.busy = true;
        Some(question.to_string())
    }

    /// Close the outstanding exchange with the assistant's turn.
    pub fn finish(&mut self, turn: ChatTurn) {
        self.turns.push(turn);
        self.busy = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_begin_trims_and_marks_busy() {
        let mut conv = Conversation::new();
        assert_eq!(conv.begin("  what is this?  ").as_deref(), Some("what is this?"));
        assert!(conv.is_busy());
        assert_eq!(conv.turns(), &[ChatTurn::user("what is this?")]);
    }

    #[test]
    fn test_blank_input_is_noop() {
        let mut conv = Conversation::new();
        assert!(conv.begin("").is_none());
        assert!(conv.begin(" \t\n ").is_none());
        assert!(conv.turns().is_empty());
        assert!(!conv.is_busy());
    }

    #[test]
    fn test_second_begin_rejected_while_busy() {
        let mut conv = Conversation::new();
        conv.begin("first").unwrap();
        assert!(conv.begin("second").is_none());
        assert_eq!(conv.turns().len(), 1);
    }

    #[test]
    fn test_finish_appends_and_returns_to_idle() {
        let mut conv = Conversation::new();
        conv.begin("q").unwrap();
        conv.finish(ChatTurn::assistant("a", None));
        assert!(!conv.is_busy());
        assert_eq!(conv.turns().len(), 2);
        assert!(conv.turns()[0].is_user);
        assert!(!conv.turns()[1].is_user);
        assert!(conv.begin("next").is_some());
    }
}
