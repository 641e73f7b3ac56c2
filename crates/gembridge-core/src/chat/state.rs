//! Conversation state snapshot.
//!
//! `ConversationState` is a plain value. The orchestrator owns the only
//! writable copy and publishes clones to observers, so the transition methods
//! below only ever run on the owner's copy.

use serde::{Deserialize, Serialize};

use super::message::ConversationMessage;

/// Everything the presentation layer needs to render a conversation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversationState {
    messages: Vec<ConversationMessage>,
    is_loading: bool,
    error: Option<String>,
    is_settings_open: bool,
}

impl ConversationState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Messages in chronological (insertion) order.
    pub fn messages(&self) -> &[ConversationMessage] {
        &self.messages
    }

    /// True while a dispatch is outstanding and not yet reconciled.
    pub fn is_loading(&self) -> bool {
        self.is_loading
    }

    /// Description of the last failed generation, if any.
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn is_settings_open(&self) -> bool {
        self.is_settings_open
    }

    /// Appends the user's message, marks the state busy and clears any prior error.
    pub fn begin_submission(&mut self, message: ConversationMessage) {
        self.messages.push(message);
        self.is_loading = true;
        self.error = None;
    }

    /// Appends the assistant reply and clears the busy flag.
    pub fn apply_success(&mut self, reply: ConversationMessage) {
        self.messages.push(reply);
        self.is_loading = false;
    }

    /// Records the failure description and clears the busy flag.
    ///
    /// The message sequence is left untouched.
    pub fn apply_failure(&mut self, description: impl Into<String>) {
        self.error = Some(description.into());
        self.is_loading = false;
    }

    pub fn toggle_settings(&mut self) {
        self.is_settings_open = !self.is_settings_open;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chat::MessageOrigin;

    #[test]
    fn test_initial_state_is_idle() {
        let state = ConversationState::new();
        assert!(state.messages().is_empty());
        assert!(!state.is_loading());
        assert!(state.error().is_none());
        assert!(!state.is_settings_open());
    }

    #[test]
    fn test_begin_submission_clears_previous_error() {
        let mut state = ConversationState::new();
        state.begin_submission(ConversationMessage::user("first"));
        state.apply_failure("boom");
        assert_eq!(state.error(), Some("boom"));

        state.begin_submission(ConversationMessage::user("second"));
        assert!(state.error().is_none());
        assert!(state.is_loading());
        assert_eq!(state.messages().len(), 2);
    }

    #[test]
    fn test_failure_keeps_messages() {
        let mut state = ConversationState::new();
        state.begin_submission(ConversationMessage::user("X"));
        state.apply_failure("network unreachable");

        assert_eq!(state.messages().len(), 1);
        assert_eq!(state.messages()[0].origin(), MessageOrigin::User);
        assert!(!state.is_loading());
    }

    #[test]
    fn test_toggle_settings_does_not_touch_pipeline() {
        let mut state = ConversationState::new();
        state.begin_submission(ConversationMessage::user("X"));
        let before = state.clone();

        state.toggle_settings();
        assert!(state.is_settings_open());
        assert_eq!(state.messages(), before.messages());
        assert_eq!(state.is_loading(), before.is_loading());

        state.toggle_settings();
        assert_eq!(state, before);
    }
}
