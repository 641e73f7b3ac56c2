//! Turns successive state snapshots into terminal output.

use gembridge_core::chat::{ConversationState, MessageOrigin};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenderLine {
    User(String),
    Assistant(String),
    Thinking,
    Error(String),
    SettingsPanel { open: bool },
}

/// Remembers what has already been shown so each snapshot only yields the delta.
///
/// Snapshots can be skipped (the receiver only keeps the latest), so an error
/// is keyed by the transcript length it belongs to rather than by the busy
/// edge that preceded it.
#[derive(Debug, Default)]
pub struct TranscriptRenderer {
    printed_messages: usize,
    was_loading: bool,
    settings_open: bool,
    shown_error: Option<(usize, String)>,
}

impl TranscriptRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn render(&mut self, state: &ConversationState) -> Vec<RenderLine> {
        let mut lines = Vec::new();

        for message in state.messages().iter().skip(self.printed_messages) {
            let text = message.content().to_string();
            lines.push(match message.origin() {
                MessageOrigin::User => RenderLine::User(text),
                MessageOrigin::Assistant => RenderLine::Assistant(text),
            });
        }
        self.printed_messages = state.messages().len();

        if state.is_loading() && !self.was_loading {
            lines.push(RenderLine::Thinking);
        }
        self.was_loading = state.is_loading();

        if let Some(error) = state.error() {
            let key = (state.messages().len(), error.to_string());
            if self.shown_error.as_ref() != Some(&key) {
                lines.push(RenderLine::Error(key.1.clone()));
                self.shown_error = Some(key);
            }
        }

        if state.is_settings_open() != self.settings_open {
            self.settings_open = state.is_settings_open();
            lines.push(RenderLine::SettingsPanel {
                open: self.settings_open,
            });
        }

        lines
    }
}
