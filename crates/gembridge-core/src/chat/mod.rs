//! Conversation domain module.
//!
//! # Module Structure
//!
//! - `message`: Conversation message types (`MessageOrigin`, `ConversationMessage`)
//! - `state`: Observable conversation snapshot (`ConversationState`)

mod message;
mod state;

pub use message::{ConversationMessage, MessageOrigin};
pub use state::ConversationState;
