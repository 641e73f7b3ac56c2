//! Domain layer for GemBridge.
//!
//! Holds the conversation model, the generation seam that backends implement,
//! and the credential types injected at startup. Nothing in this crate talks to
//! the network or the file system.

pub mod chat;
pub mod config;
pub mod error;
pub mod generation;
pub mod secret;

// Re-export common types
pub use chat::{ConversationMessage, ConversationState, MessageOrigin};
pub use error::GemBridgeError;
pub use generation::{FailureCause, GenerationConfig, GenerationError, GenerationService};
