//! Application layer for GemBridge.
//!
//! Coordinates the domain model with a generation backend: the use case
//! relays prompts, the orchestrator owns the conversation state and runs the
//! submit, dispatch and reconcile pipeline.

pub mod chat_response_usecase;
pub mod conversation_orchestrator;

pub use chat_response_usecase::GetChatResponseUseCase;
pub use conversation_orchestrator::{ConversationOrchestrator, DispatchHandle, SubmitOutcome};
