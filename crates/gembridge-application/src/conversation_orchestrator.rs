//! Conversation orchestrator.
//!
//! Owns the single writable [`ConversationState`] and publishes every change
//! through a `tokio::sync::watch` channel, so observers always read the latest
//! snapshot without holding a lock on the owner's copy.
//!
//! # Submission policy
//!
//! At most one dispatch is outstanding. A non-blank submission that arrives
//! while the state is busy is rejected and leaves the state untouched; the
//! busy check and the user-message append happen in one atomic update.
//!
//! # Pipeline
//!
//! ```text
//! Idle --submit--> Dispatching --Ok--> Reconciled-Success --> Idle
//!                              \--Err--> Reconciled-Failure --> Idle
//! ```

use crate::chat_response_usecase::GetChatResponseUseCase;
use futures::FutureExt;
use gembridge_core::chat::{ConversationMessage, ConversationState};
use gembridge_core::generation::{GenerationConfig, GenerationError, GenerationResult};
use std::any::Any;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::Instrument;

/// Result of a call to [`ConversationOrchestrator::submit`].
#[derive(Debug)]
#[must_use = "a dispatched submission carries a handle that can be awaited"]
pub enum SubmitOutcome {
    /// The text was empty or whitespace only; nothing changed.
    IgnoredBlank,
    /// A previous submission is still in flight; nothing changed.
    RejectedBusy,
    /// No Tokio runtime is current on the calling thread; nothing changed.
    RuntimeUnavailable,
    /// The user message was published and the request is running.
    Dispatched(DispatchHandle),
}

impl SubmitOutcome {
    pub fn is_dispatched(&self) -> bool {
        matches!(self, SubmitOutcome::Dispatched(_))
    }

    pub fn into_handle(self) -> Option<DispatchHandle> {
        match self {
            SubmitOutcome::Dispatched(handle) => Some(handle),
            _ => None,
        }
    }
}

/// Tracks one in-flight dispatch.
///
/// Dropping the handle does not cancel the request; it still runs to
/// completion and is reconciled into the state.
#[derive(Debug)]
pub struct DispatchHandle {
    task: JoinHandle<()>,
}

impl DispatchHandle {
    /// Waits until the outcome has been applied to the conversation state.
    pub async fn reconciled(self) {
        if let Err(err) = self.task.await {
            // Only reachable if the runtime shuts down mid-request.
            tracing::error!(error = %err, "dispatch task did not complete");
        }
    }

    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }
}

/// Drives a single conversation.
///
/// Cloning is cheap and every clone operates on the same state.
#[derive(Clone)]
pub struct ConversationOrchestrator {
    get_chat_response: Arc<GetChatResponseUseCase>,
    state: Arc<watch::Sender<ConversationState>>,
}

impl ConversationOrchestrator {
    pub fn new(get_chat_response: Arc<GetChatResponseUseCase>) -> Self {
        let (state, _) = watch::channel(ConversationState::new());
        Self {
            get_chat_response,
            state: Arc::new(state),
        }
    }

    /// Returns a receiver that always holds the latest published snapshot.
    pub fn subscribe(&self) -> watch::Receiver<ConversationState> {
        self.state.subscribe()
    }

    /// Returns a copy of the current state.
    pub fn snapshot(&self) -> ConversationState {
        self.state.borrow().clone()
    }

    /// Submits `text` for generation under `config`.
    ///
    /// The user message, the busy flag and the cleared error are published
    /// before this returns and before the backend is contacted. The backend
    /// call runs on a task spawned onto the current Tokio runtime; without one
    /// the submission is refused and the state is left as it was.
    pub fn submit(&self, text: &str, config: GenerationConfig) -> SubmitOutcome {
        if text.trim().is_empty() {
            tracing::debug!("ignoring blank submission");
            return SubmitOutcome::IgnoredBlank;
        }

        let runtime = match tokio::runtime::Handle::try_current() {
            Ok(runtime) => runtime,
            Err(err) => {
                tracing::error!(error = %err, "submission refused: no async runtime to dispatch on");
                return SubmitOutcome::RuntimeUnavailable;
            }
        };

        let mut accepted = false;
        self.state.send_if_modified(|state| {
            if state.is_loading() {
                return false;
            }
            state.begin_submission(ConversationMessage::user(text));
            accepted = true;
            true
        });

        if !accepted {
            tracing::warn!("submission rejected: a request is already in flight");
            return SubmitOutcome::RejectedBusy;
        }

        let get_chat_response = Arc::clone(&self.get_chat_response);
        let state = Arc::clone(&self.state);
        let prompt = text.to_string();
        let span = tracing::info_span!(
            "dispatch",
            backend = get_chat_response.backend_name(),
            prompt_chars = prompt.chars().count()
        );

        let task = runtime.spawn(
            async move {
                tracing::info!("dispatching prompt");
                let result = AssertUnwindSafe(get_chat_response.execute(&prompt, &config))
                    .catch_unwind()
                    .await
                    .unwrap_or_else(|panic| Err(panic_to_failure(panic)));
                reconcile(&state, result);
            }
            .instrument(span),
        );

        SubmitOutcome::Dispatched(DispatchHandle { task })
    }

    /// Flips the settings panel flag. Never touches the message pipeline.
    pub fn toggle_settings_panel(&self) {
        self.state.send_modify(|state| state.toggle_settings());
        tracing::debug!(open = self.state.borrow().is_settings_open(), "settings panel toggled");
    }
}

fn reconcile(state: &watch::Sender<ConversationState>, result: GenerationResult<String>) {
    match result {
        Ok(text) => {
            state.send_modify(|state| state.apply_success(ConversationMessage::assistant(text)));
            tracing::info!("reconciled success");
        }
        Err(err) => {
            let description = err.to_string();
            state.send_modify(|state| state.apply_failure(description));
            tracing::warn!(error = %err, "reconciled failure");
        }
    }
}

fn panic_to_failure(panic: Box<dyn Any + Send>) -> GenerationError {
    let detail = panic
        .downcast_ref::<&str>()
        .map(|s| s.to_string())
        .or_else(|| panic.downcast_ref::<String>().cloned())
        .unwrap_or_else(|| "unknown panic".to_string());
    GenerationError::internal(format!("Generation backend panicked: {detail}"))
}
