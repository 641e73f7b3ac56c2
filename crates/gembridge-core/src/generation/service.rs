use async_trait::async_trait;
use thiserror::Error;

use super::config::GenerationConfig;

/// Why a generation failed.
///
/// Callers are not expected to branch on this; every cause is reported to the
/// conversation the same way. It exists for logging and diagnostics.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailureCause {
    /// The request never produced an HTTP response (DNS, connect, TLS, ...).
    Transport,
    /// The backend answered with a non-success status.
    Http { status: u16 },
    /// The response body could not be decoded.
    Decode,
    /// The backend answered but produced no usable text (safety block, empty payload).
    EmptyResponse,
    /// Anything else, including a panicking backend.
    Internal,
}

/// The one failure kind a [`GenerationService`] reports.
///
/// Displays as its message and nothing else, so the text can be shown to the
/// user as-is.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{message}")]
pub struct GenerationError {
    message: String,
    cause: FailureCause,
}

impl GenerationError {
    pub fn new(cause: FailureCause, message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            cause,
        }
    }

    pub fn transport(message: impl Into<String>) -> Self {
        Self::new(FailureCause::Transport, message)
    }

    pub fn http(status: u16, message: impl Into<String>) -> Self {
        Self::new(FailureCause::Http { status }, message)
    }

    pub fn decode(message: impl Into<String>) -> Self {
        Self::new(FailureCause::Decode, message)
    }

    pub fn empty_response(message: impl Into<String>) -> Self {
        Self::new(FailureCause::EmptyResponse, message)
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(FailureCause::Internal, message)
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn cause(&self) -> &FailureCause {
        &self.cause
    }
}

pub type GenerationResult<T> = std::result::Result<T, GenerationError>;

/// Generates text for a prompt under a given configuration.
///
/// Implementations perform at most one outbound request per call, with no
/// retry, caching or rate limiting, and must hold no per-request state between
/// calls so a single instance can be shared across submissions.
#[async_trait]
pub trait GenerationService: Send + Sync {
    /// Short identifier used in logs (e.g. `"mock"`, `"gemini"`).
    fn name(&self) -> &str;

    /// Sends `prompt` to the backend and returns the generated text.
    ///
    /// `config` is forwarded verbatim; no range checks are applied.
    async fn generate(&self, prompt: &str, config: &GenerationConfig)
    -> GenerationResult<String>;
}
