//! Generation backends for GemBridge.
//!
//! Two implementations of [`GenerationService`] live here: a deterministic
//! mock and the live Gemini REST client. [`create_generation_service`] is the
//! single place that decides which one a process uses.

pub mod gemini_api_service;
pub mod mock_generation_service;

pub use gemini_api_service::{DEFAULT_GEMINI_MODEL, GeminiApiService};
pub use mock_generation_service::{DEFAULT_MOCK_LATENCY, MockGenerationService};

use gembridge_core::config::SecretConfig;
use gembridge_core::error::{GemBridgeError, Result};
use gembridge_core::generation::GenerationService;
use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;

/// Which backend a process talks to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackendKind {
    Mock,
    Gemini,
}

impl BackendKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            BackendKind::Mock => "mock",
            BackendKind::Gemini => "gemini",
        }
    }
}

impl FromStr for BackendKind {
    type Err = GemBridgeError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "mock" => Ok(BackendKind::Mock),
            "gemini" => Ok(BackendKind::Gemini),
            other => Err(GemBridgeError::config(format!(
                "backend '{other}' is not supported (expected 'mock' or 'gemini')"
            ))),
        }
    }
}

/// Options that only some backends look at.
#[derive(Debug, Clone)]
pub struct BackendOptions {
    /// Simulated latency for the mock backend.
    pub mock_latency: Duration,
    /// Model override for the Gemini backend. Falls back to the secret file,
    /// then to [`DEFAULT_GEMINI_MODEL`].
    pub model: Option<String>,
}

impl Default for BackendOptions {
    fn default() -> Self {
        Self {
            mock_latency: DEFAULT_MOCK_LATENCY,
            model: None,
        }
    }
}

/// Builds the generation backend for `kind`.
///
/// # Errors
///
/// Returns a config error when the Gemini backend is requested without an API key.
pub fn create_generation_service(
    kind: BackendKind,
    secrets: &SecretConfig,
    options: &BackendOptions,
) -> Result<Arc<dyn GenerationService>> {
    match kind {
        BackendKind::Mock => {
            tracing::info!(
                latency_ms = options.mock_latency.as_millis() as u64,
                "using mock generation backend"
            );
            Ok(Arc::new(MockGenerationService::new(options.mock_latency)))
        }
        BackendKind::Gemini => {
            let api_key = secrets.gemini_api_key().ok_or_else(|| {
                GemBridgeError::config(
                    "Gemini API key not found (set GEMINI_API_KEY or add it to secret.json)",
                )
            })?;
            let model = options
                .model
                .as_deref()
                .or_else(|| secrets.gemini_model())
                .unwrap_or(DEFAULT_GEMINI_MODEL);

            tracing::info!(model = %model, "using Gemini generation backend");
            Ok(Arc::new(GeminiApiService::new(api_key).with_model(model)))
        }
    }
}
