//! MockGenerationService - deterministic stand-in for a live backend.
//!
//! Sleeps for a simulated network latency, then echoes the prompt and the
//! configuration it was given. Used to exercise the whole submit/dispatch/
//! reconcile pipeline without credentials or network access.

use async_trait::async_trait;
use gembridge_core::generation::{GenerationConfig, GenerationResult, GenerationService};
use std::time::Duration;

/// Latency applied when none is configured.
pub const DEFAULT_MOCK_LATENCY: Duration = Duration::from_millis(1500);

#[derive(Debug, Clone)]
pub struct MockGenerationService {
    latency: Duration,
}

impl Default for MockGenerationService {
    fn default() -> Self {
        Self::new(DEFAULT_MOCK_LATENCY)
    }
}

impl MockGenerationService {
    pub fn new(latency: Duration) -> Self {
        Self { latency }
    }

    pub fn latency(&self) -> Duration {
        self.latency
    }

    /// Builds the echo text returned for `prompt` under `config`.
    pub fn echo(prompt: &str, config: &GenerationConfig) -> String {
        format!(
            "This is a simulated (Mock) response from GemBridge.\n\n\
             Configuration used:\n\
             - Temperature: {}\n\
             - Top P: {}\n\
             - Top K: {}\n\
             - System Prompt: \"{}\"\n\n\
             I have successfully received your message: \"{}\"",
            config.temperature, config.top_p, config.top_k, config.system_prompt, prompt
        )
    }
}

#[async_trait]
impl GenerationService for MockGenerationService {
    fn name(&self) -> &str {
        "mock"
    }

    async fn generate(
        &self,
        prompt: &str,
        config: &GenerationConfig,
    ) -> GenerationResult<String> {
        tracing::debug!(latency_ms = self.latency.as_millis() as u64, "mock generation started");
        tokio::time::sleep(self.latency).await;
        Ok(Self::echo(prompt, config))
    }
}
