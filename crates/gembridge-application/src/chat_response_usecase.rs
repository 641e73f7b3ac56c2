//! Chat response use case.
//!
//! A thin relay between the orchestrator and whichever backend the
//! composition root selected. Multi-step prompting (intent extraction,
//! chained calls) would slot in here without touching the orchestrator.

use gembridge_core::generation::{GenerationConfig, GenerationResult, GenerationService};
use std::sync::Arc;
use std::time::Instant;

pub struct GetChatResponseUseCase {
    service: Arc<dyn GenerationService>,
}

impl GetChatResponseUseCase {
    pub fn new(service: Arc<dyn GenerationService>) -> Self {
        Self { service }
    }

    pub fn backend_name(&self) -> &str {
        self.service.name()
    }

    /// Generates a reply for `prompt` with `config`, exactly one backend call.
    pub async fn execute(
        &self,
        prompt: &str,
        config: &GenerationConfig,
    ) -> GenerationResult<String> {
        let started = Instant::now();
        let result = self.service.generate(prompt, config).await;
        let elapsed_ms = started.elapsed().as_millis() as u64;

        match &result {
            Ok(text) => tracing::info!(
                backend = self.service.name(),
                elapsed_ms,
                reply_chars = text.chars().count(),
                "generation succeeded"
            ),
            Err(err) => tracing::warn!(
                backend = self.service.name(),
                elapsed_ms,
                cause = ?err.cause(),
                error = %err,
                "generation failed"
            ),
        }

        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use gembridge_core::generation::GenerationError;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct CountingService {
        calls: AtomicUsize,
        fail: bool,
    }

    #[async_trait]
    impl GenerationService for CountingService {
        fn name(&self) -> &str {
            "counting"
        }

        async fn generate(
            &self,
            prompt: &str,
            config: &GenerationConfig,
        ) -> GenerationResult<String> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.fail {
                Err(GenerationError::transport("offline"))
            } else {
                Ok(format!("{prompt}@{}", config.top_k))
            }
        }
    }

    #[tokio::test]
    async fn test_execute_relays_prompt_and_config() {
        let service = Arc::new(CountingService {
            calls: AtomicUsize::new(0),
            fail: false,
        });
        let use_case = GetChatResponseUseCase::new(service.clone());

        let reply = use_case
            .execute("hi", &GenerationConfig::default().with_top_k(3))
            .await
            .unwrap();

        assert_eq!(reply, "hi@3");
        assert_eq!(service.calls.load(Ordering::SeqCst), 1);
        assert_eq!(use_case.backend_name(), "counting");
    }

    #[tokio::test]
    async fn test_execute_does_not_retry() {
        let service = Arc::new(CountingService {
            calls: AtomicUsize::new(0),
            fail: true,
        });
        let use_case = GetChatResponseUseCase::new(service.clone());

        let err = use_case
            .execute("hi", &GenerationConfig::default())
            .await
            .unwrap_err();

        assert_eq!(err.to_string(), "offline");
        assert_eq!(service.calls.load(Ordering::SeqCst), 1);
    }
}
