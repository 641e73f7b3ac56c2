use async_trait::async_trait;
use gembridge_application::{ConversationOrchestrator, GetChatResponseUseCase, SubmitOutcome};
use gembridge_core::chat::MessageOrigin;
use gembridge_core::generation::{
    GenerationConfig, GenerationError, GenerationResult, GenerationService,
};
use gembridge_interaction::{DEFAULT_MOCK_LATENCY, MockGenerationService};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Notify;

/// Holds every request until the test opens the gate, then returns `reply`.
struct GatedService {
    gate: Arc<Notify>,
    reply: GenerationResult<String>,
}

#[async_trait]
impl GenerationService for GatedService {
    fn name(&self) -> &str {
        "gated"
    }

    async fn generate(&self, _prompt: &str, _config: &GenerationConfig) -> GenerationResult<String> {
        self.gate.notified().await;
        self.reply.clone()
    }
}

struct FailingService {
    message: &'static str,
}

#[async_trait]
impl GenerationService for FailingService {
    fn name(&self) -> &str {
        "failing"
    }

    async fn generate(&self, _prompt: &str, _config: &GenerationConfig) -> GenerationResult<String> {
        Err(GenerationError::transport(self.message))
    }
}

struct PanickingService;

#[async_trait]
impl GenerationService for PanickingService {
    fn name(&self) -> &str {
        "panicking"
    }

    async fn generate(&self, _prompt: &str, _config: &GenerationConfig) -> GenerationResult<String> {
        panic!("backend exploded");
    }
}

fn orchestrator_with(service: impl GenerationService + 'static) -> ConversationOrchestrator {
    let use_case = Arc::new(GetChatResponseUseCase::new(Arc::new(service)));
    ConversationOrchestrator::new(use_case)
}

fn gated(reply: GenerationResult<String>) -> (ConversationOrchestrator, Arc<Notify>) {
    let gate = Arc::new(Notify::new());
    let orchestrator = orchestrator_with(GatedService {
        gate: Arc::clone(&gate),
        reply,
    });
    (orchestrator, gate)
}

#[tokio::test]
async fn test_blank_text_leaves_state_unchanged() {
    let orchestrator = orchestrator_with(FailingService { message: "unused" });
    orchestrator.toggle_settings_panel();
    let before = orchestrator.snapshot();

    for blank in ["", " ", "\t", "\n  \r\n"] {
        let outcome = orchestrator.submit(blank, GenerationConfig::default());
        assert!(matches!(outcome, SubmitOutcome::IgnoredBlank));
    }

    assert_eq!(orchestrator.snapshot(), before);
}

#[tokio::test]
async fn test_blank_text_while_in_flight_changes_nothing() {
    let (orchestrator, gate) = gated(Ok("reply".to_string()));
    let handle = orchestrator
        .submit("Pending", GenerationConfig::default())
        .into_handle()
        .unwrap();
    let before = orchestrator.snapshot();
    assert!(before.is_loading());

    let outcome = orchestrator.submit("   ", GenerationConfig::default());

    assert!(matches!(outcome, SubmitOutcome::IgnoredBlank));
    assert_eq!(orchestrator.snapshot(), before);

    gate.notify_one();
    handle.reconciled().await;
    assert!(!orchestrator.snapshot().is_loading());
}

#[tokio::test]
async fn test_blank_text_after_failure_keeps_error() {
    let orchestrator = orchestrator_with(FailingService {
        message: "quota exceeded",
    });
    orchestrator
        .submit("X", GenerationConfig::default())
        .into_handle()
        .unwrap()
        .reconciled()
        .await;
    let before = orchestrator.snapshot();
    assert_eq!(before.error(), Some("quota exceeded"));

    let outcome = orchestrator.submit("\t\n", GenerationConfig::default());

    assert!(matches!(outcome, SubmitOutcome::IgnoredBlank));
    assert_eq!(orchestrator.snapshot(), before);
}

#[tokio::test]
async fn test_submit_publishes_user_message_before_dispatch_resolves() {
    let (orchestrator, gate) = gated(Ok("reply".to_string()));
    let mut observer = orchestrator.subscribe();

    let handle = orchestrator
        .submit("Hi there", GenerationConfig::default())
        .into_handle()
        .expect("non-blank text should dispatch");

    let state = observer.borrow_and_update().clone();
    assert_eq!(state.messages().len(), 1);
    assert_eq!(state.messages()[0].origin(), MessageOrigin::User);
    assert_eq!(state.messages()[0].content(), "Hi there");
    assert!(state.is_loading());
    assert!(state.error().is_none());
    assert!(!handle.is_finished());

    gate.notify_one();
    handle.reconciled().await;

    assert!(observer.has_changed().unwrap());
    let state = observer.borrow_and_update().clone();
    assert_eq!(state.messages().len(), 2);
    assert!(!state.is_loading());
}

#[tokio::test]
async fn test_success_appends_assistant_message() {
    let (orchestrator, gate) = gated(Ok("Generated reply".to_string()));

    let handle = orchestrator
        .submit("Question", GenerationConfig::default())
        .into_handle()
        .unwrap();
    gate.notify_one();
    handle.reconciled().await;

    let state = orchestrator.snapshot();
    assert_eq!(state.messages().len(), 2);
    assert_eq!(state.messages()[0].origin(), MessageOrigin::User);
    assert_eq!(state.messages()[1].origin(), MessageOrigin::Assistant);
    assert_eq!(state.messages()[1].content(), "Generated reply");
    assert!(!state.is_loading());
    assert!(state.error().is_none());
}

#[tokio::test]
async fn test_failure_sets_error_without_assistant_message() {
    let orchestrator = orchestrator_with(FailingService {
        message: "network unreachable",
    });

    orchestrator
        .submit("X", GenerationConfig::default())
        .into_handle()
        .unwrap()
        .reconciled()
        .await;

    let state = orchestrator.snapshot();
    assert_eq!(state.messages().len(), 1);
    assert_eq!(state.messages()[0].origin(), MessageOrigin::User);
    assert_eq!(state.messages()[0].content(), "X");
    assert_eq!(state.error(), Some("network unreachable"));
    assert!(!state.is_loading());
}

#[tokio::test]
async fn test_next_submission_clears_previous_error() {
    let orchestrator = orchestrator_with(FailingService { message: "quota exceeded" });

    orchestrator
        .submit("first", GenerationConfig::default())
        .into_handle()
        .unwrap()
        .reconciled()
        .await;
    assert_eq!(orchestrator.snapshot().error(), Some("quota exceeded"));

    let handle = orchestrator
        .submit("second", GenerationConfig::default())
        .into_handle()
        .unwrap();
    assert!(orchestrator.snapshot().error().is_none());

    handle.reconciled().await;
    assert_eq!(orchestrator.snapshot().error(), Some("quota exceeded"));
    assert_eq!(orchestrator.snapshot().messages().len(), 2);
}

#[tokio::test]
async fn test_toggle_settings_panel_is_an_involution() {
    let (orchestrator, gate) = gated(Ok("ok".to_string()));
    let handle = orchestrator
        .submit("pending", GenerationConfig::default())
        .into_handle()
        .unwrap();
    let before = orchestrator.snapshot();

    orchestrator.toggle_settings_panel();
    let toggled = orchestrator.snapshot();
    assert_eq!(toggled.is_settings_open(), !before.is_settings_open());
    assert_eq!(toggled.messages(), before.messages());
    assert_eq!(toggled.is_loading(), before.is_loading());
    assert_eq!(toggled.error(), before.error());

    orchestrator.toggle_settings_panel();
    assert_eq!(orchestrator.snapshot(), before);

    gate.notify_one();
    handle.reconciled().await;
}

#[tokio::test]
async fn test_submission_while_busy_is_rejected() {
    let (orchestrator, gate) = gated(Ok("first reply".to_string()));

    let handle = orchestrator
        .submit("first", GenerationConfig::default())
        .into_handle()
        .unwrap();
    let busy = orchestrator.snapshot();

    let second = orchestrator.submit("second", GenerationConfig::default());
    assert!(matches!(second, SubmitOutcome::RejectedBusy));
    assert_eq!(orchestrator.snapshot(), busy);

    gate.notify_one();
    handle.reconciled().await;

    let state = orchestrator.snapshot();
    let contents: Vec<&str> = state.messages().iter().map(|m| m.content()).collect();
    assert_eq!(contents, vec!["first", "first reply"]);
}

#[tokio::test]
async fn test_panicking_backend_is_reconciled_as_failure() {
    let orchestrator = orchestrator_with(PanickingService);

    orchestrator
        .submit("boom", GenerationConfig::default())
        .into_handle()
        .unwrap()
        .reconciled()
        .await;

    let state = orchestrator.snapshot();
    assert!(!state.is_loading());
    assert_eq!(state.messages().len(), 1);
    assert_eq!(
        state.error(),
        Some("Generation backend panicked: backend exploded")
    );
}

#[tokio::test(start_paused = true)]
async fn test_mock_backend_hello_scenario() {
    let orchestrator = orchestrator_with(MockGenerationService::default());
    let config = GenerationConfig::default();

    let handle = orchestrator
        .submit("Hello", config.clone())
        .into_handle()
        .unwrap();

    let state = orchestrator.snapshot();
    assert_eq!(state.messages().len(), 1);
    assert_eq!(state.messages()[0].content(), "Hello");
    assert!(state.messages()[0].is_from_user());
    assert!(state.is_loading());

    tokio::time::sleep(DEFAULT_MOCK_LATENCY - Duration::from_millis(1)).await;
    assert!(orchestrator.snapshot().is_loading(), "reply arrived before the simulated latency");

    handle.reconciled().await;

    let state = orchestrator.snapshot();
    assert_eq!(state.messages().len(), 2);
    let reply = &state.messages()[1];
    assert_eq!(reply.origin(), MessageOrigin::Assistant);
    assert_eq!(reply.content(), MockGenerationService::echo("Hello", &config));
    assert!(reply.content().contains("Hello"));
    assert!(reply.content().contains("Temperature: 0.7"));
    assert!(!state.is_loading());
    assert!(state.error().is_none());
}

#[tokio::test(start_paused = true)]
async fn test_sequential_submissions_keep_chronological_order() {
    let orchestrator = orchestrator_with(MockGenerationService::new(Duration::from_millis(200)));
    let config = GenerationConfig::default();

    for prompt in ["A", "B"] {
        orchestrator
            .submit(prompt, config.clone())
            .into_handle()
            .unwrap()
            .reconciled()
            .await;
    }

    let state = orchestrator.snapshot();
    let transcript: Vec<(MessageOrigin, String)> = state
        .messages()
        .iter()
        .map(|m| (m.origin(), m.content().to_string()))
        .collect();

    assert_eq!(
        transcript,
        vec![
            (MessageOrigin::User, "A".to_string()),
            (MessageOrigin::Assistant, MockGenerationService::echo("A", &config)),
            (MessageOrigin::User, "B".to_string()),
            (MessageOrigin::Assistant, MockGenerationService::echo("B", &config)),
        ]
    );
    assert!(
        state
            .messages()
            .windows(2)
            .all(|pair| pair[0].timestamp() <= pair[1].timestamp())
    );
}

#[tokio::test]
async fn test_dropped_handle_still_reconciles() {
    let (orchestrator, gate) = gated(Ok("late".to_string()));
    let mut observer = orchestrator.subscribe();
    observer.borrow_and_update();

    drop(orchestrator.submit("fire and forget", GenerationConfig::default()));
    gate.notify_one();

    observer
        .wait_for(|state| !state.is_loading())
        .await
        .expect("orchestrator still alive");
    assert_eq!(orchestrator.snapshot().messages()[1].content(), "late");
}
