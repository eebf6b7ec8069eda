use std::time::Duration;

use tokio_util::sync::CancellationToken;

use crate::config::ModelSelectionMode;
use crate::error::{RelayError, RelayErrorKind};
use crate::generation::RawGenerationResponse;
use crate::model::{ModelSelector, ModelSlot};

use super::common::{MockBackend, generate_model};

fn slot(mode: ModelSelectionMode, static_model: Option<&str>) -> ModelSlot {
    ModelSlot::new(
        mode,
        static_model,
        ModelSelector::new(
            vec!["gemini-2.0-flash".to_string(), "gemini-1.5-pro".to_string()],
            false,
        ),
        Duration::from_secs(3600),
    )
}

#[tokio::test]
async fn startup_mode_selects_once_and_reuses_the_result() {
    let backend = MockBackend::replying_text("hi");
    let slot = slot(ModelSelectionMode::Startup, None);

    assert_eq!(slot.current().await, None);

    let first = slot.resolve(&backend, CancellationToken::new()).await.unwrap();
    let second = slot.resolve(&backend, CancellationToken::new()).await.unwrap();

    assert_eq!(first, "models/gemini-2.0-flash");
    assert_eq!(second, first);
    assert_eq!(backend.list_calls(), 1);
    assert_eq!(slot.current().await.as_deref(), Some("models/gemini-2.0-flash"));
}

#[tokio::test]
async fn invalidation_forces_a_new_selection() {
    let backend = MockBackend::replying_text("hi");
    let slot = slot(ModelSelectionMode::Startup, None);

    slot.resolve(&backend, CancellationToken::new()).await.unwrap();
    backend.set_models(vec![generate_model("models/gemini-1.5-pro")]);
    slot.invalidate().await;

    assert_eq!(slot.current().await, None);
    let reselected = slot.resolve(&backend, CancellationToken::new()).await.unwrap();
    assert_eq!(reselected, "models/gemini-1.5-pro");
    assert_eq!(backend.list_calls(), 2);
}

#[tokio::test]
async fn refresh_reselects_immediately() {
    let backend = MockBackend::replying_text("hi");
    let slot = slot(ModelSelectionMode::Startup, None);

    slot.resolve(&backend, CancellationToken::new()).await.unwrap();
    backend.set_models(vec![generate_model("models/gemini-1.5-pro-002")]);

    let refreshed = slot.refresh(&backend, CancellationToken::new()).await.unwrap();
    assert_eq!(refreshed, "models/gemini-1.5-pro-002");
}

#[tokio::test]
async fn failed_selection_is_not_cached() {
    let backend = MockBackend::replying_text("hi");
    backend.fail_listing(RelayError::remote_unavailable("API key not valid", Some(400)));
    let slot = slot(ModelSelectionMode::Startup, None);

    let err = slot
        .resolve(&backend, CancellationToken::new())
        .await
        .unwrap_err();
    assert_eq!(err.kind(), RelayErrorKind::RemoteUnavailable);
    assert_eq!(err.message, "API key not valid");

    backend.set_models(vec![generate_model("models/gemini-2.0-flash-001")]);
    let recovered = slot.resolve(&backend, CancellationToken::new()).await.unwrap();
    assert_eq!(recovered, "models/gemini-2.0-flash-001");
}

#[tokio::test]
async fn per_request_mode_lists_every_time() {
    let backend = MockBackend::replying_text("hi");
    let slot = slot(ModelSelectionMode::PerRequest, None);

    slot.resolve(&backend, CancellationToken::new()).await.unwrap();
    slot.resolve(&backend, CancellationToken::new()).await.unwrap();

    assert_eq!(backend.list_calls(), 2);
    assert_eq!(slot.current().await, None);
}

#[tokio::test]
async fn static_mode_never_lists() {
    let backend = MockBackend::new(Vec::new(), RawGenerationResponse::Unrecognized);
    let slot = slot(ModelSelectionMode::Static, Some("gemini-1.5-flash-8b"));

    let model = slot.resolve(&backend, CancellationToken::new()).await.unwrap();

    assert_eq!(model, "models/gemini-1.5-flash-8b");
    assert_eq!(backend.list_calls(), 0);
    assert_eq!(slot.current().await.as_deref(), Some("models/gemini-1.5-flash-8b"));
}

#[tokio::test]
async fn selection_failure_surfaces_no_suitable_model() {
    let backend = MockBackend::new(Vec::new(), RawGenerationResponse::Unrecognized);
    let slot = slot(ModelSelectionMode::Startup, None);

    let err = slot
        .resolve(&backend, CancellationToken::new())
        .await
        .unwrap_err();
    assert_eq!(err.kind(), RelayErrorKind::NoSuitableModel);
}
