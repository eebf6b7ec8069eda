use std::time::Duration;

use serde_json::json;
use tokio_util::sync::CancellationToken;

use crate::config::ModelSelectionMode;
use crate::constants::{ERROR_EMPTY_MESSAGE, ERROR_MISSING_MESSAGE};
use crate::error::{RelayError, RelayErrorKind};
use crate::generation::{Candidate, Part, RawGenerationResponse};
use crate::handlers::{ChatRequest, RequestContext, run_chat};
use crate::model::{ModelSelector, ModelSlot};

use super::common::{MockBackend, default_models, generate_model};

fn startup_slot() -> ModelSlot {
    ModelSlot::new(
        ModelSelectionMode::Startup,
        None,
        ModelSelector::new(vec!["gemini-2.0-flash".to_string()], false),
        Duration::from_secs(3600),
    )
}

fn request(message: &str) -> ChatRequest {
    ChatRequest {
        message: message.to_string(),
    }
}

#[test]
fn chat_request_requires_message_field() {
    for body in [json!({}), json!({ "message": null }), json!({ "text": "hi" })] {
        let err = ChatRequest::from_body(&body).unwrap_err();
        assert_eq!(err.kind(), RelayErrorKind::BadRequest);
        assert_eq!(err.message, ERROR_MISSING_MESSAGE);
    }
}

#[test]
fn chat_request_rejects_blank_or_non_string_message() {
    for body in [
        json!({ "message": "" }),
        json!({ "message": "   " }),
        json!({ "message": 12 }),
        json!({ "message": ["hi"] }),
    ] {
        let err = ChatRequest::from_body(&body).unwrap_err();
        assert_eq!(err.status_code, 400);
        assert_eq!(err.message, ERROR_EMPTY_MESSAGE);
    }
}

#[test]
fn chat_request_keeps_message_untrimmed() {
    let parsed = ChatRequest::from_body(&json!({ "message": " hi " })).unwrap();
    assert_eq!(parsed, request(" hi "));
}

#[tokio::test]
async fn run_chat_sends_message_to_selected_model() {
    let backend = MockBackend::replying_text("hello");
    let slot = startup_slot();
    let context = RequestContext {
        backend: &backend,
        model_slot: &slot,
    };

    let reply = run_chat(context, &request("hi"), CancellationToken::new()).await;

    assert_eq!(reply.unwrap(), "hello");
    assert_eq!(
        backend.generations(),
        vec![("models/gemini-2.0-flash".to_string(), "hi".to_string())]
    );
}

#[tokio::test]
async fn run_chat_extracts_candidate_text() {
    let backend = MockBackend::new(
        default_models(),
        RawGenerationResponse::Candidates(vec![Candidate::with_parts(vec![
            Part::text("Hello"),
            Part::text(", world"),
        ])]),
    );
    let slot = startup_slot();
    let context = RequestContext {
        backend: &backend,
        model_slot: &slot,
    };

    let reply = run_chat(context, &request("hi"), CancellationToken::new()).await;
    assert_eq!(reply.unwrap(), "Hello, world");
}

#[tokio::test]
async fn run_chat_reports_generation_failure() {
    let backend = MockBackend::replying_text("unused");
    backend.fail_generation(RelayError::remote_unavailable(
        "Resource has been exhausted (e.g. check quota).",
        Some(429),
    ));
    let slot = startup_slot();
    let context = RequestContext {
        backend: &backend,
        model_slot: &slot,
    };

    let err = run_chat(context, &request("hi"), CancellationToken::new())
        .await
        .unwrap_err();

    assert_eq!(err.kind(), RelayErrorKind::RemoteUnavailable);
    assert_eq!(err.reply_status(), 500);
    // model stays selected for anything other than a 404
    assert_eq!(slot.current().await.as_deref(), Some("models/gemini-2.0-flash"));
}

#[tokio::test]
async fn run_chat_drops_model_that_disappeared() {
    let backend = MockBackend::replying_text("unused");
    backend.fail_generation(RelayError::remote_unavailable(
        "models/gemini-2.0-flash is not found for API version v1beta",
        Some(404),
    ));
    let slot = startup_slot();
    let context = RequestContext {
        backend: &backend,
        model_slot: &slot,
    };

    let err = run_chat(context, &request("hi"), CancellationToken::new())
        .await
        .unwrap_err();

    assert!(err.is_remote_model_missing());
    assert_eq!(slot.current().await, None);

    backend.set_models(vec![generate_model("models/gemini-2.0-flash-001")]);
    let _ = run_chat(context, &request("again"), CancellationToken::new()).await;
    assert_eq!(
        backend.generations().last().map(|(model, _)| model.clone()),
        Some("models/gemini-2.0-flash-001".to_string())
    );
}

#[tokio::test]
async fn run_chat_fails_when_no_model_qualifies() {
    let backend = MockBackend::new(Vec::new(), RawGenerationResponse::Unrecognized);
    let slot = startup_slot();
    let context = RequestContext {
        backend: &backend,
        model_slot: &slot,
    };

    let err = run_chat(context, &request("hi"), CancellationToken::new())
        .await
        .unwrap_err();

    assert_eq!(err.kind(), RelayErrorKind::NoSuitableModel);
    assert!(backend.generations().is_empty());
}
