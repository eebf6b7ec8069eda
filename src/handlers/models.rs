use std::time::Instant;

use serde_json::{Value, json};
use tokio_util::sync::CancellationToken;

use crate::constants::LOG_PREFIX_SUCCESS;
use crate::error::RelayError;
use crate::handlers::RequestContext;
use crate::logging::{log_handler_io, log_timed};

/// Lists remote models and marks the one the selector would pick.
pub async fn handle_list_models(
    context: RequestContext<'_>,
    cancellation_token: CancellationToken,
) -> Result<Value, RelayError> {
    let start_time = Instant::now();
    let models = context.backend.list_models(cancellation_token).await?;

    let preferred = context.model_slot.selector().select(&models).ok();
    let held = context.model_slot.current().await;

    let entries: Vec<Value> = models
        .iter()
        .map(|m| m.to_json(preferred.as_ref().is_some_and(|p| p.name == m.name)))
        .collect();

    let response = json!({
        "models": entries,
        "preferences": context.model_slot.selector().preferences(),
        "selected_model": held.or(preferred.map(|p| p.name)),
    });

    log_handler_io("models", None, Some(&response));
    log_timed(
        LOG_PREFIX_SUCCESS,
        &format!("listed {} models", models.len()),
        start_time,
    );
    Ok(response)
}

/// Drops the held model and selects again.
pub async fn handle_refresh_model(
    context: RequestContext<'_>,
    cancellation_token: CancellationToken,
) -> Result<Value, RelayError> {
    let start_time = Instant::now();
    let model = context
        .model_slot
        .refresh(context.backend, cancellation_token)
        .await?;

    log_timed(
        LOG_PREFIX_SUCCESS,
        &format!("model refreshed: {}", model),
        start_time,
    );
    Ok(json!({ "model": model }))
}
