use std::time::Instant;

use serde_json::{Value, json};
use tokio_util::sync::CancellationToken;

use crate::constants::{
    ERROR_EMPTY_MESSAGE, ERROR_MISSING_MESSAGE, LOG_PREFIX_ERROR, LOG_PREFIX_SUCCESS,
};
use crate::error::RelayError;
use crate::generation::extract_text;
use crate::handlers::RequestContext;
use crate::http::json_response;
use crate::logging::{log_handler_io, log_request, log_timed};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatRequest {
    pub message: String,
}

/// Plain-text reply, or the failure with its detail.
pub type ChatReply = Result<String, RelayError>;

impl ChatRequest {
    pub fn from_body(body: &Value) -> Result<Self, RelayError> {
        let message = match body.get("message") {
            None | Some(Value::Null) => return Err(RelayError::bad_request(ERROR_MISSING_MESSAGE)),
            Some(Value::String(message)) => message,
            Some(_) => return Err(RelayError::bad_request(ERROR_EMPTY_MESSAGE)),
        };

        if message.trim().is_empty() {
            return Err(RelayError::bad_request(ERROR_EMPTY_MESSAGE));
        }

        Ok(Self {
            message: message.clone(),
        })
    }
}

/// Resolves the model, runs one generation and flattens the reply.
///
/// A remote 404 means the held model disappeared, so the model slot is
/// invalidated and the next request selects again.
pub async fn run_chat(
    context: RequestContext<'_>,
    request: &ChatRequest,
    cancellation_token: CancellationToken,
) -> ChatReply {
    let model = context
        .model_slot
        .resolve(context.backend, cancellation_token.clone())
        .await?;

    match context
        .backend
        .generate(&model, &request.message, cancellation_token)
        .await
    {
        Ok(raw) => Ok(extract_text(&raw)),
        Err(e) => {
            if e.is_remote_model_missing() {
                log::warn!("model '{}' no longer available", model);
                context.model_slot.invalidate().await;
            }
            Err(e)
        }
    }
}

pub async fn handle_chat(
    context: RequestContext<'_>,
    body: Value,
    cancellation_token: CancellationToken,
) -> Result<warp::reply::Response, RelayError> {
    let start_time = Instant::now();
    log_handler_io("chat", Some(&body), None);

    let request = ChatRequest::from_body(&body)?;
    log_request("POST", "/chat", Some(&request.message));

    match run_chat(context, &request, cancellation_token).await {
        Ok(text) => {
            let response = json!({ "response": text });
            log_handler_io("chat", None, Some(&response));
            log_timed(LOG_PREFIX_SUCCESS, "chat", start_time);
            Ok(json_response(&response))
        }
        Err(e) => {
            log_timed(
                LOG_PREFIX_ERROR,
                &format!("chat failed: {}", e.message),
                start_time,
            );
            Err(e)
        }
    }
}
