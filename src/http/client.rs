use serde::Serialize;
use serde_json::Value;
use tokio_util::sync::CancellationToken;

use crate::check_cancelled;
use crate::constants::CONTENT_TYPE_JSON;
use crate::error::RelayError;
use crate::http::error::map_reqwest_error;
use crate::logging::redact_url;

pub struct CancellableRequest<'a> {
    client: &'a reqwest::Client,
    token: CancellationToken,
}

impl<'a> CancellableRequest<'a> {
    pub fn new(client: &'a reqwest::Client, token: CancellationToken) -> Self {
        Self { client, token }
    }

    pub async fn make_request<B: Serialize>(
        &self,
        method: reqwest::Method,
        url: &str,
        body: Option<B>,
    ) -> Result<reqwest::Response, RelayError> {
        check_cancelled!(self.token);

        log::debug!("{} {}", method, redact_url(url));

        let mut request_builder = self.client.request(method, url);

        if let Some(body_content) = body {
            request_builder = request_builder
                .header("Content-Type", CONTENT_TYPE_JSON)
                .json(&body_content);
        }

        tokio::select! {
            result = request_builder.send() => result.map_err(map_reqwest_error),
            _ = self.token.cancelled() => {
                Err(RelayError::request_cancelled())
            }
        }
    }
}

/// Reads a Gemini JSON reply. Non-2xx replies become `RemoteUnavailable`
/// carrying the message from Gemini's `{"error": {...}}` envelope.
pub async fn handle_json_response(
    response: reqwest::Response,
    cancellation_token: CancellationToken,
) -> Result<Value, RelayError> {
    check_cancelled!(cancellation_token);

    let status = response.status();
    let is_error = !status.is_success();

    tokio::select! {
        result = response.json::<Value>() => {
            match result {
                Ok(json_value) => {
                    if is_error {
                        let error_message = remote_error_message(&json_value)
                            .unwrap_or_else(|| format!("Gemini API error: {}", status));
                        Err(RelayError::remote_unavailable(&error_message, Some(status.as_u16())))
                    } else {
                        Ok(json_value)
                    }
                }
                Err(_) if is_error => Err(RelayError::remote_unavailable(
                    &format!("Gemini API error: {}", status),
                    Some(status.as_u16()),
                )),
                Err(e) => Err(RelayError::remote_unavailable(
                    &format!("invalid JSON from Gemini API: {}", e.without_url()),
                    None,
                )),
            }
        }
        _ = cancellation_token.cancelled() => {
            Err(RelayError::request_cancelled())
        }
    }
}

pub fn remote_error_message(body: &Value) -> Option<String> {
    match body.get("error") {
        Some(Value::Object(obj)) => obj
            .get("message")
            .and_then(|m| m.as_str())
            .map(|s| s.to_string()),
        Some(Value::String(message)) => Some(message.clone()),
        _ => None,
    }
}
