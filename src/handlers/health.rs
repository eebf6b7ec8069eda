use std::time::Instant;

use serde_json::{Value, json};
use tokio_util::sync::CancellationToken;

use crate::constants::{ERROR_GEMINI_UNAVAILABLE, LOG_PREFIX_ERROR, LOG_PREFIX_SUCCESS};
use crate::error::RelayError;
use crate::handlers::RequestContext;
use crate::logging::{LogConfig, log_timed};

pub async fn handle_health_check(
    context: RequestContext<'_>,
    cancellation_token: CancellationToken,
) -> Result<Value, RelayError> {
    let start_time = Instant::now();
    if LogConfig::get().debug_enabled {
        log::debug!("health check request");
    }

    let selected_model = context.model_slot.current().await;

    match context.backend.list_models(cancellation_token).await {
        Ok(models) => {
            let generation_capable = models.iter().filter(|m| m.supports_generation()).count();
            log_timed(
                LOG_PREFIX_SUCCESS,
                &format!("health check - {} models", models.len()),
                start_time,
            );

            Ok(json!({
                "status": "healthy",
                "gemini_url": context.backend.endpoint(),
                "models_available": models.len(),
                "generation_models_available": generation_capable,
                "selected_model": selected_model,
                "response_time_ms": start_time.elapsed().as_millis(),
                "timestamp": chrono::Utc::now().to_rfc3339(),
                "relay_version": crate::VERSION
            }))
        }
        Err(e) if e.is_cancelled() => Err(e),
        Err(e) => {
            log_timed(
                LOG_PREFIX_ERROR,
                &format!("health check failed: {}", e.message),
                start_time,
            );
            Ok(json!({
                "status": "unreachable",
                "gemini_url": context.backend.endpoint(),
                "error_message": e.message,
                "error_details": ERROR_GEMINI_UNAVAILABLE,
                "selected_model": selected_model,
                "response_time_ms": start_time.elapsed().as_millis(),
                "timestamp": chrono::Utc::now().to_rfc3339(),
                "relay_version": crate::VERSION
            }))
        }
    }
}
