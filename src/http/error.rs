use crate::constants::{ERROR_GEMINI_UNAVAILABLE, ERROR_TIMEOUT};
use crate::error::RelayError;

pub fn map_reqwest_error(err: reqwest::Error) -> RelayError {
    if err.is_connect() {
        log::error!("HTTP connect failed: {}", ERROR_GEMINI_UNAVAILABLE);
        RelayError::remote_unavailable(ERROR_GEMINI_UNAVAILABLE, None)
    } else if err.is_timeout() {
        RelayError::remote_unavailable(ERROR_TIMEOUT, None)
    } else {
        // reqwest includes the full URL (and therefore the key) in its message
        let err = err.without_url();
        log::error!("HTTP request failed: {}", err);
        RelayError::remote_unavailable(&format!("Gemini API request failed: {}", err), None)
    }
}
