use std::convert::Infallible;

use warp::Rejection;
use warp::http::StatusCode;

use crate::error::RelayError;
use crate::http::error_reply;

/// Every failure leaves the relay as `{"response": "Error: <detail>"}`.
pub async fn handle_rejection(rejection: Rejection) -> Result<warp::reply::Response, Infallible> {
    let (status, message) = if let Some(relay_err) = rejection.find::<RelayError>() {
        log::debug!("rejecting request: {:?}", relay_err.kind());
        (
            StatusCode::from_u16(relay_err.reply_status())
                .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR),
            relay_err.message.clone(),
        )
    } else if rejection.is_not_found() {
        (StatusCode::NOT_FOUND, "endpoint not found".to_string())
    } else if rejection.find::<warp::reject::MethodNotAllowed>().is_some() {
        (
            StatusCode::METHOD_NOT_ALLOWED,
            "method not allowed".to_string(),
        )
    } else if rejection.find::<warp::reject::PayloadTooLarge>().is_some() {
        (
            StatusCode::PAYLOAD_TOO_LARGE,
            "request body too large".to_string(),
        )
    } else if rejection.find::<warp::reject::InvalidHeader>().is_some() {
        (StatusCode::BAD_REQUEST, "invalid header".to_string())
    } else {
        log::error!("unhandled rejection: {:?}", rejection);
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            "internal server error".to_string(),
        )
    };

    Ok(error_reply(&message, status))
}
