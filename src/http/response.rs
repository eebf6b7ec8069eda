use serde_json::{Value, json};
use warp::http::StatusCode;

use crate::constants::{
    CONTENT_TYPE_HTML, CONTENT_TYPE_JSON, HEADER_ACCESS_CONTROL_ALLOW_HEADERS,
    HEADER_ACCESS_CONTROL_ALLOW_METHODS, HEADER_ACCESS_CONTROL_ALLOW_ORIGIN, HEADER_CACHE_CONTROL,
    REPLY_ERROR_PREFIX,
};

pub fn json_response(value: &Value) -> warp::reply::Response {
    json_response_with_status(value, StatusCode::OK)
}

pub fn json_response_with_status(value: &Value, status: StatusCode) -> warp::reply::Response {
    let json_string = serde_json::to_string(value).unwrap_or_else(|_| "{}".to_string());
    build_response(status, CONTENT_TYPE_JSON, json_string)
}

pub fn html_response(html: &'static str) -> warp::reply::Response {
    build_response(StatusCode::OK, CONTENT_TYPE_HTML, html.to_string())
}

/// The single error shape sent to the browser: `{"response": "Error: <detail>"}`.
pub fn error_reply(detail: &str, status: StatusCode) -> warp::reply::Response {
    json_response_with_status(&error_body(detail), status)
}

fn error_body(detail: &str) -> Value {
    json!({ "response": format!("{}{}", REPLY_ERROR_PREFIX, detail) })
}

fn build_response(status: StatusCode, content_type: &str, body: String) -> warp::reply::Response {
    let content_length = body.len();

    warp::http::Response::builder()
        .status(status)
        .header("Content-Type", content_type)
        .header("Content-Length", content_length.to_string())
        .header("Cache-Control", HEADER_CACHE_CONTROL)
        .header(
            "Access-Control-Allow-Origin",
            HEADER_ACCESS_CONTROL_ALLOW_ORIGIN,
        )
        .header(
            "Access-Control-Allow-Methods",
            HEADER_ACCESS_CONTROL_ALLOW_METHODS,
        )
        .header(
            "Access-Control-Allow-Headers",
            HEADER_ACCESS_CONTROL_ALLOW_HEADERS,
        )
        .body(body.into())
        .unwrap_or_else(|_| {
            let mut fallback = warp::http::Response::new("Internal Server Error".into());
            *fallback.status_mut() = StatusCode::INTERNAL_SERVER_ERROR;
            fallback
        })
}
