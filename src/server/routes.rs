use std::convert::Infallible;
use std::sync::Arc;

use bytes::Bytes;
use serde_json::Value;
use tokio_util::sync::CancellationToken;
use warp::Filter;

use crate::constants::MAX_JSON_BODY_SIZE_BYTES;
use crate::error::RelayError;
use crate::handlers::{self, RequestContext};
use crate::http::json_response;
use crate::server::{RelayServer, handle_rejection};

pub fn create_routes(
    server: Arc<RelayServer>,
) -> impl Filter<Extract = (impl warp::Reply,), Error = warp::Rejection> + Clone {
    let with_server_state = warp::any().map(move || server.clone());

    let index_route = warp::path::end()
        .and(warp::get())
        .map(handlers::handle_index);

    let chat_route = warp::path!("chat")
        .and(warp::post())
        .and(tolerant_json_body())
        .and(with_server_state.clone())
        .and_then(|body: Value, s: Arc<RelayServer>| async move {
            let token = CancellationToken::new();
            handlers::handle_chat(create_context(&s), body, token)
                .await
                .map_err(warp::reject::custom)
        });

    let health_route = warp::path!("health")
        .and(warp::get())
        .and(with_server_state.clone())
        .and_then(|s: Arc<RelayServer>| async move {
            let token = CancellationToken::new();
            handlers::handle_health_check(create_context(&s), token)
                .await
                .map(|value| json_response(&value))
                .map_err(warp::reject::custom)
        });

    let models_route = warp::path!("api" / "models")
        .and(warp::get())
        .and(with_server_state.clone())
        .and_then(|s: Arc<RelayServer>| async move {
            let token = CancellationToken::new();
            handlers::handle_list_models(create_context(&s), token)
                .await
                .map(|value| json_response(&value))
                .map_err(warp::reject::custom)
        });

    let refresh_route = warp::path!("api" / "models" / "refresh")
        .and(warp::post())
        .and(with_server_state.clone())
        .and_then(|s: Arc<RelayServer>| async move {
            let token = CancellationToken::new();
            handlers::handle_refresh_model(create_context(&s), token)
                .await
                .map(|value| json_response(&value))
                .map_err(warp::reject::custom)
        });

    index_route
        .or(chat_route)
        .or(health_route)
        .or(models_route)
        .or(refresh_route)
}

/// Routes with rejection recovery, as served.
pub fn create_app(
    server: Arc<RelayServer>,
) -> impl Filter<Extract = (impl warp::Reply,), Error = Infallible> + Clone {
    create_routes(server).recover(handle_rejection)
}

fn create_context(s: &Arc<RelayServer>) -> RequestContext<'_> {
    RequestContext {
        backend: s.backend.as_ref(),
        model_slot: &s.model_slot,
    }
}

fn tolerant_json_body() -> impl Filter<Extract = (Value,), Error = warp::Rejection> + Clone {
    warp::body::content_length_limit(MAX_JSON_BODY_SIZE_BYTES)
        .and(warp::body::bytes())
        .and_then(|body: Bytes| async move {
            if body.is_empty() {
                return Err(warp::reject::custom(RelayError::bad_request(
                    "Missing JSON body",
                )));
            }
            serde_json::from_slice::<Value>(&body).map_err(|err| {
                warp::reject::custom(RelayError::bad_request(&format!(
                    "Invalid JSON payload: {}",
                    err
                )))
            })
        })
}
