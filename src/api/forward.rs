//! HTTP handlers for the relay.
//!
//! Two surfaces: the chat-completions endpoint, which rewrites the JSON body
//! before forwarding, and a catch-all that forwards any other path untouched.
//! Both share the header rewrite and the streaming response relay.

use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::State,
    http::{HeaderMap, Method, Uri},
    response::Response,
    routing::post,
    Router,
};
use serde_json::{Map, Value};
use tower_http::trace::TraceLayer;

use crate::api::sanitize::sanitize_chat_payload;
use crate::api::streaming::build_streaming_response;
use crate::api::upstream::{build_upstream_url, inject_auth_header};
use crate::core::logging::{get_request_id, request_id_middleware};
use crate::core::{AppConfig, AppError, Result};

/// Path handled by the sanitizing chat handler; everything else is relayed
/// verbatim by the catch-all.
pub const CHAT_COMPLETIONS_PATH: &str = "/v1/chat/completions";

/// Methods the catch-all forwards. Anything else gets 405.
pub const FORWARDED_METHODS: &[&str] = &["GET", "POST", "PUT", "DELETE", "PATCH", "OPTIONS"];

/// Shared application state.
///
/// Immutable for the life of the process; requests share the pooled HTTP
/// client but nothing mutable.
pub struct AppState {
    pub config: AppConfig,
    pub http_client: reqwest::Client,
}

impl AppState {
    pub fn new(config: AppConfig, http_client: reqwest::Client) -> Self {
        Self {
            config,
            http_client,
        }
    }
}

/// Build the relay router with all routes and middleware.
pub fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route(CHAT_COMPLETIONS_PATH, post(chat_completions))
        .fallback(catch_all)
        .layer(axum::middleware::from_fn(request_id_middleware))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// `POST /v1/chat/completions` — sanitize and forward a chat payload.
///
/// The body must be a JSON object; otherwise the request is rejected with
/// 400 before any upstream call. Upstream error statuses are relayed
/// unchanged (the relay logs them but does not intercept).
pub async fn chat_completions(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Response> {
    let mut payload: Map<String, Value> =
        serde_json::from_slice(&body).map_err(|_| AppError::InvalidPayload)?;

    sanitize_chat_payload(&mut payload);

    let outbound_headers = inject_auth_header(&headers, &state.config.upstream.api_key)?;
    let url = build_upstream_url(&state.config.upstream.api_base, CHAT_COMPLETIONS_PATH, None);

    tracing::debug!(
        request_id = %get_request_id(),
        "Forwarding chat completion request"
    );

    let response = state
        .http_client
        .post(&url)
        .headers(outbound_headers)
        .json(&payload)
        .send()
        .await?;

    build_streaming_response(response).await
}

/// Catch-all — transparent forward of any other path.
///
/// The raw body passes through with no inspection; only headers are
/// rewritten. The query string is forwarded for GET, where it carries the
/// request parameters; for other methods the body already does.
pub async fn catch_all(
    State(state): State<Arc<AppState>>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Response> {
    let outbound_method = forwardable_method(&method).ok_or(AppError::MethodNotAllowed)?;

    let query = if outbound_method == reqwest::Method::GET {
        uri.query()
    } else {
        None
    };
    let url = build_upstream_url(&state.config.upstream.api_base, uri.path(), query);
    let outbound_headers = inject_auth_header(&headers, &state.config.upstream.api_key)?;

    tracing::debug!(
        request_id = %get_request_id(),
        method = %method,
        path = %uri.path(),
        "Forwarding request"
    );

    let response = state
        .http_client
        .request(outbound_method, &url)
        .headers(outbound_headers)
        .body(body)
        .send()
        .await?;

    build_streaming_response(response).await
}

/// Map an inbound method onto the outbound client's method type, if the
/// relay forwards it.
fn forwardable_method(method: &Method) -> Option<reqwest::Method> {
    let name = method.as_str();
    if !FORWARDED_METHODS.contains(&name) {
        return None;
    }
    reqwest::Method::from_bytes(name.as_bytes()).ok()
}
