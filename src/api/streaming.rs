//! Streaming relay of upstream responses.
//!
//! The upstream body is forwarded to the caller as a lazy byte stream:
//! chunks are written as they arrive and the full body is never held in
//! memory. Dropping the caller-facing stream (client disconnect) drops the
//! upstream response with it, closing that connection instead of draining it.

use crate::core::logging::get_request_id;
use crate::core::{AppError, Result};
use axum::body::Body;
use axum::http::{
    header::CONTENT_TYPE, HeaderMap, HeaderName, HeaderValue, StatusCode,
};
use axum::response::Response;
use bytes::Bytes;
use futures::TryStreamExt;

/// Upstream response headers never relayed to the caller.
///
/// These describe the upstream connection's framing (encoding, length,
/// keep-alive); our own transport re-frames the response, so relaying them
/// verbatim would conflict with the outgoing hop.
pub const EXCLUDED_RESPONSE_HEADERS: &[&str] = &[
    "content-encoding",
    "transfer-encoding",
    "content-length",
    "connection",
    "keep-alive",
    "proxy-authenticate",
    "proxy-authorization",
    "te",
    "trailers",
    "upgrade",
];

/// Maximum number of upstream error-body bytes included in the server log.
const ERROR_BODY_LOG_LIMIT: usize = 2000;

/// Relay an upstream response to the caller.
///
/// Status and headers are passed through verbatim, minus
/// [`EXCLUDED_RESPONSE_HEADERS`]. Success bodies stream chunk by chunk;
/// error bodies (status >= 400) are buffered once so the status and a
/// truncated body can be logged for diagnosis, then relayed unchanged.
pub async fn build_streaming_response(response: reqwest::Response) -> Result<Response> {
    let status = StatusCode::from_u16(response.status().as_u16())
        .map_err(|_| AppError::Internal("Invalid upstream status code".into()))?;
    let headers = relay_response_headers(response.headers());

    let body = if status.is_client_error() || status.is_server_error() {
        let bytes = match response.bytes().await {
            Ok(bytes) => bytes,
            Err(e) => {
                tracing::warn!(
                    request_id = %get_request_id(),
                    error = %e,
                    "Failed to read upstream error body"
                );
                Bytes::new()
            }
        };
        log_upstream_error(status, &bytes);
        Body::from(bytes)
    } else {
        // Mid-stream upstream failures terminate the relay early; the caller
        // sees a truncated body, and the log records why.
        let request_id = get_request_id();
        let stream = response.bytes_stream().inspect_err(move |e| {
            tracing::warn!(
                request_id = %request_id,
                error = %e,
                "Upstream stream ended with error"
            );
        });
        Body::from_stream(stream)
    };

    let mut relayed = Response::new(body);
    *relayed.status_mut() = status;
    *relayed.headers_mut() = headers;
    Ok(relayed)
}

/// Copy upstream response headers, dropping the exclusion set.
///
/// `Content-Type` is relayed verbatim and defaulted to `application/json`
/// when the upstream omitted it.
pub fn relay_response_headers(upstream: &reqwest::header::HeaderMap) -> HeaderMap {
    let mut relayed = HeaderMap::new();

    for (name, value) in upstream.iter() {
        let name_str = name.as_str();
        if EXCLUDED_RESPONSE_HEADERS.contains(&name_str) {
            continue;
        }
        if let (Ok(name), Ok(value)) = (
            HeaderName::from_bytes(name_str.as_bytes()),
            HeaderValue::from_bytes(value.as_bytes()),
        ) {
            relayed.append(name, value);
        }
    }

    if !relayed.contains_key(CONTENT_TYPE) {
        relayed.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
    }

    relayed
}

fn log_upstream_error(status: StatusCode, body: &Bytes) {
    let cut = body.len().min(ERROR_BODY_LOG_LIMIT);
    tracing::error!(
        request_id = %get_request_id(),
        status = %status.as_u16(),
        body = %String::from_utf8_lossy(&body[..cut]),
        "Upstream returned error status"
    );
}
