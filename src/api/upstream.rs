//! Outbound request construction.
//!
//! Builds the header set and URL for the upstream hop. The inbound header
//! collection is copied through mostly unchanged; only the credential is
//! rewritten and the handful of headers that belong to the inbound transport
//! leg are dropped.

use crate::core::{AppError, Result};
use axum::http::HeaderMap as InboundHeaderMap;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, AUTHORIZATION};

/// Inbound request headers never copied to the outbound request.
///
/// - `host` is set by the client for our listener; reqwest derives the
///   correct one from the upstream URL
/// - `accept-encoding` is dropped so the upstream never compresses the
///   response, keeping the relayed bytes transparent
/// - `authorization` is replaced with the upstream credential
/// - `content-length` / `transfer-encoding` describe the inbound body
///   framing; the chat path rewrites the body, so the outbound transport
///   must frame it itself
const DROPPED_REQUEST_HEADERS: &[&str] = &[
    "host",
    "accept-encoding",
    "authorization",
    "content-length",
    "transfer-encoding",
];

/// Build the outbound header collection from the inbound one.
///
/// All inbound headers pass through (duplicates preserved) except
/// [`DROPPED_REQUEST_HEADERS`], and `Authorization` is set to the configured
/// upstream credential regardless of what the caller sent.
pub fn inject_auth_header(inbound: &InboundHeaderMap, api_key: &str) -> Result<HeaderMap> {
    let mut outbound = HeaderMap::new();

    for (name, value) in inbound.iter() {
        let name_str = name.as_str();
        if DROPPED_REQUEST_HEADERS.contains(&name_str) {
            continue;
        }
        // Header names/values cross http crate versions here, so rebuild
        // them from raw bytes. Values that fail validation cannot occur on
        // a parsed inbound request.
        if let (Ok(name), Ok(value)) = (
            HeaderName::from_bytes(name_str.as_bytes()),
            HeaderValue::from_bytes(value.as_bytes()),
        ) {
            outbound.append(name, value);
        }
    }

    let mut bearer = HeaderValue::from_str(&format!("Bearer {}", api_key))
        .map_err(|_| AppError::Internal("Upstream API key is not a valid header value".into()))?;
    bearer.set_sensitive(true);
    outbound.insert(AUTHORIZATION, bearer);

    Ok(outbound)
}

/// Build the outbound URL for a relayed request.
///
/// `api_base` carries no trailing slash (enforced at config load) and `path`
/// is the inbound request path, always slash-prefixed.
pub fn build_upstream_url(api_base: &str, path: &str, query: Option<&str>) -> String {
    match query {
        Some(query) if !query.is_empty() => format!("{}{}?{}", api_base, path, query),
        _ => format!("{}{}", api_base, path),
    }
}
