//! Logging utilities with request-scoped context.
//!
//! This module provides context-aware logging: each inbound request gets a
//! unique ID held in task-local storage, so log lines emitted anywhere in the
//! request pipeline can be correlated without threading the ID through every
//! function call.

use axum::{
    extract::Request,
    http::HeaderValue,
    middleware::Next,
    response::Response,
};

tokio::task_local! {
    /// Task-local storage for the current request ID.
    ///
    /// This allows logs related to a single request to share a unique ID
    /// without passing it through every function call.
    pub static REQUEST_ID: String;
}

/// Get the current request ID from context, if set.
///
/// Returns an empty string if no request ID is set.
pub fn get_request_id() -> String {
    REQUEST_ID.try_with(|id| id.clone()).unwrap_or_default()
}

/// Generate a new unique request ID using UUID v4.
pub fn generate_request_id() -> String {
    uuid::Uuid::new_v4().to_string()
}

/// Middleware that assigns a request ID to each inbound request.
///
/// The ID is scoped to the request's task and echoed back to the caller in
/// the `x-request-id` response header.
pub async fn request_id_middleware(request: Request, next: Next) -> Response {
    let request_id = generate_request_id();

    REQUEST_ID
        .scope(request_id.clone(), async move {
            let mut response = next.run(request).await;
            if let Ok(value) = HeaderValue::from_str(&request_id) {
                response.headers_mut().insert("x-request-id", value);
            }
            response
        })
        .await
}
