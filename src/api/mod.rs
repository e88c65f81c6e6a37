//! HTTP layer: handlers, payload sanitization, and the streaming relay.

pub mod forward;
pub mod sanitize;
pub mod streaming;
pub mod upstream;

pub use forward::{build_router, catch_all, chat_completions, AppState, FORWARDED_METHODS};
pub use sanitize::{repair_trailing_assistant, sanitize_chat_payload, UNSUPPORTED_CHAT_FIELDS};
pub use streaming::{build_streaming_response, EXCLUDED_RESPONSE_HEADERS};
pub use upstream::{build_upstream_url, inject_auth_header};
