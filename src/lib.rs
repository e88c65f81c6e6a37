//! LLM Relay - A transparent streaming proxy for a single upstream LLM API
//!
//! This library forwards OpenAI-compatible HTTP traffic to one fixed upstream
//! provider:
//!
//! - **Credential Injection**: The upstream API key replaces any inbound
//!   `Authorization` header
//! - **Payload Sanitization**: Chat-completions bodies are stripped of fields
//!   the upstream rejects, and conversations are repaired so they never end
//!   on an assistant turn
//! - **Streaming Pass-Through**: Response bodies are relayed chunk by chunk
//!   without buffering, with hop-by-hop headers filtered
//!
//! # Architecture
//!
//! The codebase is organized into two layers:
//!
//! - [`core`]: Core functionality (config, errors, request-scoped logging)
//! - [`api`]: HTTP handlers, payload sanitization, and the streaming relay
//!
//! # Configuration
//!
//! The server requires the following environment variable:
//! - `UPSTREAM_API_KEY`: API key injected into every outbound request
//!
//! Optional environment variables:
//! - `UPSTREAM_API_BASE`: Upstream base URL (default: https://api.mistral.ai)
//! - `HOST`: Server bind address (default: 0.0.0.0)
//! - `PORT`: Server port (default: 6432)

pub mod api;
pub mod core;

// Re-export commonly used types for convenience
pub use crate::api::{build_router, AppState};
pub use crate::core::{AppConfig, AppError, Result, ServerConfig, UpstreamConfig};
