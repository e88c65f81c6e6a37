//! Chat-completions payload sanitization.
//!
//! Clients built against the broader OpenAI surface send fields the upstream
//! rejects as unrecognized, and sometimes end a conversation on an assistant
//! turn, which the upstream refuses outright. Both repairs are pure
//! transformations on the parsed JSON body, applied before forwarding.

use serde_json::{json, Map, Value};

/// Fields the upstream rejects as unrecognized (422). Removed from every
/// chat-completions payload before forwarding; anything not listed here
/// passes through untouched, including fields the upstream does not document.
pub const UNSUPPORTED_CHAT_FIELDS: &[&str] = &[
    "logit_bias",
    "user",
    "additionalProp1",
    "stream_options",
    "enable_thinking",
    "thinking",
    "reasoning",
    "prediction",
    "parallel_tool_calls",
];

/// Sanitize a chat-completions payload in place.
///
/// Drops every denylisted field (absence is not an error) and repairs the
/// message sequence so it does not end on an assistant turn. Idempotent.
pub fn sanitize_chat_payload(payload: &mut Map<String, Value>) {
    for field in UNSUPPORTED_CHAT_FIELDS {
        payload.remove(*field);
    }

    if let Some(Value::Array(messages)) = payload.get_mut("messages") {
        repair_trailing_assistant(messages);
    }
}

/// Append a synthetic user turn if the conversation ends on an assistant one.
///
/// The upstream requires that the last message not have role `assistant`;
/// some callers violate this when asking for a continuation. Prior messages
/// are left untouched and in order.
pub fn repair_trailing_assistant(messages: &mut Vec<Value>) {
    let ends_on_assistant = messages
        .last()
        .and_then(|message| message.get("role"))
        .and_then(|role| role.as_str())
        .map(|role| role == "assistant")
        .unwrap_or(false);

    if ends_on_assistant {
        messages.push(json!({"role": "user", "content": "Continue response"}));
    }
}
