//! Property-based tests for chat payload sanitization.
//!
//! These tests use proptest to verify the sanitizer's invariants over
//! arbitrary payload shapes: denylisted fields never survive, the message
//! sequence never ends on an assistant turn, prior messages are untouched,
//! and the whole transformation is idempotent.

use llm_relay_rust::api::{sanitize_chat_payload, UNSUPPORTED_CHAT_FIELDS};
use proptest::prelude::*;
use serde_json::{json, Map, Value};

/// Generate a message with one of the roles clients actually send
fn message_strategy() -> impl Strategy<Value = Value> {
    (
        prop_oneof![
            Just("system"),
            Just("user"),
            Just("assistant"),
            Just("tool"),
        ],
        "[a-zA-Z0-9 ]{0,32}",
    )
        .prop_map(|(role, content)| json!({"role": role, "content": content}))
}

fn messages_strategy() -> impl Strategy<Value = Vec<Value>> {
    prop::collection::vec(message_strategy(), 0..8)
}

/// Generate an arbitrary JSON scalar for denylisted field values
fn scalar_strategy() -> impl Strategy<Value = Value> {
    prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::from),
        any::<i64>().prop_map(Value::from),
        "[a-z]{0,12}".prop_map(Value::from),
    ]
}

/// Generate a complete chat payload: messages plus a random subset of
/// denylisted fields and a passthrough extra field
fn payload_strategy() -> impl Strategy<Value = Map<String, Value>> {
    (
        messages_strategy(),
        prop::collection::vec(
            (0..UNSUPPORTED_CHAT_FIELDS.len(), scalar_strategy()),
            0..5,
        ),
        prop::option::of("[a-z]{1,8}"),
    )
        .prop_map(|(messages, denied, extra)| {
            let mut payload = Map::new();
            payload.insert("model".to_string(), json!("mistral-large-latest"));
            payload.insert("messages".to_string(), Value::Array(messages));
            for (index, value) in denied {
                payload.insert(UNSUPPORTED_CHAT_FIELDS[index].to_string(), value);
            }
            if let Some(extra) = extra {
                payload.insert(format!("x_{}", extra), json!({"nested": true}));
            }
            payload
        })
}

fn messages_of(payload: &Map<String, Value>) -> Vec<Value> {
    payload["messages"].as_array().cloned().unwrap_or_default()
}

proptest! {
    /// Property: no denylisted field survives sanitization
    #[test]
    fn prop_denylisted_fields_removed(mut payload in payload_strategy()) {
        sanitize_chat_payload(&mut payload);
        for field in UNSUPPORTED_CHAT_FIELDS {
            prop_assert!(!payload.contains_key(*field));
        }
    }

    /// Property: the sanitized sequence never ends on an assistant turn
    #[test]
    fn prop_never_ends_on_assistant(mut payload in payload_strategy()) {
        sanitize_chat_payload(&mut payload);
        let messages = messages_of(&payload);
        if let Some(last) = messages.last() {
            prop_assert_ne!(last["role"].as_str(), Some("assistant"));
        }
    }

    /// Property: prior messages are unchanged and in order; exactly one
    /// continuation message is appended iff the input ended on assistant
    #[test]
    fn prop_prefix_preserved(mut payload in payload_strategy()) {
        let before = messages_of(&payload);
        let ended_on_assistant = before
            .last()
            .map(|m| m["role"] == "assistant")
            .unwrap_or(false);

        sanitize_chat_payload(&mut payload);
        let after = messages_of(&payload);

        prop_assert_eq!(&after[..before.len()], &before[..]);
        if ended_on_assistant {
            prop_assert_eq!(after.len(), before.len() + 1);
            prop_assert_eq!(
                after.last().unwrap(),
                &json!({"role": "user", "content": "Continue response"})
            );
        } else {
            prop_assert_eq!(after.len(), before.len());
        }
    }

    /// Property: sanitizing twice yields the same payload as sanitizing once
    #[test]
    fn prop_sanitize_idempotent(mut payload in payload_strategy()) {
        sanitize_chat_payload(&mut payload);
        let once = payload.clone();
        sanitize_chat_payload(&mut payload);
        prop_assert_eq!(payload, once);
    }

    /// Property: fields outside the denylist are never altered
    #[test]
    fn prop_other_fields_untouched(mut payload in payload_strategy()) {
        let before = payload.clone();
        sanitize_chat_payload(&mut payload);
        for (key, value) in before.iter() {
            if UNSUPPORTED_CHAT_FIELDS.contains(&key.as_str()) || key == "messages" {
                continue;
            }
            prop_assert_eq!(payload.get(key), Some(value));
        }
    }
}
