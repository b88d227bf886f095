//! Small convenience constructors for common types.

use std::sync::Arc;

use crate::{
    ConversationRecorder, InMemoryConversationStore, Message, ResponseUpdate, Role, UsageDetails,
};

pub fn system_message(content: impl Into<String>) -> Message {
    Message::new(Role::System, content)
}

pub fn user_message(content: impl Into<String>) -> Message {
    Message::new(Role::User, content)
}

pub fn assistant_message(content: impl Into<String>) -> Message {
    Message::new(Role::Assistant, content)
}

pub fn tool_message(content: impl Into<String>) -> Message {
    Message::new(Role::Tool, content)
}

/// Text update keyed by message id.
pub fn text_update(message_id: impl Into<String>, text: impl Into<String>) -> ResponseUpdate {
    ResponseUpdate::from_text(text).with_message_id(message_id)
}

/// Text update keyed by choice index.
pub fn choice_update(choice_index: usize, text: impl Into<String>) -> ResponseUpdate {
    ResponseUpdate::from_text(text).with_choice_index(choice_index)
}

pub fn usage_update(input_tokens: u64, output_tokens: u64) -> ResponseUpdate {
    ResponseUpdate::from_usage(
        UsageDetails::new()
            .with_input_tokens(input_tokens)
            .with_output_tokens(output_tokens)
            .with_total_tokens(input_tokens.saturating_add(output_tokens)),
    )
}

/// Known role names map to their variant; anything else is kept verbatim.
pub fn parse_role(value: &str) -> Role {
    Role::from(value)
}

/// Recorder over a fresh in-memory store, returned alongside the store.
pub fn in_memory_recorder() -> (Arc<InMemoryConversationStore>, ConversationRecorder) {
    let store = Arc::new(InMemoryConversationStore::new());
    let recorder = ConversationRecorder::new(store.clone());
    (store, recorder)
}
