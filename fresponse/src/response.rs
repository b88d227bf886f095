//! Finished responses: ordered messages plus shared response metadata.
//!
//! ```rust
//! use fresponse::{Message, Response, ResponseErrorKind, Role};
//!
//! let response = Response::from_message(Message::new(Role::Assistant, "done"))
//!     .with_model_id("gpt-4o-mini");
//! assert_eq!(response.message().expect("one message").text(), "done");
//!
//! let empty = Response::new();
//! let err = empty.message().expect_err("no messages");
//! assert_eq!(err.kind, ResponseErrorKind::InvalidState);
//! ```

use std::time::SystemTime;

use fcommon::{PropertyBag, RawPayload};
use serde::{Deserialize, Serialize};

use crate::{FinishReason, Message, ResponseError, UsageDetails};

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Response {
    #[serde(default)]
    pub messages: Vec<Message>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub response_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub conversation_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model_id: Option<String>,
    #[serde(
        default,
        with = "crate::wire::epoch_millis",
        skip_serializing_if = "Option::is_none"
    )]
    pub created_at: Option<SystemTime>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub finish_reason: Option<FinishReason>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub usage: Option<UsageDetails>,
    #[serde(skip)]
    pub raw: Option<RawPayload>,
    #[serde(
        default,
        rename = "additionalProperties",
        skip_serializing_if = "Option::is_none"
    )]
    pub properties: Option<PropertyBag>,
}

impl Response {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_message(message: Message) -> Self {
        Self::from_messages(vec![message])
    }

    pub fn from_messages(messages: Vec<Message>) -> Self {
        Self {
            messages,
            ..Self::default()
        }
    }

    pub fn with_response_id(mut self, response_id: impl Into<String>) -> Self {
        self.response_id = Some(response_id.into());
        self
    }

    pub fn with_conversation_id(mut self, conversation_id: impl Into<String>) -> Self {
        self.conversation_id = Some(conversation_id.into());
        self
    }

    pub fn with_model_id(mut self, model_id: impl Into<String>) -> Self {
        self.model_id = Some(model_id.into());
        self
    }

    pub fn with_created_at(mut self, created_at: SystemTime) -> Self {
        self.created_at = Some(created_at);
        self
    }

    pub fn with_finish_reason(mut self, finish_reason: FinishReason) -> Self {
        self.finish_reason = Some(finish_reason);
        self
    }

    pub fn with_usage(mut self, usage: UsageDetails) -> Self {
        self.usage = Some(usage);
        self
    }

    pub fn with_properties(mut self, properties: PropertyBag) -> Self {
        self.properties = Some(properties);
        self
    }

    pub fn with_raw(mut self, raw: RawPayload) -> Self {
        self.raw = Some(raw);
        self
    }

    /// The first message, for the common single-message case.
    pub fn message(&self) -> Result<&Message, ResponseError> {
        self.messages
            .first()
            .ok_or_else(|| ResponseError::invalid_state("response contains no messages"))
    }

    pub fn into_message(self) -> Result<Message, ResponseError> {
        self.messages
            .into_iter()
            .next()
            .ok_or_else(|| ResponseError::invalid_state("response contains no messages"))
    }

    /// Concatenated text of every message, in order.
    pub fn text(&self) -> String {
        self.messages.iter().map(Message::text).collect()
    }
}
