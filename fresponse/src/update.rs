//! Incremental update events emitted by streaming completions.
//!
//! ```rust
//! use fresponse::{ResponseUpdate, Role};
//!
//! let update = ResponseUpdate::from_text("Hi ")
//!     .with_role(Role::Assistant)
//!     .with_message_id("msg-1")
//!     .with_author_name("   ");
//!
//! assert_eq!(update.text(), "Hi ");
//! assert_eq!(update.author_name, None);
//! assert_eq!(update.choice_index, 0);
//! ```

use std::time::SystemTime;

use fcommon::{PropertyBag, RawPayload};
use serde::{Deserialize, Serialize};

use crate::content::concat_text;
use crate::model::normalize_author_name;
use crate::{Content, FinishReason, Role, UsageDetails};

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResponseUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<Role>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author_name: Option<String>,
    #[serde(default)]
    pub contents: Vec<Content>,
    #[serde(skip)]
    pub raw: Option<RawPayload>,
    #[serde(
        default,
        rename = "additionalProperties",
        skip_serializing_if = "Option::is_none"
    )]
    pub properties: Option<PropertyBag>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub response_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub conversation_id: Option<String>,
    #[serde(
        default,
        with = "crate::wire::epoch_millis",
        skip_serializing_if = "Option::is_none"
    )]
    pub created_at: Option<SystemTime>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub finish_reason: Option<FinishReason>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model_id: Option<String>,
    /// Zero-based choice position, consulted only by index-keyed aggregation.
    #[serde(default)]
    pub choice_index: usize,
}

impl ResponseUpdate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_text(text: impl Into<String>) -> Self {
        Self::new().with_content(Content::text(text))
    }

    pub fn from_usage(details: UsageDetails) -> Self {
        Self::new().with_content(Content::usage(details))
    }

    pub fn with_role(mut self, role: Role) -> Self {
        self.role = Some(role);
        self
    }

    pub fn with_author_name(mut self, author_name: impl Into<String>) -> Self {
        self.author_name = normalize_author_name(Some(author_name.into()));
        self
    }

    pub fn with_content(mut self, content: Content) -> Self {
        self.contents.push(content);
        self
    }

    pub fn with_contents(mut self, contents: Vec<Content>) -> Self {
        self.contents.extend(contents);
        self
    }

    pub fn with_raw(mut self, raw: RawPayload) -> Self {
        self.raw = Some(raw);
        self
    }

    pub fn with_properties(mut self, properties: PropertyBag) -> Self {
        self.properties = Some(properties);
        self
    }

    pub fn with_property(
        mut self,
        key: impl Into<String>,
        value: impl Into<serde_json::Value>,
    ) -> Self {
        self.properties
            .get_or_insert_with(PropertyBag::new)
            .insert(key.into(), value.into());
        self
    }

    pub fn with_response_id(mut self, response_id: impl Into<String>) -> Self {
        self.response_id = Some(response_id.into());
        self
    }

    pub fn with_message_id(mut self, message_id: impl Into<String>) -> Self {
        self.message_id = Some(message_id.into());
        self
    }

    pub fn with_conversation_id(mut self, conversation_id: impl Into<String>) -> Self {
        self.conversation_id = Some(conversation_id.into());
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

    pub fn with_model_id(mut self, model_id: impl Into<String>) -> Self {
        self.model_id = Some(model_id.into());
        self
    }

    pub fn with_choice_index(mut self, choice_index: usize) -> Self {
        self.choice_index = choice_index;
        self
    }

    /// Concatenated text of every text item in this update.
    pub fn text(&self) -> String {
        concat_text(&self.contents)
    }
}
