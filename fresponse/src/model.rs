//! Roles, finish reasons, and finished messages.
//!
//! ```rust
//! use fresponse::{FinishReason, Message, Role};
//!
//! let message = Message::new(Role::Assistant, "Summary ready.").with_author_name("planner");
//! assert_eq!(message.text(), "Summary ready.");
//! assert_eq!(message.author_name.as_deref(), Some("planner"));
//!
//! assert_eq!(Role::from("assistant"), Role::Assistant);
//! assert_eq!(FinishReason::from("tool_calls"), FinishReason::ToolCalls);
//! assert_eq!(Role::from("critic").to_string(), "critic");
//! ```

use std::fmt::{Display, Formatter};

use fcommon::{PropertyBag, RawPayload};
use serde::{Deserialize, Serialize};

use crate::Content;
use crate::content::concat_text;

#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Role {
    System,
    User,
    #[default]
    Assistant,
    Tool,
    Other(String),
}

impl Role {
    pub fn as_str(&self) -> &str {
        match self {
            Self::System => "system",
            Self::User => "user",
            Self::Assistant => "assistant",
            Self::Tool => "tool",
            Self::Other(value) => value.as_str(),
        }
    }
}

impl Display for Role {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<&str> for Role {
    fn from(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "system" => Self::System,
            "user" => Self::User,
            "assistant" => Self::Assistant,
            "tool" => Self::Tool,
            _ => Self::Other(value.to_string()),
        }
    }
}

impl From<String> for Role {
    fn from(value: String) -> Self {
        Role::from(value.as_str())
    }
}

impl From<Role> for String {
    fn from(value: Role) -> Self {
        match value {
            Role::Other(value) => value,
            known => known.as_str().to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum FinishReason {
    Stop,
    Length,
    ToolCalls,
    ContentFilter,
    Cancelled,
    Other(String),
}

impl FinishReason {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Stop => "stop",
            Self::Length => "length",
            Self::ToolCalls => "tool_calls",
            Self::ContentFilter => "content_filter",
            Self::Cancelled => "cancelled",
            Self::Other(value) => value.as_str(),
        }
    }
}

impl Display for FinishReason {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<&str> for FinishReason {
    fn from(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "stop" => Self::Stop,
            "length" => Self::Length,
            "tool_calls" => Self::ToolCalls,
            "content_filter" => Self::ContentFilter,
            "cancelled" => Self::Cancelled,
            _ => Self::Other(value.to_string()),
        }
    }
}

impl From<String> for FinishReason {
    fn from(value: String) -> Self {
        FinishReason::from(value.as_str())
    }
}

impl From<FinishReason> for String {
    fn from(value: FinishReason) -> Self {
        match value {
            FinishReason::Other(value) => value,
            known => known.as_str().to_string(),
        }
    }
}

/// One logical turn, either reconstructed from updates or built directly.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    #[serde(default)]
    pub role: Role,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author_name: Option<String>,
    #[serde(default)]
    pub contents: Vec<Content>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message_id: Option<String>,
    #[serde(skip)]
    pub raw: Option<RawPayload>,
    #[serde(
        default,
        rename = "additionalProperties",
        skip_serializing_if = "Option::is_none"
    )]
    pub properties: Option<PropertyBag>,
}

impl Message {
    pub fn new(role: Role, text: impl Into<String>) -> Self {
        Self::with_contents(role, vec![Content::text(text)])
    }

    pub fn with_contents(role: Role, contents: Vec<Content>) -> Self {
        Self {
            role,
            contents,
            ..Self::default()
        }
    }

    pub fn with_author_name(mut self, author_name: impl Into<String>) -> Self {
        self.author_name = normalize_author_name(Some(author_name.into()));
        self
    }

    pub fn with_message_id(mut self, message_id: impl Into<String>) -> Self {
        self.message_id = Some(message_id.into());
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

    /// Concatenated text of every text item.
    pub fn text(&self) -> String {
        concat_text(&self.contents)
    }
}

/// Empty or whitespace-only author names are treated as absent.
pub fn normalize_author_name(author_name: Option<String>) -> Option<String> {
    author_name.filter(|name| !name.trim().is_empty())
}
