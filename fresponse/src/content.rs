//! Content items carried by updates and messages.
//!
//! ```rust
//! use fresponse::{Content, ContentKind, UsageDetails};
//!
//! let text = Content::text("hello");
//! let usage = Content::usage(UsageDetails::new().with_output_tokens(3));
//! let other = Content::other("image", serde_json::json!({ "uri": "file://a.png" }));
//!
//! assert_eq!(text.as_text(), Some("hello"));
//! assert!(usage.is_usage());
//! assert!(matches!(other.kind, ContentKind::Other(_)));
//! ```

use fcommon::{PropertyBag, RawPayload};

use crate::UsageDetails;

#[derive(Debug, Clone, PartialEq)]
pub struct TextContent {
    pub text: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct UsageContent {
    pub details: UsageDetails,
}

/// Pass-through content the reconstruction engine does not interpret.
#[derive(Debug, Clone, PartialEq)]
pub struct OtherContent {
    pub content_type: String,
    pub data: serde_json::Value,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ContentKind {
    Text(TextContent),
    Usage(UsageContent),
    Other(OtherContent),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Content {
    pub kind: ContentKind,
    pub raw: Option<RawPayload>,
    pub properties: Option<PropertyBag>,
}

impl Content {
    pub fn new(kind: ContentKind) -> Self {
        Self {
            kind,
            raw: None,
            properties: None,
        }
    }

    pub fn text(text: impl Into<String>) -> Self {
        Self::new(ContentKind::Text(TextContent { text: text.into() }))
    }

    pub fn usage(details: UsageDetails) -> Self {
        Self::new(ContentKind::Usage(UsageContent { details }))
    }

    pub fn other(content_type: impl Into<String>, data: serde_json::Value) -> Self {
        Self::new(ContentKind::Other(OtherContent {
            content_type: content_type.into(),
            data,
        }))
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

    pub fn is_text(&self) -> bool {
        matches!(self.kind, ContentKind::Text(_))
    }

    pub fn is_usage(&self) -> bool {
        matches!(self.kind, ContentKind::Usage(_))
    }

    pub fn as_text(&self) -> Option<&str> {
        match &self.kind {
            ContentKind::Text(content) => Some(content.text.as_str()),
            _ => None,
        }
    }

    pub fn as_usage(&self) -> Option<&UsageDetails> {
        match &self.kind {
            ContentKind::Usage(content) => Some(&content.details),
            _ => None,
        }
    }

    /// Wire discriminator for this content item.
    pub fn discriminator(&self) -> &str {
        match &self.kind {
            ContentKind::Text(_) => "text",
            ContentKind::Usage(_) => "usage",
            ContentKind::Other(other) => other.content_type.as_str(),
        }
    }
}

impl From<&str> for Content {
    fn from(value: &str) -> Self {
        Content::text(value)
    }
}

impl From<String> for Content {
    fn from(value: String) -> Self {
        Content::text(value)
    }
}

impl From<UsageDetails> for Content {
    fn from(value: UsageDetails) -> Self {
        Content::usage(value)
    }
}

/// Concatenates the text of every text item, in order.
pub fn concat_text<'a>(contents: impl IntoIterator<Item = &'a Content>) -> String {
    contents
        .into_iter()
        .filter_map(Content::as_text)
        .collect::<String>()
}
