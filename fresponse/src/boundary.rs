//! Message boundary detection strategies.
//!
//! A detector owns the in-progress message drafts and decides, for each
//! incoming update, which draft it folds into. Decisions only look at the
//! current state and the update at hand.
//!
//! ```rust
//! use fresponse::{BoundaryDetector, IdentifierKeyed, ResponseUpdate};
//!
//! let mut detector = IdentifierKeyed::default();
//! assert!(detector.target(&ResponseUpdate::new().with_message_id("a")).opened);
//! assert!(!detector.target(&ResponseUpdate::new()).opened);
//! assert!(detector.target(&ResponseUpdate::new().with_message_id("b")).opened);
//! assert_eq!(detector.message_count(), 2);
//! ```

use std::collections::BTreeMap;

use fcommon::{PropertyBag, RawPayload};

use crate::{Content, MergePolicy, Message, ResponseUpdate, Role};

/// A message under construction. Role stays unset until an update provides one.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MessageDraft {
    pub role: Option<Role>,
    pub author_name: Option<String>,
    pub contents: Vec<Content>,
    pub message_id: Option<String>,
    pub raw: Option<RawPayload>,
    pub properties: Option<PropertyBag>,
}

impl MessageDraft {
    pub fn finish(self) -> Message {
        Message {
            role: self.role.unwrap_or(Role::Assistant),
            author_name: self.author_name,
            contents: self.contents,
            message_id: self.message_id,
            raw: self.raw,
            properties: self.properties,
        }
    }
}

/// The draft selected for an update.
#[derive(Debug)]
pub struct Target<'a> {
    pub draft: &'a mut MessageDraft,
    /// `true` when this update opened a new message.
    pub opened: bool,
    /// Arrival position (identifier-keyed) or choice index (index-keyed).
    pub position: usize,
}

pub trait BoundaryDetector: Send {
    /// Stable strategy label used by hooks.
    fn strategy(&self) -> &'static str;

    fn target<'a>(&'a mut self, update: &ResponseUpdate) -> Target<'a>;

    fn message_count(&self) -> usize;

    /// Drafts in final message order.
    fn into_drafts(self) -> Vec<MessageDraft>
    where
        Self: Sized;

    fn merge_policy(&self) -> MergePolicy;

    /// Whether a lone resulting message hands its usage and properties to the response.
    fn promotes_singleton(&self) -> bool {
        false
    }
}

/// Opens a new message whenever a non-empty message id differs from the
/// id stamped on the most recent message.
#[derive(Debug, Default)]
pub struct IdentifierKeyed {
    drafts: Vec<MessageDraft>,
}

impl BoundaryDetector for IdentifierKeyed {
    fn strategy(&self) -> &'static str {
        "identifier"
    }

    fn target<'a>(&'a mut self, update: &ResponseUpdate) -> Target<'a> {
        let incoming = non_empty_id(update);
        let opened = match (self.drafts.last(), incoming) {
            (None, _) => true,
            (Some(current), Some(id)) => current
                .message_id
                .as_deref()
                .is_some_and(|stamped| stamped != id),
            (Some(_), None) => false,
        };

        if opened {
            self.drafts.push(MessageDraft::default());
        }

        let position = self.drafts.len() - 1;
        let draft = &mut self.drafts[position];

        // Stamp only after comparing, otherwise every update would match.
        if let Some(id) = incoming {
            draft.message_id = Some(id.to_string());
        }

        Target {
            draft,
            opened,
            position,
        }
    }

    fn message_count(&self) -> usize {
        self.drafts.len()
    }

    fn into_drafts(self) -> Vec<MessageDraft> {
        self.drafts
    }

    fn merge_policy(&self) -> MergePolicy {
        MergePolicy::identifier_keyed()
    }
}

/// One message per distinct choice index, ordered by index at the end.
#[derive(Debug, Default)]
pub struct IndexKeyed {
    choices: BTreeMap<usize, MessageDraft>,
}

impl BoundaryDetector for IndexKeyed {
    fn strategy(&self) -> &'static str {
        "index"
    }

    fn target<'a>(&'a mut self, update: &ResponseUpdate) -> Target<'a> {
        let position = update.choice_index;
        let opened = !self.choices.contains_key(&position);
        let draft = self.choices.entry(position).or_default();

        if let Some(id) = non_empty_id(update) {
            draft.message_id = Some(id.to_string());
        }

        Target {
            draft,
            opened,
            position,
        }
    }

    fn message_count(&self) -> usize {
        self.choices.len()
    }

    fn into_drafts(self) -> Vec<MessageDraft> {
        self.choices.into_values().collect()
    }

    fn merge_policy(&self) -> MergePolicy {
        MergePolicy::index_keyed()
    }

    fn promotes_singleton(&self) -> bool {
        true
    }
}

fn non_empty_id(update: &ResponseUpdate) -> Option<&str> {
    update
        .message_id
        .as_deref()
        .filter(|message_id| !message_id.is_empty())
}
