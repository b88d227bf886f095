//! Per-field rules for folding scalar metadata.
//!
//! ```rust
//! use fresponse::{MergePolicy, MergeRule};
//!
//! let mut model = Some("m1".to_string());
//! MergeRule::LatestNonNull.apply(&mut model, Some("m2".to_string()));
//! assert_eq!(model.as_deref(), Some("m2"));
//!
//! let mut author = Some("A".to_string());
//! MergeRule::FirstNonNull.apply(&mut author, Some("B".to_string()));
//! assert_eq!(author.as_deref(), Some("A"));
//!
//! assert_eq!(MergePolicy::identifier_keyed().author_name, MergeRule::FirstNonNull);
//! assert_eq!(MergePolicy::index_keyed().author_name, MergeRule::LatestNonNull);
//! ```

use fcommon::{PropertyBag, merge_absent};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MergeRule {
    /// Keep the first value seen; later values are ignored.
    FirstNonNull,
    /// Every present value replaces the previous one.
    LatestNonNull,
}

impl MergeRule {
    /// Absent incoming values never clear the slot.
    pub fn apply<T>(self, slot: &mut Option<T>, incoming: Option<T>) {
        let Some(value) = incoming else {
            return;
        };

        match self {
            Self::FirstNonNull => {
                if slot.is_none() {
                    *slot = Some(value);
                }
            }
            Self::LatestNonNull => *slot = Some(value),
        }
    }
}

/// Where an update's property bag is merged.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PropertyTarget {
    Message,
    Response,
}

/// Rule table applied while folding each update.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MergePolicy {
    pub role: MergeRule,
    pub author_name: MergeRule,
    pub raw: MergeRule,
    pub response_id: MergeRule,
    pub conversation_id: MergeRule,
    pub created_at: MergeRule,
    pub finish_reason: MergeRule,
    pub model_id: MergeRule,
    pub properties: PropertyTarget,
}

impl MergePolicy {
    pub const fn identifier_keyed() -> Self {
        Self {
            role: MergeRule::FirstNonNull,
            author_name: MergeRule::FirstNonNull,
            raw: MergeRule::LatestNonNull,
            response_id: MergeRule::LatestNonNull,
            conversation_id: MergeRule::LatestNonNull,
            created_at: MergeRule::LatestNonNull,
            finish_reason: MergeRule::LatestNonNull,
            model_id: MergeRule::LatestNonNull,
            properties: PropertyTarget::Response,
        }
    }

    /// Choice-indexed streams repeat role and author per choice, so the latest wins.
    pub const fn index_keyed() -> Self {
        Self {
            role: MergeRule::LatestNonNull,
            author_name: MergeRule::LatestNonNull,
            properties: PropertyTarget::Message,
            ..Self::identifier_keyed()
        }
    }
}

impl Default for MergePolicy {
    fn default() -> Self {
        Self::identifier_keyed()
    }
}

/// Set-if-absent merge that moves `incoming` wholesale into an empty slot.
pub fn merge_properties(target: &mut Option<PropertyBag>, incoming: Option<PropertyBag>) {
    if target.is_none() {
        *target = incoming;
        return;
    }

    merge_absent(target, incoming.as_ref());
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn absent_incoming_values_never_clear_slots() {
        let mut slot = Some(1);
        MergeRule::LatestNonNull.apply(&mut slot, None);
        MergeRule::FirstNonNull.apply(&mut slot, None);
        assert_eq!(slot, Some(1));
    }

    #[test]
    fn first_non_null_fills_empty_slot_once() {
        let mut slot = None;
        MergeRule::FirstNonNull.apply(&mut slot, Some("first"));
        MergeRule::FirstNonNull.apply(&mut slot, Some("second"));
        assert_eq!(slot, Some("first"));
    }

    #[test]
    fn index_keyed_policy_only_differs_in_message_fields() {
        let identifier = MergePolicy::identifier_keyed();
        let index = MergePolicy::index_keyed();

        assert_eq!(index.role, MergeRule::LatestNonNull);
        assert_eq!(index.properties, PropertyTarget::Message);
        assert_eq!(identifier.properties, PropertyTarget::Response);
        assert_eq!(index.model_id, identifier.model_id);
        assert_eq!(index.finish_reason, identifier.finish_reason);
        assert_eq!(MergePolicy::default(), identifier);
    }

    #[test]
    fn merge_properties_moves_into_empty_slot_and_keeps_existing_keys() {
        let mut first = PropertyBag::new();
        first.insert("a".to_string(), 1.into());
        let mut target = None;
        merge_properties(&mut target, Some(first));

        let mut second = PropertyBag::new();
        second.insert("a".to_string(), 9.into());
        second.insert("b".to_string(), 2.into());
        merge_properties(&mut target, Some(second));

        let bag = target.expect("bag should exist");
        assert_eq!(bag["a"], 1);
        assert_eq!(bag["b"], 2);
    }
}
