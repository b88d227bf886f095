//! Additive token and resource accounting.
//!
//! ```rust
//! use fresponse::UsageDetails;
//!
//! let mut total = UsageDetails::new().with_input_tokens(10);
//! total += &UsageDetails::new().with_input_tokens(5).with_output_tokens(2);
//!
//! assert_eq!(total.input_tokens, Some(15));
//! assert_eq!(total.output_tokens, Some(2));
//! assert_eq!(total.total_tokens, None);
//! ```

use std::collections::BTreeMap;
use std::ops::{Add, AddAssign};

use serde::{Deserialize, Serialize};

/// Token counters plus a bag of provider-specific counters.
///
/// Every counter is summed independently; `total_tokens` is never derived from
/// the other two.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UsageDetails {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub input_tokens: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output_tokens: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_tokens: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub additional_counts: Option<BTreeMap<String, i64>>,
}

impl UsageDetails {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_input_tokens(mut self, tokens: u64) -> Self {
        self.input_tokens = Some(tokens);
        self
    }

    pub fn with_output_tokens(mut self, tokens: u64) -> Self {
        self.output_tokens = Some(tokens);
        self
    }

    pub fn with_total_tokens(mut self, tokens: u64) -> Self {
        self.total_tokens = Some(tokens);
        self
    }

    pub fn with_additional_count(mut self, key: impl Into<String>, count: i64) -> Self {
        self.additional_counts
            .get_or_insert_with(BTreeMap::new)
            .insert(key.into(), count);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.input_tokens.is_none()
            && self.output_tokens.is_none()
            && self.total_tokens.is_none()
            && self
                .additional_counts
                .as_ref()
                .is_none_or(BTreeMap::is_empty)
    }

    /// Adds every counter present in `other` into `self`.
    pub fn accumulate(&mut self, other: &UsageDetails) {
        self.input_tokens = add_counts(self.input_tokens, other.input_tokens);
        self.output_tokens = add_counts(self.output_tokens, other.output_tokens);
        self.total_tokens = add_counts(self.total_tokens, other.total_tokens);

        if let Some(incoming) = &other.additional_counts {
            let counts = self.additional_counts.get_or_insert_with(BTreeMap::new);
            for (key, value) in incoming {
                let slot = counts.entry(key.clone()).or_insert(0);
                *slot = slot.saturating_add(*value);
            }
        }
    }
}

fn add_counts(current: Option<u64>, incoming: Option<u64>) -> Option<u64> {
    match (current, incoming) {
        (None, None) => None,
        (current, incoming) => Some(current.unwrap_or(0).saturating_add(incoming.unwrap_or(0))),
    }
}

impl AddAssign<&UsageDetails> for UsageDetails {
    fn add_assign(&mut self, rhs: &UsageDetails) {
        self.accumulate(rhs);
    }
}

impl Add for UsageDetails {
    type Output = UsageDetails;

    fn add(mut self, rhs: UsageDetails) -> Self::Output {
        self.accumulate(&rhs);
        self
    }
}
