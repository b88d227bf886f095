//! Linear-time merging of adjacent text items.
//!
//! ```rust
//! use fresponse::{Content, coalesce_text_contents};
//!
//! let mut contents = vec![
//!     Content::text("Hel"),
//!     Content::text("lo"),
//!     Content::other("image", serde_json::json!({ "uri": "a.png" })),
//!     Content::text("!"),
//! ];
//! let removed = coalesce_text_contents(&mut contents);
//!
//! assert_eq!(removed, 1);
//! assert_eq!(contents.len(), 3);
//! assert_eq!(contents[0].as_text(), Some("Hello"));
//! ```

use crate::{Content, ContentKind};

/// Replaces every run of two or more adjacent text items with one text item.
///
/// The merged item keeps the first item's property bag and drops raw
/// payloads. Single text items and non-text items are moved through as-is.
/// Returns how many items were removed.
pub fn coalesce_text_contents(contents: &mut Vec<Content>) -> usize {
    if !has_adjacent_text(contents) {
        return 0;
    }

    let original_len = contents.len();
    let mut compacted = Vec::with_capacity(original_len);
    let mut run: Option<Content> = None;

    for content in contents.drain(..) {
        match content.kind {
            ContentKind::Text(next) => match run.as_mut() {
                Some(head) => {
                    if let ContentKind::Text(head_text) = &mut head.kind {
                        head_text.text.push_str(&next.text);
                    }
                    head.raw = None;
                }
                None => {
                    run = Some(Content {
                        kind: ContentKind::Text(next),
                        raw: content.raw,
                        properties: content.properties,
                    });
                }
            },
            kind => {
                if let Some(head) = run.take() {
                    compacted.push(head);
                }
                compacted.push(Content {
                    kind,
                    raw: content.raw,
                    properties: content.properties,
                });
            }
        }
    }

    if let Some(head) = run.take() {
        compacted.push(head);
    }

    *contents = compacted;
    original_len - contents.len()
}

fn has_adjacent_text(contents: &[Content]) -> bool {
    contents
        .windows(2)
        .any(|pair| pair[0].is_text() && pair[1].is_text())
}

#[cfg(test)]
mod tests {
    use fcommon::RawPayload;

    use super::*;
    use crate::UsageDetails;

    fn texts(contents: &[Content]) -> Vec<Option<&str>> {
        contents.iter().map(Content::as_text).collect()
    }

    #[test]
    fn empty_and_non_adjacent_lists_are_untouched() {
        let mut empty: Vec<Content> = Vec::new();
        assert_eq!(coalesce_text_contents(&mut empty), 0);
        assert!(empty.is_empty());

        let mut spaced = vec![
            Content::text("a"),
            Content::other("image", serde_json::json!({})),
            Content::text("b"),
        ];
        let before = spaced.clone();
        assert_eq!(coalesce_text_contents(&mut spaced), 0);
        assert_eq!(spaced, before);
    }

    #[test]
    fn runs_collapse_and_non_text_items_keep_their_positions() {
        let mut contents = vec![
            Content::text("a"),
            Content::text("b"),
            Content::text("c"),
            Content::other("image", serde_json::json!({ "uri": "x" })),
            Content::text("d"),
            Content::text("e"),
            Content::usage(UsageDetails::new().with_input_tokens(1)),
            Content::text("f"),
        ];

        let removed = coalesce_text_contents(&mut contents);

        assert_eq!(removed, 3);
        assert_eq!(
            texts(&contents),
            vec![Some("abc"), None, Some("de"), None, Some("f")]
        );
        assert_eq!(contents[1].discriminator(), "image");
        assert!(contents[3].is_usage());
    }

    #[test]
    fn merged_item_inherits_first_property_bag_and_drops_raw_payloads() {
        let mut contents = vec![
            Content::text("x")
                .with_property("lang", "en")
                .with_raw(RawPayload::new(1_u8)),
            Content::text("y").with_property("lang", "fr"),
        ];

        coalesce_text_contents(&mut contents);

        assert_eq!(contents.len(), 1);
        let merged = &contents[0];
        assert_eq!(merged.as_text(), Some("xy"));
        assert!(merged.raw.is_none());
        let properties = merged.properties.as_ref().expect("bag should be inherited");
        assert_eq!(properties["lang"], "en");
    }

    #[test]
    fn single_text_items_keep_raw_payloads() {
        let raw = RawPayload::new("chunk");
        let mut contents = vec![
            Content::text("solo").with_raw(raw.clone()),
            Content::other("image", serde_json::json!({})),
            Content::text("a"),
            Content::text("b"),
        ];

        coalesce_text_contents(&mut contents);

        assert_eq!(contents[0].raw, Some(raw));
        assert_eq!(contents[2].as_text(), Some("ab"));
    }

    #[test]
    fn coalescing_is_idempotent() {
        let mut contents = vec![
            Content::text("Hi "),
            Content::text("there"),
            Content::other("image", serde_json::json!({})),
            Content::text("!"),
        ];

        coalesce_text_contents(&mut contents);
        let once = contents.clone();
        let removed = coalesce_text_contents(&mut contents);

        assert_eq!(removed, 0);
        assert_eq!(contents, once);
    }
}
