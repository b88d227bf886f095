//! Finished response to update sequence, the inverse of aggregation.
//!
//! ```rust
//! use fresponse::{Message, Response, Role, UsageDetails, aggregate, decompose};
//!
//! let response = Response::from_messages(vec![
//!     Message::new(Role::Assistant, "one").with_message_id("a"),
//!     Message::new(Role::Assistant, "two").with_message_id("b"),
//! ])
//! .with_usage(UsageDetails::new().with_total_tokens(9));
//!
//! let updates = decompose(&response);
//! assert_eq!(updates.len(), 3);
//!
//! let rebuilt = aggregate(updates);
//! assert_eq!(rebuilt.messages.len(), 2);
//! assert_eq!(rebuilt.usage, response.usage);
//! ```

use crate::{Content, Message, Response, ResponseUpdate, VecUpdateStream};

/// One update per message, then a trailing update for response-level usage
/// and properties when either is present. Empty usage is not replayed.
pub fn decompose(response: &Response) -> Vec<ResponseUpdate> {
    let mut updates: Vec<ResponseUpdate> = response
        .messages
        .iter()
        .enumerate()
        .map(|(choice_index, message)| message_update(response, message.clone(), choice_index))
        .collect();

    if let Some(trailing) = trailing_update(response) {
        updates.push(trailing);
    }

    updates
}

/// Owned variant of [`decompose`] that moves message contents instead of cloning.
pub fn decompose_owned(mut response: Response) -> Vec<ResponseUpdate> {
    let messages = std::mem::take(&mut response.messages);
    let mut updates: Vec<ResponseUpdate> = messages
        .into_iter()
        .enumerate()
        .map(|(choice_index, message)| message_update(&response, message, choice_index))
        .collect();

    if let Some(trailing) = trailing_update(&response) {
        updates.push(trailing);
    }

    updates
}

fn message_update(response: &Response, message: Message, choice_index: usize) -> ResponseUpdate {
    let Message {
        role,
        author_name,
        contents,
        message_id,
        raw,
        properties,
    } = message;

    ResponseUpdate {
        role: Some(role),
        author_name,
        contents,
        raw,
        properties,
        response_id: response.response_id.clone(),
        message_id,
        conversation_id: response.conversation_id.clone(),
        created_at: response.created_at,
        finish_reason: response.finish_reason.clone(),
        model_id: response.model_id.clone(),
        choice_index,
    }
}

fn trailing_update(response: &Response) -> Option<ResponseUpdate> {
    let usage = response.usage.as_ref().filter(|usage| !usage.is_empty());
    if usage.is_none() && response.properties.is_none() {
        return None;
    }

    let mut update = ResponseUpdate::new();
    update.properties = response.properties.clone();
    if let Some(usage) = usage {
        update.contents.push(Content::usage(usage.clone()));
    }

    Some(update)
}

impl Response {
    pub fn to_updates(&self) -> Vec<ResponseUpdate> {
        decompose(self)
    }

    pub fn into_updates(self) -> Vec<ResponseUpdate> {
        decompose_owned(self)
    }

    /// Replays this response as an in-memory update stream.
    pub fn into_update_stream(self) -> VecUpdateStream {
        VecUpdateStream::from_updates(self.into_updates())
    }
}

#[cfg(test)]
mod tests {
    use std::time::SystemTime;

    use fcommon::PropertyBag;

    use super::*;
    use crate::{FinishReason, Role, UsageDetails, aggregate, aggregate_choices};

    fn sample_response() -> Response {
        Response::from_messages(vec![
            Message::new(Role::User, "question").with_message_id("m1"),
            Message::with_contents(
                Role::Assistant,
                vec![
                    Content::text("answer"),
                    Content::other("image", serde_json::json!({ "uri": "a.png" })),
                ],
            )
            .with_author_name("bot")
            .with_message_id("m2"),
        ])
        .with_response_id("resp-1")
        .with_model_id("gpt")
        .with_finish_reason(FinishReason::Stop)
        .with_created_at(SystemTime::UNIX_EPOCH)
    }

    #[test]
    fn one_update_per_message_carries_shared_scalars() {
        let updates = decompose(&sample_response());

        assert_eq!(updates.len(), 2);
        for (index, update) in updates.iter().enumerate() {
            assert_eq!(update.response_id.as_deref(), Some("resp-1"));
            assert_eq!(update.model_id.as_deref(), Some("gpt"));
            assert_eq!(update.finish_reason, Some(FinishReason::Stop));
            assert_eq!(update.created_at, Some(SystemTime::UNIX_EPOCH));
            assert_eq!(update.choice_index, index);
        }
        assert_eq!(updates[0].role, Some(Role::User));
        assert_eq!(updates[1].author_name.as_deref(), Some("bot"));
        assert_eq!(updates[1].contents.len(), 2);
    }

    #[test]
    fn trailing_update_carries_only_usage_and_properties() {
        let mut bag = PropertyBag::new();
        bag.insert("region".to_string(), "eu".into());
        let response = sample_response()
            .with_usage(UsageDetails::new().with_input_tokens(4))
            .with_properties(bag.clone());

        let updates = response.to_updates();
        let trailing = updates.last().expect("trailing update");

        assert_eq!(updates.len(), 3);
        assert_eq!(trailing.properties, Some(bag));
        assert_eq!(trailing.contents.len(), 1);
        assert!(trailing.contents[0].is_usage());
        assert!(trailing.role.is_none());
        assert!(trailing.message_id.is_none());
        assert!(trailing.model_id.is_none());
    }

    #[test]
    fn round_trip_keeps_message_text_and_roles() {
        let original = aggregate(vec![
            ResponseUpdate::from_text("Hi ")
                .with_message_id("a")
                .with_role(Role::Assistant),
            ResponseUpdate::from_text("there").with_message_id("a"),
            ResponseUpdate::from_text("!")
                .with_message_id("b")
                .with_role(Role::Tool),
            ResponseUpdate::from_usage(UsageDetails::new().with_output_tokens(2)),
        ]);

        let rebuilt = aggregate(original.to_updates());

        assert_eq!(rebuilt.messages.len(), original.messages.len());
        for (left, right) in rebuilt.messages.iter().zip(&original.messages) {
            assert_eq!(left.text(), right.text());
            assert_eq!(left.role, right.role);
        }
        assert_eq!(rebuilt.usage, original.usage);
    }

    #[test]
    fn index_keyed_round_trip_preserves_choices() {
        let original = aggregate_choices(vec![
            ResponseUpdate::from_text("first").with_choice_index(0),
            ResponseUpdate::from_text("second").with_choice_index(1),
        ]);

        let rebuilt = aggregate_choices(original.clone().into_updates());

        assert_eq!(rebuilt.messages.len(), 2);
        assert_eq!(rebuilt.messages[0].text(), "first");
        assert_eq!(rebuilt.messages[1].text(), "second");
    }

    #[test]
    fn empty_usage_adds_no_trailing_update() {
        let response = sample_response().with_usage(UsageDetails::new());

        let updates = decompose(&response);

        assert_eq!(updates.len(), 2);
        assert!(updates.iter().flat_map(|u| &u.contents).all(|c| !c.is_usage()));
    }

    #[test]
    fn empty_usage_with_properties_keeps_only_properties() {
        let mut bag = PropertyBag::new();
        bag.insert("trace".to_string(), "t-1".into());
        let response = Response::new()
            .with_usage(UsageDetails::new())
            .with_properties(bag.clone());

        let updates = decompose(&response);

        assert_eq!(updates.len(), 1);
        assert_eq!(updates[0].properties, Some(bag));
        assert!(updates[0].contents.is_empty());
    }

    #[test]
    fn empty_response_decomposes_to_nothing() {
        assert!(decompose(&Response::new()).is_empty());
    }
}
