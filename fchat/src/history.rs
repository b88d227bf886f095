//! Append helpers for caller-owned message lists.
//!
//! ```rust
//! use fchat::history::{append_response_messages, append_update, append_updates};
//! use fresponse::{Message, Response, ResponseUpdate, Role};
//!
//! let mut history = vec![Message::new(Role::User, "hi")];
//! append_updates(
//!     &mut history,
//!     vec![ResponseUpdate::from_text("hel"), ResponseUpdate::from_text("lo")],
//! );
//! append_response_messages(&mut history, &Response::from_message(Message::new(Role::Tool, "42")));
//! assert!(append_update(&mut history, ResponseUpdate::from_text("!"), None));
//!
//! let texts: Vec<String> = history.iter().map(Message::text).collect();
//! assert_eq!(texts, vec!["hi", "hello", "42", "!"]);
//! ```

use fresponse::{Content, Message, Response, ResponseError, ResponseUpdate, aggregate, collect};
use futures_core::Stream;

/// Appends clones of every message in `response`.
pub fn append_response_messages(list: &mut Vec<Message>, response: &Response) {
    list.extend(response.messages.iter().cloned());
}

/// Aggregates `updates` with identifier-keyed boundaries, then appends the messages.
pub fn append_updates<I>(list: &mut Vec<Message>, updates: I)
where
    I: IntoIterator<Item = ResponseUpdate>,
{
    list.extend(aggregate(updates).messages);
}

/// Async counterpart of [`append_updates`]. Nothing is appended on error.
pub async fn append_update_stream<S>(
    list: &mut Vec<Message>,
    stream: S,
) -> Result<(), ResponseError>
where
    S: Stream<Item = Result<ResponseUpdate, ResponseError>>,
{
    let response = collect(stream).await?;
    list.extend(response.messages);
    Ok(())
}

/// Turns a single update into one message without aggregation.
///
/// Usage items are always skipped. `filter`, when given, must accept an item
/// for it to be kept. Returns `false` and appends nothing when no content
/// survives.
pub fn append_update(
    list: &mut Vec<Message>,
    update: ResponseUpdate,
    filter: Option<&dyn Fn(&Content) -> bool>,
) -> bool {
    let ResponseUpdate {
        role,
        author_name,
        contents,
        raw,
        properties,
        message_id,
        ..
    } = update;

    let contents: Vec<Content> = contents
        .into_iter()
        .filter(|content| !content.is_usage())
        .filter(|content| filter.is_none_or(|keep| keep(content)))
        .collect();
    if contents.is_empty() {
        return false;
    }

    let mut message = Message::with_contents(role.unwrap_or_default(), contents);
    message.author_name = fresponse::normalize_author_name(author_name);
    message.message_id = message_id;
    message.raw = raw;
    message.properties = properties;
    list.push(message);
    true
}
