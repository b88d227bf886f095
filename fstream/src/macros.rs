/// Creates a single [`Message`](crate::Message) from a role shorthand.
///
/// ```rust
/// use fstream::{Role, fs_msg};
///
/// let message = fs_msg!(assistant => "Done.");
/// assert_eq!(message.role, Role::Assistant);
/// assert_eq!(message.text(), "Done.");
/// ```
#[macro_export]
macro_rules! fs_msg {
    (system => $content:expr $(,)?) => {
        $crate::Message::new($crate::Role::System, $content)
    };
    (user => $content:expr $(,)?) => {
        $crate::Message::new($crate::Role::User, $content)
    };
    (assistant => $content:expr $(,)?) => {
        $crate::Message::new($crate::Role::Assistant, $content)
    };
    (tool => $content:expr $(,)?) => {
        $crate::Message::new($crate::Role::Tool, $content)
    };
    ($role:ident => $content:expr $(,)?) => {
        compile_error!("unsupported role: use system, user, assistant, or tool");
    };
}

/// Creates a `Vec<Message>` from role/content pairs.
///
/// ```rust
/// use fstream::{Role, fs_messages};
///
/// let messages = fs_messages![
///     system => "You are concise.",
///     user => "Summarize this repository.",
/// ];
///
/// assert_eq!(messages.len(), 2);
/// assert_eq!(messages[0].role, Role::System);
/// assert_eq!(messages[1].role, Role::User);
/// ```
#[macro_export]
macro_rules! fs_messages {
    () => {
        Vec::<$crate::Message>::new()
    };
    ($($role:ident => $content:expr),+ $(,)?) => {
        vec![$($crate::fs_msg!($role => $content)),+]
    };
}

/// Creates a [`UsageDetails`](crate::UsageDetails) from named counters.
///
/// ```rust
/// use fstream::fs_usage;
///
/// let usage = fs_usage!(input: 12, output: 30);
/// assert_eq!(usage.input_tokens, Some(12));
/// assert_eq!(usage.output_tokens, Some(30));
/// assert_eq!(usage.total_tokens, None);
/// ```
#[macro_export]
macro_rules! fs_usage {
    (@set $usage:ident, input, $value:expr) => {
        $usage.with_input_tokens($value)
    };
    (@set $usage:ident, output, $value:expr) => {
        $usage.with_output_tokens($value)
    };
    (@set $usage:ident, total, $value:expr) => {
        $usage.with_total_tokens($value)
    };
    (@set $usage:ident, $other:ident, $value:expr) => {
        compile_error!("unsupported usage counter: use input, output, or total")
    };
    ($($key:ident : $value:expr),* $(,)?) => {{
        let usage = $crate::UsageDetails::new();
        $(let usage = $crate::fs_usage!(@set usage, $key, $value);)*
        usage
    }};
}

/// Creates a [`ResponseUpdate`](crate::ResponseUpdate) carrying text or usage.
///
/// ```rust
/// use fstream::fs_update;
///
/// let plain = fs_update!("hello");
/// let keyed = fs_update!("msg-1" => "hello");
/// let choice = fs_update!(choice 2 => "hello");
///
/// assert!(plain.message_id.is_none());
/// assert_eq!(keyed.message_id.as_deref(), Some("msg-1"));
/// assert_eq!(choice.choice_index, 2);
/// ```
#[macro_export]
macro_rules! fs_update {
    (usage: $usage:expr $(,)?) => {
        $crate::ResponseUpdate::from_usage($usage)
    };
    (choice $index:expr => $text:expr $(,)?) => {
        $crate::ResponseUpdate::from_text($text).with_choice_index($index)
    };
    ($message_id:expr => $text:expr $(,)?) => {
        $crate::ResponseUpdate::from_text($text).with_message_id($message_id)
    };
    ($text:expr $(,)?) => {
        $crate::ResponseUpdate::from_text($text)
    };
}

/// Creates a `Vec<ResponseUpdate>` from message-id/text pairs.
///
/// ```rust
/// use fstream::{aggregate, fs_updates};
///
/// let response = aggregate(fs_updates!["a" => "Hi ", "a" => "there", "b" => "!"]);
/// assert_eq!(response.messages.len(), 2);
/// ```
#[macro_export]
macro_rules! fs_updates {
    () => {
        Vec::<$crate::ResponseUpdate>::new()
    };
    ($($message_id:expr => $text:expr),+ $(,)?) => {
        vec![$($crate::fs_update!($message_id => $text)),+]
    };
}
