//! Unified facade over the fstream workspace crates.
//!
//! This crate is designed to be the single dependency for most applications.
//! It re-exports the reconstruction core, the conversation history surface,
//! and the observability hooks, and adds constructors and macros for building
//! updates and messages by hand.

mod macros;

pub mod prelude;
pub mod util;

pub use fchat;
pub use fcommon;
pub use fobserve;
pub use fresponse;

pub use fchat::history::{
    append_response_messages, append_update, append_update_stream, append_updates,
};
pub use fchat::{
    BoundaryStrategy, ChatError, ChatErrorKind, ConversationRecorder, ConversationRecorderBuilder,
    ConversationStore, InMemoryConversationStore, NoopRecorderHooks, RecorderHooks,
    RecorderPolicy,
};
pub use fcommon::{BoxFuture, PropertyBag, RawPayload, SessionId};
pub use fobserve::{
    MetricsObservabilityHooks, SafeAggregationHooks, SafeRecorderHooks, TracingObservabilityHooks,
};
pub use fresponse::{
    AggregationHooks, AggregationSummary, BoundaryDetector, BoxedUpdateStream, CancellationToken,
    Content, ContentKind, FinishReason, IdentifierKeyed, IndexKeyed, MergePolicy, MergeRule,
    Message, NoopAggregationHooks, OtherContent, Response, ResponseAggregator,
    ResponseAggregatorBuilder, ResponseError, ResponseErrorKind, ResponseUpdate, Role,
    TextContent, UpdateStream, UsageContent, UsageDetails, VecUpdateStream, aggregate,
    aggregate_choices, collect, collect_choices, decompose,
};

pub use util::{
    assistant_message, choice_update, in_memory_recorder, parse_role, system_message,
    text_update, tool_message, usage_update, user_message,
};

#[cfg(test)]
mod tests {
    use crate::{ContentKind, Role};

    #[test]
    fn fs_msg_macro_creates_expected_message() {
        let message = crate::fs_msg!(user => "hello");
        assert_eq!(message.role, Role::User);
        assert_eq!(message.text(), "hello");
    }

    #[test]
    fn fs_messages_macro_builds_message_vector() {
        let messages = crate::fs_messages![
            system => "You are concise.",
            user => "Summarize the repo",
        ];

        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0].role, Role::System);
        assert_eq!(messages[1].role, Role::User);
    }

    #[test]
    fn fs_updates_macro_feeds_aggregation() {
        let response = crate::aggregate(crate::fs_updates![
            "a" => "Hi ",
            "a" => "there",
            "b" => "!",
        ]);

        assert_eq!(response.messages.len(), 2);
        assert_eq!(response.messages[0].text(), "Hi there");
    }

    #[test]
    fn fs_usage_macro_sets_named_counters() {
        let usage = crate::fs_usage!(input: 3, total: 10);
        assert_eq!(usage.input_tokens, Some(3));
        assert_eq!(usage.output_tokens, None);
        assert_eq!(usage.total_tokens, Some(10));

        let update = crate::fs_update!(usage: crate::fs_usage!(output: 2));
        assert!(matches!(update.contents[0].kind, ContentKind::Usage(_)));
    }
}
