//! Common imports for most fstream applications.

pub use crate::{
    append_response_messages, append_update, append_update_stream, append_updates,
    assistant_message, choice_update, in_memory_recorder, parse_role, system_message,
    text_update, tool_message, usage_update, user_message,
};
pub use crate::{fs_messages, fs_msg, fs_update, fs_updates, fs_usage};
pub use crate::{
    AggregationHooks, BoundaryStrategy, BoxFuture, CancellationToken, ChatError, ChatErrorKind,
    Content, ConversationRecorder, ConversationStore, FinishReason, InMemoryConversationStore,
    Message, MetricsObservabilityHooks, RecorderHooks, RecorderPolicy, Response,
    ResponseAggregator, ResponseError, ResponseUpdate, Role, SafeAggregationHooks,
    SafeRecorderHooks, SessionId, TracingObservabilityHooks, UsageDetails, VecUpdateStream,
    aggregate, aggregate_choices, collect, collect_choices, decompose,
};
