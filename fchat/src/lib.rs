//! Conversation history surface over the response reconstruction core.

mod error;
pub mod history;
mod hooks;
mod recorder;
mod store;

pub mod prelude {
    pub use crate::history::{
        append_response_messages, append_update, append_update_stream, append_updates,
    };
    pub use crate::{
        BoundaryStrategy, ChatError, ChatErrorKind, ConversationRecorder,
        ConversationRecorderBuilder, ConversationStore, InMemoryConversationStore,
        NoopRecorderHooks, RecorderHooks, RecorderPolicy,
    };
    pub use fcommon::SessionId;
}

pub use error::{ChatError, ChatErrorKind};
pub use hooks::{NoopRecorderHooks, RecorderHooks};
pub use recorder::{
    BoundaryStrategy, ConversationRecorder, ConversationRecorderBuilder, RecorderPolicy,
};
pub use store::{ConversationStore, InMemoryConversationStore};
pub use fcommon::SessionId;
