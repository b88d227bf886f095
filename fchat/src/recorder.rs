//! Drives update streams into a conversation store.
//!
//! ```rust
//! use std::sync::Arc;
//!
//! use fchat::{ConversationRecorder, ConversationStore, InMemoryConversationStore};
//! use fcommon::SessionId;
//! use fresponse::{ResponseUpdate, VecUpdateStream};
//!
//! # tokio::runtime::Builder::new_current_thread().build().expect("runtime").block_on(async {
//! let store = Arc::new(InMemoryConversationStore::new());
//! let recorder = ConversationRecorder::builder(store.clone()).build();
//! let session = SessionId::from("s1");
//!
//! let response = recorder
//!     .record(&session, VecUpdateStream::from_updates(vec![ResponseUpdate::from_text("hi")]))
//!     .await
//!     .expect("record should succeed");
//!
//! assert_eq!(response.text(), "hi");
//! assert_eq!(store.load_messages(&session).await.expect("load").len(), 1);
//! # });
//! ```

use std::sync::Arc;

use fcommon::SessionId;
use fresponse::{
    AggregationHooks, BoundaryDetector, Message, NoopAggregationHooks, Response,
    ResponseAggregator, ResponseError, ResponseUpdate,
};
use futures_core::Stream;
use tokio_util::sync::CancellationToken;

use crate::{ChatError, ConversationStore, NoopRecorderHooks, RecorderHooks};

/// Message boundary strategy used for recorded streams.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BoundaryStrategy {
    #[default]
    Identifier,
    Index,
}

impl BoundaryStrategy {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Identifier => "identifier",
            Self::Index => "index",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecorderPolicy {
    /// Touch the store even when the response produced no messages.
    pub persist_empty_responses: bool,
    /// Leave out messages that ended up with no content items.
    pub drop_empty_messages: bool,
}

impl Default for RecorderPolicy {
    fn default() -> Self {
        Self {
            persist_empty_responses: false,
            drop_empty_messages: true,
        }
    }
}

pub struct ConversationRecorder {
    store: Arc<dyn ConversationStore>,
    strategy: BoundaryStrategy,
    policy: RecorderPolicy,
    aggregation_hooks: Arc<dyn AggregationHooks>,
    hooks: Arc<dyn RecorderHooks>,
}

impl ConversationRecorder {
    pub fn new(store: Arc<dyn ConversationStore>) -> Self {
        Self::builder(store).build()
    }

    pub fn builder(store: Arc<dyn ConversationStore>) -> ConversationRecorderBuilder {
        ConversationRecorderBuilder::new(store)
    }

    pub fn strategy(&self) -> BoundaryStrategy {
        self.strategy
    }

    pub fn policy(&self) -> RecorderPolicy {
        self.policy
    }

    /// Aggregates `stream` and appends the resulting messages to `session_id`.
    pub async fn record<S>(&self, session_id: &SessionId, stream: S) -> Result<Response, ChatError>
    where
        S: Stream<Item = Result<ResponseUpdate, ResponseError>>,
    {
        self.record_inner(session_id, stream, None).await
    }

    /// Like [`ConversationRecorder::record`]; nothing is persisted when
    /// `cancellation` fires first.
    pub async fn record_with_cancellation<S>(
        &self,
        session_id: &SessionId,
        stream: S,
        cancellation: &CancellationToken,
    ) -> Result<Response, ChatError>
    where
        S: Stream<Item = Result<ResponseUpdate, ResponseError>>,
    {
        self.record_inner(session_id, stream, Some(cancellation))
            .await
    }

    /// Persists an already finished response.
    pub async fn record_response(
        &self,
        session_id: &SessionId,
        response: &Response,
    ) -> Result<(), ChatError> {
        self.hooks
            .on_record_start(session_id, self.strategy.as_str());
        self.persist(session_id, response.messages.clone()).await
    }

    /// Appends caller-authored messages, such as the prompt, ahead of a recorded reply.
    pub async fn record_messages(
        &self,
        session_id: &SessionId,
        messages: Vec<Message>,
    ) -> Result<(), ChatError> {
        if messages.is_empty() {
            return Err(ChatError::invalid_request("messages must not be empty"));
        }

        self.store.append_messages(session_id, messages).await
    }

    pub async fn history(&self, session_id: &SessionId) -> Result<Vec<Message>, ChatError> {
        self.store.load_messages(session_id).await
    }

    async fn record_inner<S>(
        &self,
        session_id: &SessionId,
        stream: S,
        cancellation: Option<&CancellationToken>,
    ) -> Result<Response, ChatError>
    where
        S: Stream<Item = Result<ResponseUpdate, ResponseError>>,
    {
        self.hooks
            .on_record_start(session_id, self.strategy.as_str());

        let collected = match self.strategy {
            BoundaryStrategy::Identifier => {
                let aggregator = ResponseAggregator::builder()
                    .hooks(self.aggregation_hooks.clone())
                    .build();
                drive(aggregator, stream, cancellation).await
            }
            BoundaryStrategy::Index => {
                let aggregator = ResponseAggregator::builder()
                    .index_keyed()
                    .hooks(self.aggregation_hooks.clone())
                    .build();
                drive(aggregator, stream, cancellation).await
            }
        };

        let response = match collected {
            Ok(response) => response,
            Err(error) => {
                let error = ChatError::from(error);
                self.hooks.on_record_failure(session_id, &error);
                return Err(error);
            }
        };

        self.persist(session_id, response.messages.clone()).await?;
        Ok(response)
    }

    async fn persist(
        &self,
        session_id: &SessionId,
        messages: Vec<Message>,
    ) -> Result<(), ChatError> {
        let messages: Vec<Message> = if self.policy.drop_empty_messages {
            messages
                .into_iter()
                .filter(|message| !message.contents.is_empty())
                .collect()
        } else {
            messages
        };

        if messages.is_empty() && !self.policy.persist_empty_responses {
            self.hooks.on_record_skipped(session_id);
            return Ok(());
        }

        let count = messages.len();
        if let Err(error) = self.store.append_messages(session_id, messages).await {
            self.hooks.on_record_failure(session_id, &error);
            return Err(error);
        }

        self.hooks.on_messages_persisted(session_id, count);
        Ok(())
    }
}

async fn drive<D, S>(
    aggregator: ResponseAggregator<D>,
    stream: S,
    cancellation: Option<&CancellationToken>,
) -> Result<Response, ResponseError>
where
    D: BoundaryDetector,
    S: Stream<Item = Result<ResponseUpdate, ResponseError>>,
{
    match cancellation {
        Some(token) => aggregator.collect_with_cancellation(stream, token).await,
        None => aggregator.collect(stream).await,
    }
}

pub struct ConversationRecorderBuilder {
    store: Arc<dyn ConversationStore>,
    strategy: BoundaryStrategy,
    policy: RecorderPolicy,
    aggregation_hooks: Arc<dyn AggregationHooks>,
    hooks: Arc<dyn RecorderHooks>,
}

impl ConversationRecorderBuilder {
    pub fn new(store: Arc<dyn ConversationStore>) -> Self {
        Self {
            store,
            strategy: BoundaryStrategy::default(),
            policy: RecorderPolicy::default(),
            aggregation_hooks: Arc::new(NoopAggregationHooks),
            hooks: Arc::new(NoopRecorderHooks),
        }
    }

    pub fn strategy(mut self, strategy: BoundaryStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    pub fn policy(mut self, policy: RecorderPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn aggregation_hooks(mut self, hooks: Arc<dyn AggregationHooks>) -> Self {
        self.aggregation_hooks = hooks;
        self
    }

    pub fn hooks(mut self, hooks: Arc<dyn RecorderHooks>) -> Self {
        self.hooks = hooks;
        self
    }

    pub fn build(self) -> ConversationRecorder {
        ConversationRecorder {
            store: self.store,
            strategy: self.strategy,
            policy: self.policy,
            aggregation_hooks: self.aggregation_hooks,
            hooks: self.hooks,
        }
    }
}
