//! Fold engine that reconstructs a finished response from updates.
//!
//! ```rust
//! use fresponse::{ResponseAggregator, ResponseUpdate, UsageDetails};
//!
//! let mut aggregator = ResponseAggregator::new();
//! aggregator.fold(ResponseUpdate::from_text("Hi ").with_message_id("a"));
//! aggregator.fold(ResponseUpdate::from_text("there").with_message_id("a"));
//! aggregator.fold(ResponseUpdate::from_usage(UsageDetails::new().with_input_tokens(4)));
//!
//! let response = aggregator.finalize();
//! assert_eq!(response.messages.len(), 1);
//! assert_eq!(response.text(), "Hi there");
//! assert_eq!(response.usage.and_then(|usage| usage.input_tokens), Some(4));
//! ```

use std::sync::Arc;

use crate::boundary::{MessageDraft, Target};
use crate::merge::{PropertyTarget, merge_properties};
use crate::model::normalize_author_name;
use crate::{
    AggregationHooks, AggregationSummary, BoundaryDetector, Content, ContentKind, IdentifierKeyed,
    IndexKeyed, MergePolicy, Message, NoopAggregationHooks, Response, ResponseUpdate,
    UsageDetails, coalesce_text_contents,
};

/// Owns one in-progress response. Not shared: each stream gets its own.
pub struct ResponseAggregator<D = IdentifierKeyed> {
    detector: D,
    policy: MergePolicy,
    coalesce_text: bool,
    hooks: Arc<dyn AggregationHooks>,
    response: Response,
    updates_folded: usize,
}

impl ResponseAggregator<IdentifierKeyed> {
    pub fn new() -> Self {
        Self::with_detector(IdentifierKeyed::default())
    }

    pub fn builder() -> ResponseAggregatorBuilder<IdentifierKeyed> {
        ResponseAggregatorBuilder::new()
    }
}

impl Default for ResponseAggregator<IdentifierKeyed> {
    fn default() -> Self {
        Self::new()
    }
}

impl ResponseAggregator<IndexKeyed> {
    pub fn index_keyed() -> Self {
        Self::with_detector(IndexKeyed::default())
    }
}

impl<D> ResponseAggregator<D>
where
    D: BoundaryDetector,
{
    pub fn with_detector(detector: D) -> Self {
        let policy = detector.merge_policy();
        Self {
            detector,
            policy,
            coalesce_text: true,
            hooks: Arc::new(NoopAggregationHooks),
            response: Response::new(),
            updates_folded: 0,
        }
    }

    pub fn strategy(&self) -> &'static str {
        self.detector.strategy()
    }

    pub fn updates_folded(&self) -> usize {
        self.updates_folded
    }

    pub fn message_count(&self) -> usize {
        self.detector.message_count()
    }

    pub(crate) fn hooks(&self) -> &dyn AggregationHooks {
        self.hooks.as_ref()
    }

    /// Folds one update: boundary detection, scalar merge, then content merge.
    pub fn fold(&mut self, update: ResponseUpdate) {
        let strategy = self.detector.strategy();
        let policy = self.policy;
        let Target {
            draft,
            opened,
            position,
        } = self.detector.target(&update);

        if opened {
            self.hooks
                .on_message_started(strategy, position, draft.message_id.as_deref());
        }

        let ResponseUpdate {
            role,
            author_name,
            contents,
            raw,
            properties,
            response_id,
            conversation_id,
            created_at,
            finish_reason,
            model_id,
            ..
        } = update;

        policy.role.apply(&mut draft.role, role);
        policy
            .author_name
            .apply(&mut draft.author_name, normalize_author_name(author_name));
        policy.raw.apply(&mut draft.raw, raw);

        let response = &mut self.response;
        match policy.properties {
            PropertyTarget::Message => merge_properties(&mut draft.properties, properties),
            PropertyTarget::Response => merge_properties(&mut response.properties, properties),
        }

        policy
            .response_id
            .apply(&mut response.response_id, response_id);
        policy
            .conversation_id
            .apply(&mut response.conversation_id, conversation_id);
        policy.created_at.apply(&mut response.created_at, created_at);
        policy
            .finish_reason
            .apply(&mut response.finish_reason, finish_reason);
        policy.model_id.apply(&mut response.model_id, model_id);

        merge_contents(draft, &mut response.usage, contents);

        self.updates_folded += 1;
        self.hooks
            .on_update_folded(strategy, self.updates_folded, position);
    }

    /// Terminal step: orders messages, coalesces text, and applies singleton promotion.
    pub fn finalize(self) -> Response {
        let strategy = self.detector.strategy();
        let promotes_singleton = self.detector.promotes_singleton();
        let Self {
            detector,
            coalesce_text,
            hooks,
            mut response,
            updates_folded,
            ..
        } = self;

        let mut messages: Vec<Message> = detector
            .into_drafts()
            .into_iter()
            .map(MessageDraft::finish)
            .collect();

        let mut text_items_coalesced = 0;
        if coalesce_text {
            for message in &mut messages {
                text_items_coalesced += coalesce_text_contents(&mut message.contents);
            }
        }

        if promotes_singleton && let [message] = messages.as_mut_slice() {
            promote_singleton(&mut response, message);
        }

        response.messages = messages;
        hooks.on_finalized(&AggregationSummary {
            strategy,
            updates_folded,
            messages: response.messages.len(),
            text_items_coalesced,
            usage: response.usage.clone(),
        });

        response
    }
}

/// Usage is summed into the response; everything else is appended in order.
fn merge_contents(
    draft: &mut MessageDraft,
    usage: &mut Option<UsageDetails>,
    contents: Vec<Content>,
) {
    for content in contents {
        match content.kind {
            ContentKind::Usage(incoming) => {
                usage
                    .get_or_insert_with(UsageDetails::new)
                    .accumulate(&incoming.details);
            }
            kind => draft.contents.push(Content {
                kind,
                raw: content.raw,
                properties: content.properties,
            }),
        }
    }
}

/// Lifts exactly one usage item and the property bag of a lone message.
fn promote_singleton(response: &mut Response, message: &mut Message) {
    if response.usage.is_none() {
        let lone_usage = {
            let mut positions = message
                .contents
                .iter()
                .enumerate()
                .filter(|(_, content)| content.is_usage())
                .map(|(position, _)| position);
            match (positions.next(), positions.next()) {
                (Some(position), None) => Some(position),
                _ => None,
            }
        };

        if let Some(position) = lone_usage
            && let ContentKind::Usage(usage) = message.contents.remove(position).kind
        {
            response.usage = Some(usage.details);
        }
    }

    if let Some(properties) = message.properties.take() {
        merge_properties(&mut response.properties, Some(properties));
    }
}

/// Builder for aggregators with non-default strategy, policy, or hooks.
pub struct ResponseAggregatorBuilder<D = IdentifierKeyed> {
    detector: D,
    policy: Option<MergePolicy>,
    coalesce_text: bool,
    hooks: Arc<dyn AggregationHooks>,
}

impl ResponseAggregatorBuilder<IdentifierKeyed> {
    pub fn new() -> Self {
        Self {
            detector: IdentifierKeyed::default(),
            policy: None,
            coalesce_text: true,
            hooks: Arc::new(NoopAggregationHooks),
        }
    }
}

impl Default for ResponseAggregatorBuilder<IdentifierKeyed> {
    fn default() -> Self {
        Self::new()
    }
}

impl<D> ResponseAggregatorBuilder<D>
where
    D: BoundaryDetector,
{
    pub fn detector<E>(self, detector: E) -> ResponseAggregatorBuilder<E>
    where
        E: BoundaryDetector,
    {
        ResponseAggregatorBuilder {
            detector,
            policy: self.policy,
            coalesce_text: self.coalesce_text,
            hooks: self.hooks,
        }
    }

    pub fn index_keyed(self) -> ResponseAggregatorBuilder<IndexKeyed> {
        self.detector(IndexKeyed::default())
    }

    /// Overrides the detector's default rule table.
    pub fn merge_policy(mut self, policy: MergePolicy) -> Self {
        self.policy = Some(policy);
        self
    }

    pub fn coalesce_text(mut self, enabled: bool) -> Self {
        self.coalesce_text = enabled;
        self
    }

    pub fn hooks(mut self, hooks: Arc<dyn AggregationHooks>) -> Self {
        self.hooks = hooks;
        self
    }

    pub fn build(self) -> ResponseAggregator<D> {
        let mut aggregator = ResponseAggregator::with_detector(self.detector);
        if let Some(policy) = self.policy {
            aggregator.policy = policy;
        }
        aggregator.coalesce_text = self.coalesce_text;
        aggregator.hooks = self.hooks;
        aggregator
    }
}

/// Folds a synchronous sequence with identifier-keyed boundaries.
pub fn aggregate<I>(updates: I) -> Response
where
    I: IntoIterator<Item = ResponseUpdate>,
{
    aggregate_with(ResponseAggregator::new(), updates)
}

/// Folds a synchronous sequence with choice-index boundaries.
pub fn aggregate_choices<I>(updates: I) -> Response
where
    I: IntoIterator<Item = ResponseUpdate>,
{
    aggregate_with(ResponseAggregator::index_keyed(), updates)
}

pub fn aggregate_with<D, I>(mut aggregator: ResponseAggregator<D>, updates: I) -> Response
where
    D: BoundaryDetector,
    I: IntoIterator<Item = ResponseUpdate>,
{
    for update in updates {
        aggregator.fold(update);
    }

    aggregator.finalize()
}
