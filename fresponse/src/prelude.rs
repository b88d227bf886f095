//! Common `fresponse` imports for downstream crates.

pub use crate::{
    AggregationHooks, AggregationSummary, BoundaryDetector, BoxedUpdateStream, Content,
    ContentKind, FinishReason, IdentifierKeyed, IndexKeyed, MergePolicy, MergeRule, Message,
    NoopAggregationHooks, Response, ResponseAggregator, ResponseAggregatorBuilder, ResponseError,
    ResponseErrorKind, ResponseUpdate, Role, UpdateStream, UsageDetails, VecUpdateStream,
    aggregate, aggregate_choices, collect, collect_choices, decompose,
};
pub use fcommon::{PropertyBag, RawPayload, SessionId};
pub use tokio_util::sync::CancellationToken;
