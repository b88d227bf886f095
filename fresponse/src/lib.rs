//! Reconstruction of finished responses from incremental update streams.
//!
//! Updates are folded in arrival order by a [`ResponseAggregator`], which
//! groups them into messages with a [`BoundaryDetector`], merges metadata per
//! [`MergePolicy`], sums usage, and coalesces adjacent text on finalize.
//! [`decompose`] goes the other way.
//!
//! ```rust
//! use fresponse::{ResponseUpdate, Role, aggregate};
//!
//! let response = aggregate(vec![
//!     ResponseUpdate::from_text("Hel").with_role(Role::Assistant).with_message_id("m1"),
//!     ResponseUpdate::from_text("lo").with_message_id("m1"),
//! ]);
//!
//! assert_eq!(response.messages.len(), 1);
//! assert_eq!(response.messages[0].contents.len(), 1);
//! assert_eq!(response.text(), "Hello");
//! ```

mod aggregator;
pub mod boundary;
mod coalesce;
mod collect;
mod content;
mod decompose;
mod error;
mod hooks;
pub mod merge;
mod model;
pub mod prelude;
mod response;
mod stream;
mod update;
mod usage;
mod wire;

pub use aggregator::{
    ResponseAggregator, ResponseAggregatorBuilder, aggregate, aggregate_choices, aggregate_with,
};
pub use boundary::{BoundaryDetector, IdentifierKeyed, IndexKeyed, MessageDraft};
pub use coalesce::coalesce_text_contents;
pub use collect::{collect, collect_choices};
pub use content::{Content, ContentKind, OtherContent, TextContent, UsageContent, concat_text};
pub use decompose::{decompose, decompose_owned};
pub use error::{ResponseError, ResponseErrorKind};
pub use hooks::{AggregationHooks, AggregationSummary, NoopAggregationHooks};
pub use merge::{MergePolicy, MergeRule, PropertyTarget};
pub use model::{FinishReason, Message, Role, normalize_author_name};
pub use response::Response;
pub use stream::{BoxedUpdateStream, UpdateStream, VecUpdateStream, infallible};
pub use update::ResponseUpdate;
pub use usage::UsageDetails;

pub use fcommon::{PropertyBag, RawPayload};
pub use tokio_util::sync::CancellationToken;
