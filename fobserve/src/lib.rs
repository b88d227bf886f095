//! Production-friendly observability hooks for aggregation and recording phases.
//!
//! ```rust
//! use fobserve::{MetricsObservabilityHooks, SafeAggregationHooks, TracingObservabilityHooks};
//!
//! let _aggregation_hooks = SafeAggregationHooks::new(TracingObservabilityHooks);
//! let _metrics = MetricsObservabilityHooks;
//! ```

mod metrics_hooks;
mod safe_hooks;
mod tracing_hooks;

pub use metrics_hooks::MetricsObservabilityHooks;
pub use safe_hooks::{SafeAggregationHooks, SafeRecorderHooks};
pub use tracing_hooks::TracingObservabilityHooks;

pub mod prelude {
    pub use crate::{
        MetricsObservabilityHooks, SafeAggregationHooks, SafeRecorderHooks,
        TracingObservabilityHooks,
    };
}
