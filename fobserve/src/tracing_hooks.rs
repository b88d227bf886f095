//! Tracing-based observability hooks for aggregation and recording phases.
//!
//! ```rust
//! use fobserve::TracingObservabilityHooks;
//! use fresponse::AggregationHooks;
//!
//! fn accepts_aggregation_hooks(_hooks: &dyn AggregationHooks) {}
//!
//! let hooks = TracingObservabilityHooks;
//! accepts_aggregation_hooks(&hooks);
//! ```

use fchat::{ChatError, RecorderHooks};
use fcommon::SessionId;
use fresponse::{AggregationHooks, AggregationSummary, ResponseError};

#[derive(Debug, Clone, Copy, Default)]
pub struct TracingObservabilityHooks;

impl AggregationHooks for TracingObservabilityHooks {
    fn on_message_started(
        &self,
        strategy: &'static str,
        position: usize,
        message_id: Option<&str>,
    ) {
        tracing::debug!(
            phase = "aggregate",
            event = "message_started",
            strategy,
            position,
            message_id
        );
    }

    fn on_update_folded(&self, strategy: &'static str, sequence: usize, position: usize) {
        tracing::trace!(
            phase = "aggregate",
            event = "update_folded",
            strategy,
            sequence,
            position
        );
    }

    fn on_finalized(&self, summary: &AggregationSummary) {
        tracing::info!(
            phase = "aggregate",
            event = "finalized",
            strategy = summary.strategy,
            updates_folded = summary.updates_folded,
            messages = summary.messages,
            text_items_coalesced = summary.text_items_coalesced,
            input_tokens = summary.usage.as_ref().and_then(|usage| usage.input_tokens),
            output_tokens = summary.usage.as_ref().and_then(|usage| usage.output_tokens),
            total_tokens = summary.usage.as_ref().and_then(|usage| usage.total_tokens)
        );
    }

    fn on_cancelled(&self, strategy: &'static str, updates_folded: usize) {
        tracing::warn!(
            phase = "aggregate",
            event = "cancelled",
            strategy,
            updates_folded
        );
    }

    fn on_source_error(
        &self,
        strategy: &'static str,
        updates_folded: usize,
        error: &ResponseError,
    ) {
        tracing::error!(
            phase = "aggregate",
            event = "source_error",
            strategy,
            updates_folded,
            error_kind = ?error.kind,
            error = %error
        );
    }
}

impl RecorderHooks for TracingObservabilityHooks {
    fn on_record_start(&self, session_id: &SessionId, strategy: &'static str) {
        tracing::info!(
            phase = "record",
            event = "start",
            session_id = %session_id,
            strategy
        );
    }

    fn on_messages_persisted(&self, session_id: &SessionId, messages: usize) {
        tracing::info!(
            phase = "record",
            event = "persisted",
            session_id = %session_id,
            messages
        );
    }

    fn on_record_skipped(&self, session_id: &SessionId) {
        tracing::debug!(phase = "record", event = "skipped", session_id = %session_id);
    }

    fn on_record_failure(&self, session_id: &SessionId, error: &ChatError) {
        tracing::error!(
            phase = "record",
            event = "failure",
            session_id = %session_id,
            error_kind = ?error.kind,
            error = %error
        );
    }
}
