//! Metrics-based observability hooks for aggregation and recording phases.
//!
//! ```rust
//! use fchat::RecorderHooks;
//! use fobserve::MetricsObservabilityHooks;
//!
//! fn accepts_recorder_hooks(_hooks: &dyn RecorderHooks) {}
//!
//! let hooks = MetricsObservabilityHooks;
//! accepts_recorder_hooks(&hooks);
//! ```

use fchat::{ChatError, RecorderHooks};
use fcommon::SessionId;
use fresponse::{AggregationHooks, AggregationSummary, ResponseError};

#[derive(Debug, Clone, Copy, Default)]
pub struct MetricsObservabilityHooks;

impl AggregationHooks for MetricsObservabilityHooks {
    fn on_message_started(
        &self,
        strategy: &'static str,
        _position: usize,
        _message_id: Option<&str>,
    ) {
        metrics::counter!("fstream_aggregate_messages_started_total", "strategy" => strategy)
            .increment(1);
    }

    fn on_update_folded(&self, strategy: &'static str, _sequence: usize, _position: usize) {
        metrics::counter!("fstream_aggregate_updates_total", "strategy" => strategy).increment(1);
    }

    fn on_finalized(&self, summary: &AggregationSummary) {
        metrics::counter!(
            "fstream_aggregate_responses_total",
            "strategy" => summary.strategy,
            "status" => "finalized"
        )
        .increment(1);
        metrics::histogram!(
            "fstream_aggregate_messages_per_response",
            "strategy" => summary.strategy
        )
        .record(summary.messages as f64);
        metrics::histogram!(
            "fstream_aggregate_updates_per_response",
            "strategy" => summary.strategy
        )
        .record(summary.updates_folded as f64);
        metrics::counter!(
            "fstream_aggregate_text_items_coalesced_total",
            "strategy" => summary.strategy
        )
        .increment(summary.text_items_coalesced as u64);

        if let Some(usage) = &summary.usage {
            if let Some(input) = usage.input_tokens {
                metrics::counter!("fstream_aggregate_tokens_total", "direction" => "input")
                    .increment(input);
            }
            if let Some(output) = usage.output_tokens {
                metrics::counter!("fstream_aggregate_tokens_total", "direction" => "output")
                    .increment(output);
            }
        }
    }

    fn on_cancelled(&self, strategy: &'static str, updates_folded: usize) {
        metrics::counter!(
            "fstream_aggregate_responses_total",
            "strategy" => strategy,
            "status" => "cancelled"
        )
        .increment(1);
        metrics::histogram!(
            "fstream_aggregate_updates_before_cancel",
            "strategy" => strategy
        )
        .record(updates_folded as f64);
    }

    fn on_source_error(
        &self,
        strategy: &'static str,
        _updates_folded: usize,
        error: &ResponseError,
    ) {
        metrics::counter!(
            "fstream_aggregate_responses_total",
            "strategy" => strategy,
            "status" => "source_error",
            "error_kind" => format!("{:?}", error.kind)
        )
        .increment(1);
    }
}

impl RecorderHooks for MetricsObservabilityHooks {
    fn on_record_start(&self, _session_id: &SessionId, strategy: &'static str) {
        metrics::counter!("fstream_record_start_total", "strategy" => strategy).increment(1);
    }

    fn on_messages_persisted(&self, _session_id: &SessionId, messages: usize) {
        metrics::counter!("fstream_record_persisted_total").increment(1);
        metrics::histogram!("fstream_record_messages_per_persist").record(messages as f64);
    }

    fn on_record_skipped(&self, _session_id: &SessionId) {
        metrics::counter!("fstream_record_skipped_total").increment(1);
    }

    fn on_record_failure(&self, _session_id: &SessionId, error: &ChatError) {
        metrics::counter!(
            "fstream_record_failure_total",
            "error_kind" => format!("{:?}", error.kind)
        )
        .increment(1);
    }
}
