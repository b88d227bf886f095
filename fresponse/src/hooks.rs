//! Operational hook contracts for aggregation runs.

use crate::{ResponseError, UsageDetails};

/// Summary handed to [`AggregationHooks::on_finalized`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AggregationSummary {
    pub strategy: &'static str,
    pub updates_folded: usize,
    pub messages: usize,
    pub text_items_coalesced: usize,
    pub usage: Option<UsageDetails>,
}

pub trait AggregationHooks: Send + Sync {
    fn on_message_started(
        &self,
        _strategy: &'static str,
        _position: usize,
        _message_id: Option<&str>,
    ) {
    }

    fn on_update_folded(&self, _strategy: &'static str, _sequence: usize, _position: usize) {}

    fn on_finalized(&self, _summary: &AggregationSummary) {}

    fn on_cancelled(&self, _strategy: &'static str, _updates_folded: usize) {}

    fn on_source_error(
        &self,
        _strategy: &'static str,
        _updates_folded: usize,
        _error: &ResponseError,
    ) {
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct NoopAggregationHooks;

impl AggregationHooks for NoopAggregationHooks {}
