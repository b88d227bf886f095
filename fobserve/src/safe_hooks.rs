use std::panic::{AssertUnwindSafe, catch_unwind};

use fchat::{ChatError, RecorderHooks};
use fcommon::SessionId;
use fresponse::{AggregationHooks, AggregationSummary, ResponseError};

pub struct SafeAggregationHooks<H> {
    inner: H,
}

impl<H> SafeAggregationHooks<H> {
    pub fn new(inner: H) -> Self {
        Self { inner }
    }
}

impl<H> AggregationHooks for SafeAggregationHooks<H>
where
    H: AggregationHooks,
{
    fn on_message_started(
        &self,
        strategy: &'static str,
        position: usize,
        message_id: Option<&str>,
    ) {
        let _ = catch_unwind(AssertUnwindSafe(|| {
            self.inner
                .on_message_started(strategy, position, message_id)
        }));
    }

    fn on_update_folded(&self, strategy: &'static str, sequence: usize, position: usize) {
        let _ = catch_unwind(AssertUnwindSafe(|| {
            self.inner.on_update_folded(strategy, sequence, position)
        }));
    }

    fn on_finalized(&self, summary: &AggregationSummary) {
        let _ = catch_unwind(AssertUnwindSafe(|| self.inner.on_finalized(summary)));
    }

    fn on_cancelled(&self, strategy: &'static str, updates_folded: usize) {
        let _ = catch_unwind(AssertUnwindSafe(|| {
            self.inner.on_cancelled(strategy, updates_folded)
        }));
    }

    fn on_source_error(
        &self,
        strategy: &'static str,
        updates_folded: usize,
        error: &ResponseError,
    ) {
        let _ = catch_unwind(AssertUnwindSafe(|| {
            self.inner.on_source_error(strategy, updates_folded, error)
        }));
    }
}

pub struct SafeRecorderHooks<H> {
    inner: H,
}

impl<H> SafeRecorderHooks<H> {
    pub fn new(inner: H) -> Self {
        Self { inner }
    }
}

impl<H> RecorderHooks for SafeRecorderHooks<H>
where
    H: RecorderHooks,
{
    fn on_record_start(&self, session_id: &SessionId, strategy: &'static str) {
        let _ = catch_unwind(AssertUnwindSafe(|| {
            self.inner.on_record_start(session_id, strategy)
        }));
    }

    fn on_messages_persisted(&self, session_id: &SessionId, messages: usize) {
        let _ = catch_unwind(AssertUnwindSafe(|| {
            self.inner.on_messages_persisted(session_id, messages)
        }));
    }

    fn on_record_skipped(&self, session_id: &SessionId) {
        let _ = catch_unwind(AssertUnwindSafe(|| self.inner.on_record_skipped(session_id)));
    }

    fn on_record_failure(&self, session_id: &SessionId, error: &ChatError) {
        let _ = catch_unwind(AssertUnwindSafe(|| {
            self.inner.on_record_failure(session_id, error)
        }));
    }
}
