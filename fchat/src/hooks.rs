//! Operational hook contracts for conversation recording.

use fcommon::SessionId;

use crate::ChatError;

pub trait RecorderHooks: Send + Sync {
    fn on_record_start(&self, _session_id: &SessionId, _strategy: &'static str) {}

    fn on_messages_persisted(&self, _session_id: &SessionId, _messages: usize) {}

    /// Called when a response had nothing to persist under the active policy.
    fn on_record_skipped(&self, _session_id: &SessionId) {}

    fn on_record_failure(&self, _session_id: &SessionId, _error: &ChatError) {}
}

#[derive(Debug, Default, Clone, Copy)]
pub struct NoopRecorderHooks;

impl RecorderHooks for NoopRecorderHooks {}
