//! Conversation storage contracts and a basic in-memory implementation.

use std::collections::HashMap;
use std::sync::Mutex;

use fcommon::{BoxFuture, SessionId};
use fresponse::Message;

use crate::ChatError;

pub trait ConversationStore: Send + Sync {
    fn load_messages<'a>(
        &'a self,
        session_id: &'a SessionId,
    ) -> BoxFuture<'a, Result<Vec<Message>, ChatError>>;

    fn append_messages<'a>(
        &'a self,
        session_id: &'a SessionId,
        messages: Vec<Message>,
    ) -> BoxFuture<'a, Result<(), ChatError>>;
}

#[derive(Debug, Default)]
pub struct InMemoryConversationStore {
    sessions: Mutex<HashMap<SessionId, Vec<Message>>>,
}

impl InMemoryConversationStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains_session(&self, session_id: &SessionId) -> bool {
        self.sessions
            .lock()
            .map(|sessions| sessions.contains_key(session_id))
            .unwrap_or(false)
    }
}

impl ConversationStore for InMemoryConversationStore {
    fn load_messages<'a>(
        &'a self,
        session_id: &'a SessionId,
    ) -> BoxFuture<'a, Result<Vec<Message>, ChatError>> {
        Box::pin(async move {
            let sessions = self
                .sessions
                .lock()
                .map_err(|_| ChatError::store("conversation store lock poisoned"))?;

            Ok(sessions.get(session_id).cloned().unwrap_or_default())
        })
    }

    fn append_messages<'a>(
        &'a self,
        session_id: &'a SessionId,
        messages: Vec<Message>,
    ) -> BoxFuture<'a, Result<(), ChatError>> {
        Box::pin(async move {
            let mut sessions = self
                .sessions
                .lock()
                .map_err(|_| ChatError::store("conversation store lock poisoned"))?;

            sessions
                .entry(session_id.clone())
                .or_default()
                .extend(messages);

            Ok(())
        })
    }
}

#[cfg(test)]
mod tests {
    use fresponse::Role;

    use super::*;

    #[tokio::test]
    async fn appends_accumulate_per_session() {
        let store = InMemoryConversationStore::new();
        let first = SessionId::from("s1");
        let second = SessionId::from("s2");

        store
            .append_messages(&first, vec![Message::new(Role::User, "hi")])
            .await
            .expect("append should succeed");
        store
            .append_messages(&first, vec![Message::new(Role::Assistant, "hello")])
            .await
            .expect("append should succeed");

        let history = store.load_messages(&first).await.expect("load should succeed");
        assert_eq!(history.len(), 2);
        assert_eq!(history[1].text(), "hello");
        assert!(
            store
                .load_messages(&second)
                .await
                .expect("load should succeed")
                .is_empty()
        );
        assert!(!store.contains_session(&second));
    }
}
