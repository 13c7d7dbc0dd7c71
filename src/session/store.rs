//! Keyed session persistence
//!
//! The engine never touches storage; the runtime loads and saves through this
//! trait so hosts can swap the backing technology.

use super::Session;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::RwLock;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Session for {conversation_id} could not be encoded: {source}")]
    Encode {
        conversation_id: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("Session record for {conversation_id} is unreadable: {message}")]
    Corrupt {
        conversation_id: String,
        message: String,
    },
}

/// Storage for per-conversation sessions
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Read the session for a conversation, if one exists
    async fn load(&self, conversation_id: &str) -> Result<Option<Session>, StoreError>;

    /// Replace the session for a conversation
    async fn save(&self, conversation_id: &str, session: &Session) -> Result<(), StoreError>;

    /// Forget a conversation
    async fn remove(&self, conversation_id: &str) -> Result<(), StoreError>;
}

#[async_trait]
impl<T: SessionStore + ?Sized> SessionStore for Arc<T> {
    async fn load(&self, conversation_id: &str) -> Result<Option<Session>, StoreError> {
        (**self).load(conversation_id).await
    }

    async fn save(&self, conversation_id: &str, session: &Session) -> Result<(), StoreError> {
        (**self).save(conversation_id, session).await
    }

    async fn remove(&self, conversation_id: &str) -> Result<(), StoreError> {
        (**self).remove(conversation_id).await
    }
}

/// Process-local store; sessions vanish on restart.
///
/// Records are kept as JSON so a session round-trips through the same
/// encoding a shared backend would use.
#[derive(Debug, Default)]
pub struct InMemorySessionStore {
    records: RwLock<HashMap<String, String>>,
}

impl InMemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[cfg(test)]
impl InMemorySessionStore {
    pub async fn len(&self) -> usize {
        self.records.read().await.len()
    }

    /// Store a raw record as-is, bypassing encoding
    pub async fn insert_raw(&self, conversation_id: &str, record: &str) {
        self.records
            .write()
            .await
            .insert(conversation_id.to_string(), record.to_string());
    }
}

#[async_trait]
impl SessionStore for InMemorySessionStore {
    async fn load(&self, conversation_id: &str) -> Result<Option<Session>, StoreError> {
        let records = self.records.read().await;
        let Some(record) = records.get(conversation_id) else {
            return Ok(None);
        };
        serde_json::from_str(record)
            .map(Some)
            .map_err(|e| StoreError::Corrupt {
                conversation_id: conversation_id.to_string(),
                message: e.to_string(),
            })
    }

    async fn save(&self, conversation_id: &str, session: &Session) -> Result<(), StoreError> {
        let record = serde_json::to_string(session).map_err(|source| StoreError::Encode {
            conversation_id: conversation_id.to_string(),
            source,
        })?;
        self.records
            .write()
            .await
            .insert(conversation_id.to_string(), record);
        Ok(())
    }

    async fn remove(&self, conversation_id: &str) -> Result<(), StoreError> {
        self.records.write().await.remove(conversation_id);
        Ok(())
    }
}
