use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use async_trait::async_trait;
use uuid::Uuid;

use super::models::Intention;
use super::provider::{IntentionStoreError, IntentionStoreProvider, QuerySpec};

/// In-memory intention store backed by a `HashMap`.
#[derive(Debug, Clone, Default)]
pub struct MemoryIntentionStore {
    inner: Arc<RwLock<HashMap<Uuid, Intention>>>,
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum MemoryIntentionStoreError {
    #[error("memory store error: {0}")]
    Internal(String),
}

impl MemoryIntentionStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl IntentionStoreProvider for MemoryIntentionStore {
    type Error = MemoryIntentionStoreError;

    async fn add(&self, intention: Intention) -> Result<(), IntentionStoreError<Self::Error>> {
        let mut inner = self.inner.write().map_err(|e| {
            IntentionStoreError::Provider(MemoryIntentionStoreError::Internal(format!(
                "failed to acquire write lock: {e}"
            )))
        })?;
        inner.insert(intention.id, intention);
        Ok(())
    }

    async fn get_by_id(&self, id: Uuid) -> Result<Intention, IntentionStoreError<Self::Error>> {
        let inner = self.inner.read().map_err(|e| {
            IntentionStoreError::Provider(MemoryIntentionStoreError::Internal(format!(
                "failed to acquire read lock: {e}"
            )))
        })?;
        inner
            .get(&id)
            .cloned()
            .ok_or(IntentionStoreError::NotFound(id))
    }

    async fn query(
        &self,
        spec: QuerySpec,
    ) -> Result<Vec<Intention>, IntentionStoreError<Self::Error>> {
        let inner = self.inner.read().map_err(|e| {
            IntentionStoreError::Provider(MemoryIntentionStoreError::Internal(format!(
                "failed to acquire read lock: {e}"
            )))
        })?;
        Ok(inner
            .values()
            .filter(|intention| {
                if let Some(user) = &spec.user {
                    if &intention.user != user {
                        return false;
                    }
                }
                if let Some(at) = spec.active_at {
                    if at < intention.start_time || at > intention.end_time {
                        return false;
                    }
                }
                true
            })
            .cloned()
            .collect())
    }
}
