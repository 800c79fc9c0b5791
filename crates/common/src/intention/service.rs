use time::OffsetDateTime;
use uuid::Uuid;

use crate::clock::Clock;

use super::models::{Intention, Target};
use super::provider::{IntentionStoreError, IntentionStoreProvider, QuerySpec};

#[derive(thiserror::Error, Debug)]
pub enum IntentionError<T> {
    #[error("invalid intention: {0}")]
    Validation(String),
    #[error("intention store error: {0}")]
    Store(#[from] IntentionStoreError<T>),
}

/// Business logic for managing intentions.
#[derive(Debug, Clone)]
pub struct IntentionService<P: IntentionStoreProvider> {
    store: P,
    clock: Clock,
}

impl<P: IntentionStoreProvider> IntentionService<P> {
    pub fn new(store: P, clock: Clock) -> Self {
        Self { store, clock }
    }

    /// Validate and persist a new intention.
    pub async fn add_intention(
        &self,
        user: &str,
        participants: Vec<String>,
        action: &str,
        targets: Vec<Target>,
        start_time: OffsetDateTime,
        end_time: OffsetDateTime,
    ) -> Result<Intention, IntentionError<P::Error>> {
        if user.is_empty() {
            return Err(IntentionError::Validation("user cannot be empty".to_string()));
        }
        if action.is_empty() {
            return Err(IntentionError::Validation("action cannot be empty".to_string()));
        }
        if end_time < start_time {
            return Err(IntentionError::Validation(
                "end time cannot be before start time".to_string(),
            ));
        }
        if targets.is_empty() {
            return Err(IntentionError::Validation(
                "at least one target is required".to_string(),
            ));
        }

        let intention = Intention {
            id: Uuid::new_v4(),
            user: user.to_string(),
            participants,
            action: action.to_string(),
            targets,
            start_time,
            end_time,
            created_at: self.clock.now(),
        };
        self.store.add(intention.clone()).await?;
        Ok(intention)
    }

    pub async fn get(&self, id: Uuid) -> Result<Intention, IntentionError<P::Error>> {
        Ok(self.store.get_by_id(id).await?)
    }

    /// What is this user up to right now?
    pub async fn active_for_user(&self, user: &str) -> Result<Vec<Intention>, IntentionError<P::Error>> {
        let spec = QuerySpec {
            user: Some(user.to_string()),
            active_at: Some(self.clock.now()),
        };
        Ok(self.store.query(spec).await?)
    }
}
