use std::fmt::{Debug, Display};

use async_trait::async_trait;
use time::OffsetDateTime;
use uuid::Uuid;

use super::models::Intention;

/// Query parameters for intention lookups.
///
/// Unset filters match everything; set filters are conjoined.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct QuerySpec {
    /// Match intentions created by this user.
    pub user: Option<String>,
    /// Match intentions whose time window contains this instant.
    pub active_at: Option<OffsetDateTime>,
}

#[derive(thiserror::Error, Debug)]
pub enum IntentionStoreError<T> {
    #[error("unhandled intention store provider error: {0}")]
    Provider(#[from] T),
    #[error("intention not found: {0}")]
    NotFound(Uuid),
}

/// Persistence contract for intentions.
#[async_trait]
pub trait IntentionStoreProvider: Send + Sync + Debug + Clone + 'static {
    type Error: Display + Debug + Send + Sync + 'static;

    async fn add(&self, intention: Intention) -> Result<(), IntentionStoreError<Self::Error>>;

    /// Fetch an intention by id, failing with `NotFound` when absent.
    async fn get_by_id(&self, id: Uuid) -> Result<Intention, IntentionStoreError<Self::Error>>;

    /// Retrieve intentions matching the spec.
    async fn query(
        &self,
        spec: QuerySpec,
    ) -> Result<Vec<Intention>, IntentionStoreError<Self::Error>>;
}
