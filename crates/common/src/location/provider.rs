use std::fmt::{Debug, Display};

use async_trait::async_trait;
use uuid::Uuid;

use super::models::Location;

#[derive(thiserror::Error, Debug)]
pub enum LocationStoreError<T> {
    #[error("unhandled location store provider error: {0}")]
    Provider(#[from] T),
    #[error("location not found: {0}")]
    NotFound(Uuid),
}

/// Persistence contract for locations.
///
/// Implementations must preserve UUID identity (document id = entity id as
/// canonical string) and round-trip every field, including unset optionals.
/// Concurrent readers are permitted; writers are serialized per entity.
#[async_trait]
pub trait LocationStoreProvider: Send + Sync + Debug + Clone + 'static {
    type Error: Display + Debug + Send + Sync + 'static;

    async fn add(&self, location: Location) -> Result<(), LocationStoreError<Self::Error>>;

    /// Fetch a location by id, failing with `NotFound` when absent.
    async fn get_by_id(&self, id: Uuid) -> Result<Location, LocationStoreError<Self::Error>>;

    /// All locations owned by the given user.
    async fn list_by_user_id(
        &self,
        user_id: &str,
    ) -> Result<Vec<Location>, LocationStoreError<Self::Error>>;

    /// All publicly shared locations.
    async fn list_shared(&self) -> Result<Vec<Location>, LocationStoreError<Self::Error>>;

    /// Look up a location by its stable cross-node identifier.
    async fn find_by_global_id(
        &self,
        global_id: &str,
    ) -> Result<Option<Location>, LocationStoreError<Self::Error>>;

    /// Snapshot of every location for the reconciler's matching pass.
    ///
    /// No ordering is guaranteed; callers must not depend on iteration
    /// order for tie-breaks.
    async fn list_all_for_matching(
        &self,
    ) -> Result<Vec<Location>, LocationStoreError<Self::Error>>;
}
