use std::fmt::{Debug, Display};

use async_trait::async_trait;
use uuid::Uuid;

use super::models::{Group, Person};

#[derive(thiserror::Error, Debug)]
pub enum PersonStoreError<T> {
    #[error("unhandled person store provider error: {0}")]
    Provider(#[from] T),
    #[error("person not found: {0}")]
    PersonNotFound(Uuid),
    #[error("group not found: {0}")]
    GroupNotFound(Uuid),
}

/// Persistence contract for people and groups.
///
/// Implementations must preserve UUID identity and round-trip every field.
#[async_trait]
pub trait PersonStoreProvider: Send + Sync + Debug + Clone + 'static {
    type Error: Display + Debug + Send + Sync + 'static;

    async fn add_person(&self, person: Person) -> Result<(), PersonStoreError<Self::Error>>;

    /// Fetch a person by id, failing with `PersonNotFound` when absent.
    async fn get_person(&self, id: Uuid) -> Result<Person, PersonStoreError<Self::Error>>;

    async fn add_group(&self, group: Group) -> Result<(), PersonStoreError<Self::Error>>;

    /// Fetch a group by id, failing with `GroupNotFound` when absent.
    async fn get_group(&self, id: Uuid) -> Result<Group, PersonStoreError<Self::Error>>;

    /// Add a person to a group's membership.
    ///
    /// Must be atomic against concurrent modifications of the same group,
    /// must verify the person exists, and must be idempotent: re-adding an
    /// existing member is a no-op.
    async fn add_member_to_group(
        &self,
        group_id: Uuid,
        person_id: Uuid,
    ) -> Result<(), PersonStoreError<Self::Error>>;

    /// Look up a person by their stable cross-node identifier.
    async fn find_by_global_id(
        &self,
        global_id: &str,
    ) -> Result<Option<Person>, PersonStoreError<Self::Error>>;

    /// Snapshot of every person for the reconciler's matching pass.
    ///
    /// No ordering is guaranteed.
    async fn list_all_for_matching(&self) -> Result<Vec<Person>, PersonStoreError<Self::Error>>;
}
