use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use async_trait::async_trait;
use uuid::Uuid;

use super::models::{Group, Person};
use super::provider::{PersonStoreError, PersonStoreProvider};

/// In-memory person and group store.
///
/// A single reader-writer lock guards both maps; `add_member_to_group`
/// performs its read-modify-write under one write guard, which makes the
/// membership update atomic.
#[derive(Debug, Clone, Default)]
pub struct MemoryPersonStore {
    inner: Arc<RwLock<MemoryPersonStoreInner>>,
}

#[derive(Debug, Default)]
struct MemoryPersonStoreInner {
    people: HashMap<Uuid, Person>,
    groups: HashMap<Uuid, Group>,
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum MemoryPersonStoreError {
    #[error("memory store error: {0}")]
    Internal(String),
}

impl MemoryPersonStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl PersonStoreProvider for MemoryPersonStore {
    type Error = MemoryPersonStoreError;

    async fn add_person(&self, person: Person) -> Result<(), PersonStoreError<Self::Error>> {
        let mut inner = self.inner.write().map_err(|e| {
            PersonStoreError::Provider(MemoryPersonStoreError::Internal(format!(
                "failed to acquire write lock: {e}"
            )))
        })?;
        inner.people.insert(person.id, person);
        Ok(())
    }

    async fn get_person(&self, id: Uuid) -> Result<Person, PersonStoreError<Self::Error>> {
        let inner = self.inner.read().map_err(|e| {
            PersonStoreError::Provider(MemoryPersonStoreError::Internal(format!(
                "failed to acquire read lock: {e}"
            )))
        })?;
        inner
            .people
            .get(&id)
            .cloned()
            .ok_or(PersonStoreError::PersonNotFound(id))
    }

    async fn add_group(&self, group: Group) -> Result<(), PersonStoreError<Self::Error>> {
        let mut inner = self.inner.write().map_err(|e| {
            PersonStoreError::Provider(MemoryPersonStoreError::Internal(format!(
                "failed to acquire write lock: {e}"
            )))
        })?;
        inner.groups.insert(group.id, group);
        Ok(())
    }

    async fn get_group(&self, id: Uuid) -> Result<Group, PersonStoreError<Self::Error>> {
        let inner = self.inner.read().map_err(|e| {
            PersonStoreError::Provider(MemoryPersonStoreError::Internal(format!(
                "failed to acquire read lock: {e}"
            )))
        })?;
        inner
            .groups
            .get(&id)
            .cloned()
            .ok_or(PersonStoreError::GroupNotFound(id))
    }

    async fn add_member_to_group(
        &self,
        group_id: Uuid,
        person_id: Uuid,
    ) -> Result<(), PersonStoreError<Self::Error>> {
        let mut inner = self.inner.write().map_err(|e| {
            PersonStoreError::Provider(MemoryPersonStoreError::Internal(format!(
                "failed to acquire write lock: {e}"
            )))
        })?;
        if !inner.people.contains_key(&person_id) {
            return Err(PersonStoreError::PersonNotFound(person_id));
        }
        let group = inner
            .groups
            .get_mut(&group_id)
            .ok_or(PersonStoreError::GroupNotFound(group_id))?;
        if !group.member_ids.contains(&person_id) {
            group.member_ids.push(person_id);
        }
        Ok(())
    }

    async fn find_by_global_id(
        &self,
        global_id: &str,
    ) -> Result<Option<Person>, PersonStoreError<Self::Error>> {
        let inner = self.inner.read().map_err(|e| {
            PersonStoreError::Provider(MemoryPersonStoreError::Internal(format!(
                "failed to acquire read lock: {e}"
            )))
        })?;
        Ok(inner
            .people
            .values()
            .find(|p| p.global_id.as_deref() == Some(global_id))
            .cloned())
    }

    async fn list_all_for_matching(&self) -> Result<Vec<Person>, PersonStoreError<Self::Error>> {
        let inner = self.inner.read().map_err(|e| {
            PersonStoreError::Provider(MemoryPersonStoreError::Internal(format!(
                "failed to acquire read lock: {e}"
            )))
        })?;
        Ok(inner.people.values().cloned().collect())
    }
}
