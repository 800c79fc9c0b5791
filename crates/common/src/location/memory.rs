use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use async_trait::async_trait;
use uuid::Uuid;

use super::models::{Location, LocationKind};
use super::provider::{LocationStoreError, LocationStoreProvider};

/// In-memory location store backed by a `HashMap`.
///
/// The reference adapter for tests and single-process deployments; a
/// single reader-writer lock serializes writers.
#[derive(Debug, Clone, Default)]
pub struct MemoryLocationStore {
    inner: Arc<RwLock<HashMap<Uuid, Location>>>,
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum MemoryLocationStoreError {
    #[error("memory store error: {0}")]
    Internal(String),
}

impl MemoryLocationStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl LocationStoreProvider for MemoryLocationStore {
    type Error = MemoryLocationStoreError;

    async fn add(&self, location: Location) -> Result<(), LocationStoreError<Self::Error>> {
        let mut inner = self.inner.write().map_err(|e| {
            LocationStoreError::Provider(MemoryLocationStoreError::Internal(format!(
                "failed to acquire write lock: {e}"
            )))
        })?;
        inner.insert(location.id, location);
        Ok(())
    }

    async fn get_by_id(&self, id: Uuid) -> Result<Location, LocationStoreError<Self::Error>> {
        let inner = self.inner.read().map_err(|e| {
            LocationStoreError::Provider(MemoryLocationStoreError::Internal(format!(
                "failed to acquire read lock: {e}"
            )))
        })?;
        inner
            .get(&id)
            .cloned()
            .ok_or(LocationStoreError::NotFound(id))
    }

    async fn list_by_user_id(
        &self,
        user_id: &str,
    ) -> Result<Vec<Location>, LocationStoreError<Self::Error>> {
        let inner = self.inner.read().map_err(|e| {
            LocationStoreError::Provider(MemoryLocationStoreError::Internal(format!(
                "failed to acquire read lock: {e}"
            )))
        })?;
        Ok(inner
            .values()
            .filter(|l| l.owner_id.as_deref() == Some(user_id))
            .cloned()
            .collect())
    }

    async fn list_shared(&self) -> Result<Vec<Location>, LocationStoreError<Self::Error>> {
        let inner = self.inner.read().map_err(|e| {
            LocationStoreError::Provider(MemoryLocationStoreError::Internal(format!(
                "failed to acquire read lock: {e}"
            )))
        })?;
        Ok(inner
            .values()
            .filter(|l| l.kind == LocationKind::Shared)
            .cloned()
            .collect())
    }

    async fn find_by_global_id(
        &self,
        global_id: &str,
    ) -> Result<Option<Location>, LocationStoreError<Self::Error>> {
        let inner = self.inner.read().map_err(|e| {
            LocationStoreError::Provider(MemoryLocationStoreError::Internal(format!(
                "failed to acquire read lock: {e}"
            )))
        })?;
        Ok(inner
            .values()
            .find(|l| l.global_id.as_deref() == Some(global_id))
            .cloned())
    }

    async fn list_all_for_matching(
        &self,
    ) -> Result<Vec<Location>, LocationStoreError<Self::Error>> {
        let inner = self.inner.read().map_err(|e| {
            LocationStoreError::Provider(MemoryLocationStoreError::Internal(format!(
                "failed to acquire read lock: {e}"
            )))
        })?;
        Ok(inner.values().cloned().collect())
    }
}

#[cfg(test)]
mod test {
    use time::macros::datetime;

    use super::super::models::LocationMatcher;
    use super::*;

    fn location(name: &str, kind: LocationKind, owner: Option<&str>) -> Location {
        Location {
            id: Uuid::new_v4(),
            name: name.to_string(),
            category: "Cafe".to_string(),
            global_id: None,
            matcher: LocationMatcher {
                name: name.to_string(),
                category: "Cafe".to_string(),
                lat: None,
                lon: None,
            },
            kind,
            owner_id: owner.map(str::to_string),
            created_at: datetime!(2025-06-01 12:00:00 UTC),
        }
    }

    #[tokio::test]
    async fn add_and_get_roundtrip() {
        let store = MemoryLocationStore::new();
        let loc = location("Cafe", LocationKind::User, Some("alice"));

        store.add(loc.clone()).await.unwrap();
        let fetched = store.get_by_id(loc.id).await.unwrap();

        assert_eq!(fetched, loc);
    }

    #[tokio::test]
    async fn get_missing_is_not_found() {
        let store = MemoryLocationStore::new();
        let id = Uuid::new_v4();

        let err = store.get_by_id(id).await.unwrap_err();
        assert!(matches!(err, LocationStoreError::NotFound(missing) if missing == id));
    }

    #[tokio::test]
    async fn list_by_user_filters_owner() {
        let store = MemoryLocationStore::new();
        store
            .add(location("Home", LocationKind::User, Some("alice")))
            .await
            .unwrap();
        store
            .add(location("Office", LocationKind::User, Some("bob")))
            .await
            .unwrap();

        let mine = store.list_by_user_id("alice").await.unwrap();
        assert_eq!(mine.len(), 1);
        assert_eq!(mine[0].name, "Home");
    }

    #[tokio::test]
    async fn list_shared_filters_kind() {
        let store = MemoryLocationStore::new();
        store
            .add(location("Home", LocationKind::User, Some("alice")))
            .await
            .unwrap();
        store
            .add(location("Park", LocationKind::Shared, None))
            .await
            .unwrap();

        let shared = store.list_shared().await.unwrap();
        assert_eq!(shared.len(), 1);
        assert_eq!(shared[0].name, "Park");
    }

    #[tokio::test]
    async fn find_by_global_id_matches_exactly() {
        let store = MemoryLocationStore::new();
        let mut park = location("Park", LocationKind::Shared, None);
        park.global_id = Some("g-park".to_string());
        store.add(park.clone()).await.unwrap();

        let found = store.find_by_global_id("g-park").await.unwrap();
        assert_eq!(found.map(|l| l.id), Some(park.id));

        let missing = store.find_by_global_id("g-other").await.unwrap();
        assert!(missing.is_none());
    }

    #[tokio::test]
    async fn list_all_returns_everything() {
        let store = MemoryLocationStore::new();
        store
            .add(location("Home", LocationKind::User, Some("alice")))
            .await
            .unwrap();
        store
            .add(location("Park", LocationKind::Shared, None))
            .await
            .unwrap();

        let all = store.list_all_for_matching().await.unwrap();
        assert_eq!(all.len(), 2);
    }
}
