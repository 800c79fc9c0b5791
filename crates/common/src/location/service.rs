use uuid::Uuid;

use crate::clock::Clock;

use super::models::{Location, LocationKind, LocationMatcher};
use super::provider::{LocationStoreError, LocationStoreProvider};

#[derive(thiserror::Error, Debug)]
pub enum LocationError<T> {
    #[error("invalid location: {0}")]
    Validation(String),
    #[error("location store error: {0}")]
    Store(#[from] LocationStoreError<T>),
}

/// Business logic for managing locations.
#[derive(Debug, Clone)]
pub struct LocationService<P: LocationStoreProvider> {
    store: P,
    clock: Clock,
}

impl<P: LocationStoreProvider> LocationService<P> {
    pub fn new(store: P, clock: Clock) -> Self {
        Self { store, clock }
    }

    /// Create a location private to `owner_id`.
    ///
    /// Coordinates, when known, feed the matcher used for cross-node
    /// reconciliation.
    pub async fn add_user_location(
        &self,
        owner_id: &str,
        name: &str,
        category: &str,
        coordinates: Option<(f64, f64)>,
    ) -> Result<Location, LocationError<P::Error>> {
        if owner_id.is_empty() {
            return Err(LocationError::Validation("owner cannot be empty".to_string()));
        }
        let location = self.new_location(
            name,
            category,
            None,
            LocationKind::User,
            Some(owner_id.to_string()),
            coordinates,
        )?;
        self.store.add(location.clone()).await?;
        Ok(location)
    }

    /// Create a publicly shared location, optionally carrying a stable
    /// cross-node global id.
    pub async fn add_shared_location(
        &self,
        name: &str,
        category: &str,
        global_id: Option<String>,
        coordinates: Option<(f64, f64)>,
    ) -> Result<Location, LocationError<P::Error>> {
        let location =
            self.new_location(name, category, global_id, LocationKind::Shared, None, coordinates)?;
        self.store.add(location.clone()).await?;
        Ok(location)
    }

    pub async fn get(&self, id: Uuid) -> Result<Location, LocationError<P::Error>> {
        Ok(self.store.get_by_id(id).await?)
    }

    pub async fn list_for_user(&self, user_id: &str) -> Result<Vec<Location>, LocationError<P::Error>> {
        Ok(self.store.list_by_user_id(user_id).await?)
    }

    pub async fn list_shared(&self) -> Result<Vec<Location>, LocationError<P::Error>> {
        Ok(self.store.list_shared().await?)
    }

    fn new_location(
        &self,
        name: &str,
        category: &str,
        global_id: Option<String>,
        kind: LocationKind,
        owner_id: Option<String>,
        coordinates: Option<(f64, f64)>,
    ) -> Result<Location, LocationError<P::Error>> {
        if name.is_empty() {
            return Err(LocationError::Validation("name cannot be empty".to_string()));
        }
        Ok(Location {
            id: Uuid::new_v4(),
            name: name.to_string(),
            category: category.to_string(),
            global_id,
            matcher: LocationMatcher {
                name: name.to_string(),
                category: category.to_string(),
                lat: coordinates.map(|c| c.0),
                lon: coordinates.map(|c| c.1),
            },
            kind,
            owner_id,
            created_at: self.clock.now(),
        })
    }
}
