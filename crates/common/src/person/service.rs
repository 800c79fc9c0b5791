use uuid::Uuid;

use crate::clock::Clock;

use super::models::{Group, Person, PersonMatcher};
use super::provider::{PersonStoreError, PersonStoreProvider};

#[derive(thiserror::Error, Debug)]
pub enum PersonError<T> {
    #[error("invalid person or group: {0}")]
    Validation(String),
    #[error("person store error: {0}")]
    Store(#[from] PersonStoreError<T>),
}

/// Business logic for managing people and groups.
#[derive(Debug, Clone)]
pub struct PersonService<P: PersonStoreProvider> {
    store: P,
    clock: Clock,
}

impl<P: PersonStoreProvider> PersonService<P> {
    pub fn new(store: P, clock: Clock) -> Self {
        Self { store, clock }
    }

    /// Create a person, optionally with a contact handle for cross-node
    /// matching.
    pub async fn create_person(
        &self,
        name: &str,
        handle: Option<String>,
    ) -> Result<Person, PersonError<P::Error>> {
        if name.is_empty() {
            return Err(PersonError::Validation("name cannot be empty".to_string()));
        }
        let person = Person {
            id: Uuid::new_v4(),
            name: name.to_string(),
            global_id: None,
            matcher: PersonMatcher {
                name: name.to_string(),
                handle,
            },
            linked_user_id: None,
            created_at: self.clock.now(),
        };
        self.store.add_person(person.clone()).await?;
        Ok(person)
    }

    /// Create an empty group.
    pub async fn create_group(&self, name: &str) -> Result<Group, PersonError<P::Error>> {
        if name.is_empty() {
            return Err(PersonError::Validation("name cannot be empty".to_string()));
        }
        let group = Group {
            id: Uuid::new_v4(),
            name: name.to_string(),
            member_ids: Vec::new(),
            created_at: self.clock.now(),
        };
        self.store.add_group(group.clone()).await?;
        Ok(group)
    }

    pub async fn add_member_to_group(
        &self,
        group_id: Uuid,
        person_id: Uuid,
    ) -> Result<(), PersonError<P::Error>> {
        Ok(self.store.add_member_to_group(group_id, person_id).await?)
    }

    pub async fn get_person(&self, id: Uuid) -> Result<Person, PersonError<P::Error>> {
        Ok(self.store.get_person(id).await?)
    }

    pub async fn get_group(&self, id: Uuid) -> Result<Group, PersonError<P::Error>> {
        Ok(self.store.get_group(id).await?)
    }
}
