use std::collections::HashMap;

use uuid::Uuid;

use crate::intention::{IntentionStoreError, IntentionStoreProvider, Target};
use crate::location::{LocationStoreError, LocationStoreProvider};
use crate::person::{PersonStoreError, PersonStoreProvider};

use super::payload::SharedPayload;

#[derive(thiserror::Error, Debug)]
pub enum PayloadError {
    #[error("intention not found: {0}")]
    IntentionNotFound(Uuid),
    #[error("store error while gathering payload: {0}")]
    Store(String),
}

/// Gathers the sub-graph reachable from one intention into a
/// [`SharedPayload`].
///
/// Gathering is best-effort: an entity that has gone missing since the
/// intention was created is logged and skipped, and the payload is still
/// emitted. The builder never writes to the stores.
#[derive(Debug, Clone)]
pub struct PayloadBuilder<I, L, P> {
    intentions: I,
    locations: L,
    people: P,
}

impl<I, L, P> PayloadBuilder<I, L, P>
where
    I: IntentionStoreProvider,
    L: LocationStoreProvider,
    P: PersonStoreProvider,
{
    pub fn new(intentions: I, locations: L, people: P) -> Self {
        Self {
            intentions,
            locations,
            people,
        }
    }

    /// Build the payload for `intention_id`.
    ///
    /// # Errors
    ///
    /// Fails with `IntentionNotFound` when the intention itself is absent;
    /// store failures other than per-entity absence are surfaced as
    /// `Store`.
    pub async fn build(&self, intention_id: Uuid) -> Result<SharedPayload, PayloadError> {
        let intention = match self.intentions.get_by_id(intention_id).await {
            Ok(intention) => intention,
            Err(IntentionStoreError::NotFound(id)) => {
                return Err(PayloadError::IntentionNotFound(id))
            }
            Err(e) => return Err(PayloadError::Store(e.to_string())),
        };

        let mut locations = HashMap::new();
        let mut people = HashMap::new();
        let mut groups = HashMap::new();

        for target in &intention.targets {
            match target {
                Target::Location { location_id } => {
                    match self.locations.get_by_id(*location_id).await {
                        Ok(location) => {
                            locations.insert(location.id.to_string(), location);
                        }
                        Err(LocationStoreError::NotFound(id)) => {
                            tracing::warn!(
                                location_id = %id,
                                "location referenced by intention is missing, skipping"
                            );
                        }
                        Err(e) => return Err(PayloadError::Store(e.to_string())),
                    }
                }
                Target::Proximity {
                    person_ids,
                    group_ids,
                } => {
                    for person_id in person_ids {
                        self.gather_person(*person_id, &mut people).await?;
                    }
                    for group_id in group_ids {
                        match self.people.get_group(*group_id).await {
                            Ok(group) => {
                                // Members ride along so the recipient can
                                // reconcile them; the group keeps its full
                                // member list even when some are missing.
                                for member_id in &group.member_ids {
                                    self.gather_person(*member_id, &mut people).await?;
                                }
                                groups.insert(group.id.to_string(), group);
                            }
                            Err(PersonStoreError::GroupNotFound(id)) => {
                                tracing::warn!(
                                    group_id = %id,
                                    "group referenced by intention is missing, skipping"
                                );
                            }
                            Err(e) => return Err(PayloadError::Store(e.to_string())),
                        }
                    }
                }
            }
        }

        Ok(SharedPayload {
            intention,
            locations,
            people,
            groups,
        })
    }

    async fn gather_person(
        &self,
        person_id: Uuid,
        people: &mut HashMap<String, crate::person::Person>,
    ) -> Result<(), PayloadError> {
        match self.people.get_person(person_id).await {
            Ok(person) => {
                people.insert(person.id.to_string(), person);
                Ok(())
            }
            Err(PersonStoreError::PersonNotFound(id)) => {
                tracing::warn!(
                    person_id = %id,
                    "person referenced by intention is missing, skipping"
                );
                Ok(())
            }
            Err(e) => Err(PayloadError::Store(e.to_string())),
        }
    }
}

#[cfg(test)]
mod test {
    use time::macros::datetime;

    use crate::clock::Clock;
    use crate::intention::{IntentionService, MemoryIntentionStore};
    use crate::location::{LocationService, MemoryLocationStore};
    use crate::person::{MemoryPersonStore, PersonService};

    use super::*;

    struct Fixture {
        intentions: IntentionService<MemoryIntentionStore>,
        locations: LocationService<MemoryLocationStore>,
        people: PersonService<MemoryPersonStore>,
        builder: PayloadBuilder<MemoryIntentionStore, MemoryLocationStore, MemoryPersonStore>,
    }

    fn fixture() -> Fixture {
        let clock = Clock::fixed(datetime!(2025-06-01 12:00:00 UTC));
        let intention_store = MemoryIntentionStore::new();
        let location_store = MemoryLocationStore::new();
        let person_store = MemoryPersonStore::new();
        Fixture {
            intentions: IntentionService::new(intention_store.clone(), clock.clone()),
            locations: LocationService::new(location_store.clone(), clock.clone()),
            people: PersonService::new(person_store.clone(), clock),
            builder: PayloadBuilder::new(intention_store, location_store, person_store),
        }
    }

    #[tokio::test]
    async fn gathers_location_and_proximity_closure() {
        let fx = fixture();
        let cafe = fx
            .locations
            .add_user_location("alice", "Cafe", "Cafe", None)
            .await
            .unwrap();
        let bob = fx.people.create_person("Bob", None).await.unwrap();
        let carol = fx.people.create_person("Carol", None).await.unwrap();
        let group = fx.people.create_group("Friends").await.unwrap();
        fx.people.add_member_to_group(group.id, carol.id).await.unwrap();

        let intent = fx
            .intentions
            .add_intention(
                "alice",
                Vec::new(),
                "Get coffee",
                vec![
                    Target::Location {
                        location_id: cafe.id,
                    },
                    Target::Proximity {
                        person_ids: vec![bob.id],
                        group_ids: vec![group.id],
                    },
                ],
                datetime!(2025-06-01 12:00:00 UTC),
                datetime!(2025-06-01 13:00:00 UTC),
            )
            .await
            .unwrap();

        let payload = fx.builder.build(intent.id).await.unwrap();

        assert_eq!(payload.intention.id, intent.id);
        assert!(payload.locations.contains_key(&cafe.id.to_string()));
        // explicit person plus the group member
        assert!(payload.people.contains_key(&bob.id.to_string()));
        assert!(payload.people.contains_key(&carol.id.to_string()));
        assert!(payload.groups.contains_key(&group.id.to_string()));
    }

    #[tokio::test]
    async fn missing_intention_fails() {
        let fx = fixture();
        let id = Uuid::new_v4();

        let err = fx.builder.build(id).await.unwrap_err();
        assert!(matches!(err, PayloadError::IntentionNotFound(missing) if missing == id));
    }

    #[tokio::test]
    async fn missing_location_is_skipped() {
        let fx = fixture();
        let intent = fx
            .intentions
            .add_intention(
                "alice",
                Vec::new(),
                "Visit",
                vec![Target::Location {
                    location_id: Uuid::new_v4(),
                }],
                datetime!(2025-06-01 12:00:00 UTC),
                datetime!(2025-06-01 13:00:00 UTC),
            )
            .await
            .unwrap();

        let payload = fx.builder.build(intent.id).await.unwrap();

        assert!(payload.locations.is_empty());
    }

    #[tokio::test]
    async fn group_with_missing_member_keeps_full_member_list() {
        let fx = fixture();
        let carol = fx.people.create_person("Carol", None).await.unwrap();
        let group = fx.people.create_group("Friends").await.unwrap();
        fx.people.add_member_to_group(group.id, carol.id).await.unwrap();

        // A member id that no longer resolves: inject it directly into the
        // stored group to simulate a dangling reference.
        let ghost = Uuid::new_v4();
        let mut stale = fx.people.get_group(group.id).await.unwrap();
        stale.member_ids.push(ghost);
        let store = fx.builder.people.clone();
        store.add_group(stale).await.unwrap();

        let intent = fx
            .intentions
            .add_intention(
                "alice",
                Vec::new(),
                "Hang out",
                vec![Target::Proximity {
                    person_ids: Vec::new(),
                    group_ids: vec![group.id],
                }],
                datetime!(2025-06-01 12:00:00 UTC),
                datetime!(2025-06-01 13:00:00 UTC),
            )
            .await
            .unwrap();

        let payload = fx.builder.build(intent.id).await.unwrap();

        let shared_group = payload.groups.get(&group.id.to_string()).unwrap();
        assert_eq!(shared_group.member_ids, vec![carol.id, ghost]);
        assert!(payload.people.contains_key(&carol.id.to_string()));
        assert!(!payload.people.contains_key(&ghost.to_string()));
    }
}
