//! The reconciliation engine.
//!
//! Maps the entities of an incoming [`SharedPayload`] onto the local graph
//! by stable global id first and fuzzy matcher second. The reconciler only
//! reads: deciding what to do with unmapped foreign entities is the
//! caller's business.

use std::collections::HashMap;

use uuid::Uuid;

use crate::location::{Location, LocationMatcher, LocationStoreProvider};
use crate::matching::MatchConfidence;
use crate::person::{Person, PersonMatcher, PersonStoreProvider};
use crate::sharing::SharedPayload;

/// Foreign-id to local-id mappings established for one payload.
///
/// A foreign id is present only when a local match was found. Groups are
/// private constructs and are not reconciled.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MappingResult {
    pub location_mappings: HashMap<Uuid, Uuid>,
    pub person_mappings: HashMap<Uuid, Uuid>,
}

#[derive(thiserror::Error, Debug)]
pub enum ReconcileError {
    #[error("location store failed during reconciliation: {0}")]
    LocationStore(String),
    #[error("person store failed during reconciliation: {0}")]
    PersonStore(String),
}

/// Two-phase reconciler over the local location and person stores.
#[derive(Debug, Clone)]
pub struct Reconciler<L, P> {
    locations: L,
    people: P,
}

impl<L, P> Reconciler<L, P>
where
    L: LocationStoreProvider,
    P: PersonStoreProvider,
{
    pub fn new(locations: L, people: P) -> Self {
        Self { locations, people }
    }

    /// Map the payload's locations and people onto local entities.
    ///
    /// Local entities are snapshotted once via `list_all_for_matching`;
    /// writes that land during reconciliation are not observed. Ties
    /// between equally-confident candidates are broken by store iteration
    /// order, which is unspecified.
    pub async fn process_payload(
        &self,
        payload: &SharedPayload,
    ) -> Result<MappingResult, ReconcileError> {
        let mut result = MappingResult::default();

        let local_locations = self
            .locations
            .list_all_for_matching()
            .await
            .map_err(|e| ReconcileError::LocationStore(e.to_string()))?;
        tracing::debug!(count = local_locations.len(), "loaded local locations for matching");

        for (key, incoming) in &payload.locations {
            let Some(foreign_id) = parse_payload_key(key) else {
                continue;
            };

            let mut matched: Option<Uuid> = None;
            if let Some(global_id) = &incoming.global_id {
                matched = self
                    .locations
                    .find_by_global_id(global_id)
                    .await
                    .map_err(|e| ReconcileError::LocationStore(e.to_string()))?
                    .map(|local| local.id);
            }
            if matched.is_none() {
                matched = best_location_match(&incoming.matcher, &local_locations);
            }

            match matched {
                Some(local_id) => {
                    tracing::debug!(foreign = %foreign_id, local = %local_id, "mapped incoming location");
                    result.location_mappings.insert(foreign_id, local_id);
                }
                None => {
                    tracing::debug!(foreign = %foreign_id, "no match for incoming location");
                }
            }
        }

        let local_people = self
            .people
            .list_all_for_matching()
            .await
            .map_err(|e| ReconcileError::PersonStore(e.to_string()))?;
        tracing::debug!(count = local_people.len(), "loaded local people for matching");

        for (key, incoming) in &payload.people {
            let Some(foreign_id) = parse_payload_key(key) else {
                continue;
            };

            let mut matched: Option<Uuid> = None;
            if let Some(global_id) = &incoming.global_id {
                matched = self
                    .people
                    .find_by_global_id(global_id)
                    .await
                    .map_err(|e| ReconcileError::PersonStore(e.to_string()))?
                    .map(|local| local.id);
            }
            if matched.is_none() {
                matched = best_person_match(&incoming.matcher, &local_people);
            }

            match matched {
                Some(local_id) => {
                    tracing::debug!(foreign = %foreign_id, local = %local_id, "mapped incoming person");
                    result.person_mappings.insert(foreign_id, local_id);
                }
                None => {
                    tracing::debug!(foreign = %foreign_id, "no match for incoming person");
                }
            }
        }

        Ok(result)
    }
}

/// Payload map keys are the sender's UUIDs as strings; a key that does not
/// parse is the sender's bug, not ours, and is skipped.
fn parse_payload_key(key: &str) -> Option<Uuid> {
    match Uuid::parse_str(key) {
        Ok(id) => Some(id),
        Err(_) => {
            tracing::warn!(key, "skipping payload entry with malformed key");
            None
        }
    }
}

/// First `Exact` match wins and short-circuits; the first `Possible` match
/// is retained as a fallback.
fn best_location_match(matcher: &LocationMatcher, locals: &[Location]) -> Option<Uuid> {
    let mut possible: Option<Uuid> = None;
    for local in locals {
        match matcher.matches(local) {
            MatchConfidence::Exact => return Some(local.id),
            MatchConfidence::Possible if possible.is_none() => possible = Some(local.id),
            _ => {}
        }
    }
    possible
}

fn best_person_match(matcher: &PersonMatcher, locals: &[Person]) -> Option<Uuid> {
    let mut possible: Option<Uuid> = None;
    for local in locals {
        match matcher.matches(local) {
            MatchConfidence::Exact => return Some(local.id),
            MatchConfidence::Possible if possible.is_none() => possible = Some(local.id),
            _ => {}
        }
    }
    possible
}
