use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::intention::Intention;
use crate::location::Location;
use crate::person::{Group, Person};

/// A self-contained, portable representation of one intention and every
/// location, person, and group the recipient needs to interpret it.
///
/// Map keys are the sender's entity ids as canonical UUID strings; that
/// string form is the wire format and the internal representation at this
/// boundary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SharedPayload {
    pub intention: Intention,
    #[serde(default)]
    pub locations: HashMap<String, Location>,
    #[serde(default)]
    pub people: HashMap<String, Person>,
    #[serde(default)]
    pub groups: HashMap<String, Group>,
}

impl SharedPayload {
    /// A payload carrying just the intention, with empty entity maps.
    pub fn new(intention: Intention) -> Self {
        Self {
            intention,
            locations: HashMap::new(),
            people: HashMap::new(),
            groups: HashMap::new(),
        }
    }
}

#[cfg(test)]
mod test {
    use time::macros::datetime;
    use uuid::Uuid;

    use crate::intention::Target;
    use crate::location::{LocationKind, LocationMatcher};

    use super::*;

    #[test]
    fn payload_json_roundtrips_with_string_keys() {
        let location = Location {
            id: Uuid::new_v4(),
            name: "Park".to_string(),
            category: "Recreation".to_string(),
            global_id: Some("g-park".to_string()),
            matcher: LocationMatcher {
                name: "Park".to_string(),
                category: "Recreation".to_string(),
                lat: None,
                lon: None,
            },
            kind: LocationKind::Shared,
            owner_id: None,
            created_at: datetime!(2025-06-01 12:00:00 UTC),
        };
        let intention = Intention {
            id: Uuid::new_v4(),
            user: "alice".to_string(),
            participants: Vec::new(),
            action: "Walk".to_string(),
            targets: vec![Target::Location {
                location_id: location.id,
            }],
            start_time: datetime!(2025-06-01 12:00:00 UTC),
            end_time: datetime!(2025-06-01 13:00:00 UTC),
            created_at: datetime!(2025-06-01 11:00:00 UTC),
        };

        let mut payload = SharedPayload::new(intention);
        payload
            .locations
            .insert(location.id.to_string(), location.clone());

        let encoded = serde_json::to_string(&payload).unwrap();
        let decoded: SharedPayload = serde_json::from_str(&encoded).unwrap();

        assert_eq!(decoded, payload);

        // map keys are canonical UUID strings on the wire
        let value: serde_json::Value = serde_json::from_str(&encoded).unwrap();
        assert!(value
            .get("locations")
            .unwrap()
            .get(location.id.to_string())
            .is_some());
    }

    #[test]
    fn missing_maps_decode_as_empty() {
        let intention = Intention {
            id: Uuid::new_v4(),
            user: "alice".to_string(),
            participants: Vec::new(),
            action: "Walk".to_string(),
            targets: vec![Target::Proximity {
                person_ids: Vec::new(),
                group_ids: Vec::new(),
            }],
            start_time: datetime!(2025-06-01 12:00:00 UTC),
            end_time: datetime!(2025-06-01 13:00:00 UTC),
            created_at: datetime!(2025-06-01 11:00:00 UTC),
        };
        let raw = serde_json::json!({ "intention": intention });

        let decoded: SharedPayload = serde_json::from_value(raw).unwrap();

        assert!(decoded.locations.is_empty());
        assert!(decoded.people.is_empty());
        assert!(decoded.groups.is_empty());
    }
}
