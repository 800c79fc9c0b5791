use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use uuid::Uuid;

/// The object of an intention: a place, or proximity to specific people
/// and groups.
///
/// The set is closed and the `type` discriminator with its sibling field
/// names is part of the wire format.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Target {
    Location {
        #[serde(rename = "locationId")]
        location_id: Uuid,
    },
    Proximity {
        #[serde(rename = "personIds")]
        person_ids: Vec<Uuid>,
        #[serde(rename = "groupIds")]
        group_ids: Vec<Uuid>,
    },
}

/// A user's planned action over a time window, aimed at one or more
/// targets.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Intention {
    pub id: Uuid,
    /// Originating user handle.
    pub user: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub participants: Vec<String>,
    pub action: String,
    pub targets: Vec<Target>,
    #[serde(with = "time::serde::rfc3339")]
    pub start_time: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub end_time: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

#[cfg(test)]
mod test {
    use time::macros::datetime;

    use super::*;

    #[test]
    fn location_target_wire_format() {
        let id = Uuid::new_v4();
        let target = Target::Location { location_id: id };

        let value = serde_json::to_value(&target).unwrap();
        assert_eq!(value.get("type").unwrap(), "Location");
        assert_eq!(value.get("locationId").unwrap(), &serde_json::json!(id));

        let decoded: Target = serde_json::from_value(value).unwrap();
        assert_eq!(decoded, target);
    }

    #[test]
    fn proximity_target_wire_format() {
        let target = Target::Proximity {
            person_ids: vec![Uuid::new_v4()],
            group_ids: vec![Uuid::new_v4(), Uuid::new_v4()],
        };

        let value = serde_json::to_value(&target).unwrap();
        assert_eq!(value.get("type").unwrap(), "Proximity");
        assert_eq!(value.get("personIds").unwrap().as_array().unwrap().len(), 1);
        assert_eq!(value.get("groupIds").unwrap().as_array().unwrap().len(), 2);

        let decoded: Target = serde_json::from_value(value).unwrap();
        assert_eq!(decoded, target);
    }

    #[test]
    fn unknown_target_type_is_rejected() {
        let raw = serde_json::json!({ "type": "Telepresence", "sessionId": "abc" });
        assert!(serde_json::from_value::<Target>(raw).is_err());
    }

    #[test]
    fn intention_json_roundtrips() {
        let intention = Intention {
            id: Uuid::new_v4(),
            user: "alice".to_string(),
            participants: vec!["bob".to_string()],
            action: "Get coffee".to_string(),
            targets: vec![Target::Location {
                location_id: Uuid::new_v4(),
            }],
            start_time: datetime!(2025-06-01 12:00:00 UTC),
            end_time: datetime!(2025-06-01 13:00:00 UTC),
            created_at: datetime!(2025-06-01 11:55:00 UTC),
        };

        let encoded = serde_json::to_string(&intention).unwrap();
        let decoded: Intention = serde_json::from_str(&encoded).unwrap();

        assert_eq!(decoded, intention);
    }

    #[test]
    fn empty_participants_are_omitted() {
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
            created_at: datetime!(2025-06-01 11:55:00 UTC),
        };

        let value = serde_json::to_value(&intention).unwrap();
        assert!(value.get("participants").is_none());
        assert!(value.get("startTime").is_some());
    }
}
