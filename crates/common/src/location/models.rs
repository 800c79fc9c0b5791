use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use uuid::Uuid;

use crate::matching::{eq_ignore_case, MatchConfidence};

/// Mean Earth radius in kilometers.
const EARTH_RADIUS_KM: f64 = 6371.0;

/// Same-named places at most this far apart are the same place.
const EXACT_DISTANCE_KM: f64 = 0.05;
/// Same-named places further apart than this are distinct places.
const DISTINCT_DISTANCE_KM: f64 = 0.5;

/// Distinguishes private user places from publicly shared ones.
///
/// `User` locations carry an owning user id; `Shared` locations may carry
/// a global id instead and are never owned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LocationKind {
    #[serde(rename = "USER")]
    User,
    #[serde(rename = "SHARED")]
    Shared,
}

/// Denormalized comparison data used to match a foreign location against
/// local ones.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocationMatcher {
    pub name: String,
    pub category: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lat: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lon: Option<f64>,
}

impl LocationMatcher {
    /// Compare this (foreign) matcher against a local location.
    ///
    /// Names gate everything: different names are never the same place.
    /// When both sides carry coordinates the great-circle distance decides;
    /// otherwise a category match upgrades the verdict to exact.
    pub fn matches(&self, local: &Location) -> MatchConfidence {
        if !eq_ignore_case(&self.name, &local.matcher.name) {
            return MatchConfidence::None;
        }

        if let (Some(lat), Some(lon), Some(local_lat), Some(local_lon)) =
            (self.lat, self.lon, local.matcher.lat, local.matcher.lon)
        {
            let distance_km = haversine_km(lat, lon, local_lat, local_lon);
            return confidence_for_distance(distance_km);
        }

        if eq_ignore_case(&self.category, &local.matcher.category) {
            return MatchConfidence::Exact;
        }

        MatchConfidence::Possible
    }
}

/// Verdict for two same-named places a given distance apart.
fn confidence_for_distance(distance_km: f64) -> MatchConfidence {
    if distance_km <= EXACT_DISTANCE_KM {
        return MatchConfidence::Exact;
    }
    if distance_km > DISTINCT_DISTANCE_KM {
        return MatchConfidence::None;
    }
    MatchConfidence::Possible
}

/// Great-circle distance between two points in kilometers (haversine).
fn haversine_km(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    let d_lat = (lat2 - lat1).to_radians();
    let d_lon = (lon2 - lon1).to_radians();
    let lat1_r = lat1.to_radians();
    let lat2_r = lat2.to_radians();

    let a = (d_lat / 2.0).sin().powi(2) + (d_lon / 2.0).sin().powi(2) * lat1_r.cos() * lat2_r.cos();
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());
    EARTH_RADIUS_KM * c
}

/// A physical place.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub id: Uuid,
    pub name: String,
    pub category: String,
    /// Stable cross-node identifier for publicly shared places.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub global_id: Option<String>,
    pub matcher: LocationMatcher,
    #[serde(rename = "type")]
    pub kind: LocationKind,
    /// Owning user; set exactly when `kind` is `User`.
    #[serde(rename = "user_id", default, skip_serializing_if = "Option::is_none")]
    pub owner_id: Option<String>,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

#[cfg(test)]
mod test {
    use time::macros::datetime;

    use super::*;

    fn local(name: &str, category: &str, coords: Option<(f64, f64)>) -> Location {
        Location {
            id: Uuid::new_v4(),
            name: name.to_string(),
            category: category.to_string(),
            global_id: None,
            matcher: LocationMatcher {
                name: name.to_string(),
                category: category.to_string(),
                lat: coords.map(|c| c.0),
                lon: coords.map(|c| c.1),
            },
            kind: LocationKind::User,
            owner_id: Some("alice".to_string()),
            created_at: datetime!(2025-06-01 12:00:00 UTC),
        }
    }

    #[test]
    fn different_names_never_match() {
        let matcher = LocationMatcher {
            name: "Cafe".to_string(),
            category: "Cafe".to_string(),
            lat: None,
            lon: None,
        };
        let candidate = local("Library", "Cafe", None);

        assert_eq!(matcher.matches(&candidate), MatchConfidence::None);
    }

    #[test]
    fn name_and_category_match_is_exact_case_insensitively() {
        let matcher = LocationMatcher {
            name: "alice's cafe".to_string(),
            category: "cafe".to_string(),
            lat: None,
            lon: None,
        };
        let candidate = local("Alice's Cafe", "Cafe", None);

        assert_eq!(matcher.matches(&candidate), MatchConfidence::Exact);
    }

    #[test]
    fn name_match_alone_is_possible() {
        let matcher = LocationMatcher {
            name: "PARK".to_string(),
            category: "Playground".to_string(),
            lat: None,
            lon: None,
        };
        let candidate = local("Park", "Recreation", None);

        assert_eq!(matcher.matches(&candidate), MatchConfidence::Possible);
    }

    #[test]
    fn nearby_coordinates_are_exact() {
        let matcher = LocationMatcher {
            name: "Park".to_string(),
            category: "Recreation".to_string(),
            lat: Some(53.3498),
            lon: Some(-6.2603),
        };
        // ~20 m north of the candidate
        let candidate = local("Park", "Recreation", Some((53.34998, -6.2603)));

        assert_eq!(matcher.matches(&candidate), MatchConfidence::Exact);
    }

    #[test]
    fn distant_coordinates_override_category_match() {
        let matcher = LocationMatcher {
            name: "Park".to_string(),
            category: "Recreation".to_string(),
            lat: Some(53.3498),
            lon: Some(-6.2603),
        };
        // ~5 km away; same name and category, still not the same place
        let candidate = local("Park", "Recreation", Some((53.3948, -6.2603)));

        assert_eq!(matcher.matches(&candidate), MatchConfidence::None);
    }

    #[test]
    fn intermediate_distance_is_possible() {
        let matcher = LocationMatcher {
            name: "Park".to_string(),
            category: "Recreation".to_string(),
            lat: Some(53.3498),
            lon: Some(-6.2603),
        };
        // ~200 m away
        let candidate = local("Park", "Recreation", Some((53.3516, -6.2603)));

        assert_eq!(matcher.matches(&candidate), MatchConfidence::Possible);
    }

    #[test]
    fn missing_coordinates_on_one_side_fall_back_to_category() {
        let matcher = LocationMatcher {
            name: "Park".to_string(),
            category: "Recreation".to_string(),
            lat: Some(53.3498),
            lon: Some(-6.2603),
        };
        let candidate = local("Park", "Recreation", None);

        assert_eq!(matcher.matches(&candidate), MatchConfidence::Exact);
    }

    #[test]
    fn distance_boundaries_are_inclusive_exclusive() {
        // <= 0.05 km is exact, including the boundary itself
        assert_eq!(confidence_for_distance(0.05), MatchConfidence::Exact);
        assert_eq!(confidence_for_distance(0.050001), MatchConfidence::Possible);
        // > 0.5 km is none; exactly 0.5 km is still possible
        assert_eq!(confidence_for_distance(0.5), MatchConfidence::Possible);
        assert_eq!(confidence_for_distance(0.500001), MatchConfidence::None);
    }

    #[test]
    fn haversine_matches_known_distance() {
        // Dublin to London is roughly 464 km
        let d = haversine_km(53.3498, -6.2603, 51.5074, -0.1278);
        assert!((d - 464.0).abs() < 5.0, "got {d}");
    }

    #[test]
    fn location_json_field_names_are_stable() {
        let loc = local("Park", "Recreation", None);
        let value = serde_json::to_value(&loc).unwrap();

        assert!(value.get("id").is_some());
        assert_eq!(value.get("type").unwrap(), "USER");
        assert_eq!(value.get("user_id").unwrap(), "alice");
        assert!(value.get("created_at").is_some());
        // unset optionals are omitted entirely
        assert!(value.get("global_id").is_none());
    }

    #[test]
    fn location_json_roundtrips() {
        let mut loc = local("Park", "Recreation", Some((53.35, -6.26)));
        loc.global_id = Some("g-park".to_string());

        let encoded = serde_json::to_string(&loc).unwrap();
        let decoded: Location = serde_json::from_str(&encoded).unwrap();

        assert_eq!(decoded, loc);
    }
}
