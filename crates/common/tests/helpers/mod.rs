//! Shared builders for integration tests.
#![allow(dead_code)]

use time::macros::datetime;
use time::OffsetDateTime;
use uuid::Uuid;

use common::intention::{Intention, Target};
use common::location::{Location, LocationKind, LocationMatcher};
use common::person::{Group, Person, PersonMatcher};

pub fn test_time() -> OffsetDateTime {
    datetime!(2025-06-01 12:00:00 UTC)
}

pub fn location(name: &str, category: &str) -> Location {
    Location {
        id: Uuid::new_v4(),
        name: name.to_string(),
        category: category.to_string(),
        global_id: None,
        matcher: LocationMatcher {
            name: name.to_string(),
            category: category.to_string(),
            lat: None,
            lon: None,
        },
        kind: LocationKind::User,
        owner_id: Some("local-user".to_string()),
        created_at: test_time(),
    }
}

pub fn shared_location(name: &str, category: &str, global_id: &str) -> Location {
    Location {
        global_id: Some(global_id.to_string()),
        kind: LocationKind::Shared,
        owner_id: None,
        ..location(name, category)
    }
}

pub fn person(name: &str, handle: Option<&str>) -> Person {
    Person {
        id: Uuid::new_v4(),
        name: name.to_string(),
        global_id: None,
        matcher: PersonMatcher {
            name: name.to_string(),
            handle: handle.map(str::to_string),
        },
        linked_user_id: None,
        created_at: test_time(),
    }
}

pub fn group(name: &str, member_ids: Vec<Uuid>) -> Group {
    Group {
        id: Uuid::new_v4(),
        name: name.to_string(),
        member_ids,
        created_at: test_time(),
    }
}

pub fn intention(user: &str, action: &str, targets: Vec<Target>) -> Intention {
    Intention {
        id: Uuid::new_v4(),
        user: user.to_string(),
        participants: Vec::new(),
        action: action.to_string(),
        targets,
        start_time: test_time(),
        end_time: test_time() + time::Duration::hours(1),
        created_at: test_time(),
    }
}
