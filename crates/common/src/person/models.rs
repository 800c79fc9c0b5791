use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use uuid::Uuid;

use crate::matching::{eq_ignore_case, MatchConfidence};

/// Denormalized comparison data used to match a foreign person against
/// local ones.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PersonMatcher {
    pub name: String,
    /// Contact handle, e.g. an email address or phone number.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub handle: Option<String>,
}

impl PersonMatcher {
    /// Compare this (foreign) matcher against a local person.
    ///
    /// A matching handle is definitive; a matching name alone is only a
    /// possibility.
    pub fn matches(&self, local: &Person) -> MatchConfidence {
        if let (Some(handle), Some(local_handle)) = (&self.handle, &local.matcher.handle) {
            if eq_ignore_case(handle, local_handle) {
                return MatchConfidence::Exact;
            }
        }

        if eq_ignore_case(&self.name, &local.matcher.name) {
            return MatchConfidence::Possible;
        }

        MatchConfidence::None
    }
}

/// An individual. Distinct from a system user, though a person record may
/// be linked to one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Person {
    pub id: Uuid,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub global_id: Option<String>,
    pub matcher: PersonMatcher,
    /// Linked system-user id, when this person is a known user.
    #[serde(rename = "user_id", default, skip_serializing_if = "Option::is_none")]
    pub linked_user_id: Option<String>,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

/// A named collection of people.
///
/// `member_ids` has set semantics: a person appears at most once.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Group {
    pub id: Uuid,
    pub name: String,
    pub member_ids: Vec<Uuid>,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}
