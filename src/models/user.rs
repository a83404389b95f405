//! User record types.

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};
use utoipa::ToSchema;

/// Date format used for `created_at`.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// A user record held by the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct User {
    /// Store-assigned identifier.
    pub id: u64,
    /// Display name.
    pub name: String,
    /// Contact email (not validated).
    pub email: String,
    /// Creation date, `YYYY-MM-DD`.
    #[schema(example = "2024-01-01")]
    pub created_at: String,
}

impl User {
    /// Build a record created on `date`.
    pub fn new(id: u64, name: impl Into<String>, email: impl Into<String>, date: NaiveDate) -> Self {
        Self {
            id,
            name: name.into(),
            email: email.into(),
            created_at: date.format(DATE_FORMAT).to_string(),
        }
    }
}

/// User-shaped request body for create and update.
///
/// `id` and `created_at` are accepted so that a full `User` can be posted
/// back, but the store always assigns its own values.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct UserPayload {
    /// Ignored.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    /// New display name.
    #[serde(default, deserialize_with = "null_as_empty")]
    pub name: String,
    /// New email.
    #[serde(default, deserialize_with = "null_as_empty")]
    pub email: String,
    /// Ignored.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
}

impl UserPayload {
    /// Payload carrying only name and email.
    pub fn new(name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            ..Self::default()
        }
    }
}

/// Treat an explicit `null` the same as a missing field.
fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

/// Parse a path segment into a user id.
///
/// Only the canonical decimal rendering of an id matches, so `"02"` and
/// `"+2"` resolve to nothing rather than to user 2.
pub fn parse_user_id(raw: &str) -> Option<u64> {
    let id: u64 = raw.parse().ok()?;
    (id.to_string() == raw).then_some(id)
}
