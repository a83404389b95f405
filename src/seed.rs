//! Seed data: loading, generating and checking user JSON files.

use std::collections::HashSet;
use std::path::Path;

use chrono::NaiveDate;
use serde_json::Value;
use tracing::{debug, info};

use crate::config::Config;
use crate::error::SeedError;
use crate::models::User;
use crate::store::UserStore;

const GIVEN_NAMES: &[&str] = &[
    "Zhang San", "Li Si", "Wang Wu", "Zhao Liu", "Qian Qi", "Sun Ba", "Zhou Jiu", "Wu Shi",
    "Zheng Shiyi", "Wang Shier", "Feng Shisan", "Chen Shisi", "Chu Shiwu", "Wei Shiliu",
    "Jiang Shiqi", "Shen Shiba",
];

/// Build the store a server starts with: the seed file if configured, else the demo users.
pub fn initial_store(config: &Config) -> Result<UserStore, SeedError> {
    match &config.seed_file {
        Some(path) => Ok(UserStore::new(load_users(path)?)),
        None => Ok(UserStore::with_demo_users()),
    }
}

/// Read a JSON array of users from `path`.
pub fn load_users(path: &Path) -> Result<Vec<User>, SeedError> {
    let content = std::fs::read_to_string(path).map_err(|source| SeedError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let users: Vec<User> = serde_json::from_str(&content).map_err(|source| SeedError::Parse {
        path: path.to_path_buf(),
        source,
    })?;
    check_unique_ids(&users)?;
    check_id_headroom(&users)?;

    info!(path = %path.display(), count = users.len(), "Loaded seed users");
    Ok(users)
}

/// Reject user lists where two records share an id.
pub fn check_unique_ids(users: &[User]) -> Result<(), SeedError> {
    let mut seen = HashSet::with_capacity(users.len());
    for user in users {
        if !seen.insert(user.id) {
            return Err(SeedError::DuplicateId(user.id));
        }
    }
    Ok(())
}

/// Reject user lists holding `u64::MAX`, which would leave no id for the next user.
pub fn check_id_headroom(users: &[User]) -> Result<(), SeedError> {
    match users.iter().find(|u| u.id == u64::MAX) {
        Some(user) => Err(SeedError::IdOverflow(user.id)),
        None => Ok(()),
    }
}

/// Generate `count` demo users with ids `1..=count`, all created on `date`.
pub fn generate_users(count: u32, date: NaiveDate) -> Vec<User> {
    let users: Vec<User> = (1..=u64::from(count))
        .zip(GIVEN_NAMES.iter().cycle())
        .map(|(id, name)| User::new(id, format!("{name} {id}"), format!("user{id}@example.com"), date))
        .collect();
    debug!(count = users.len(), "Generated users");
    users
}

/// What a JSON document turned out to contain.
#[derive(Debug, Clone, PartialEq)]
pub enum JsonSummary {
    /// A user array; holds the total and the first few records.
    Users {
        /// Number of records.
        total: usize,
        /// Up to three leading records.
        preview: Vec<User>,
    },
    /// Some other JSON value; holds up to five top-level keys if it is an object.
    Other {
        /// Leading object keys.
        keys: Vec<String>,
    },
}

/// Parse `content` as JSON and describe it.
pub fn summarize_json(content: &str) -> Result<JsonSummary, serde_json::Error> {
    let value: Value = serde_json::from_str(content)?;

    if let Ok(users) = serde_json::from_value::<Vec<User>>(value.clone()) {
        return Ok(JsonSummary::Users {
            total: users.len(),
            preview: users.into_iter().take(3).collect(),
        });
    }

    let keys = value
        .as_object()
        .map(|obj| obj.keys().take(5).cloned().collect())
        .unwrap_or_default();
    Ok(JsonSummary::Other { keys })
}
