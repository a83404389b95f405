//! In-memory user store.
//!
//! The store is an ordered `Vec<User>`: insertion order is preserved, updates
//! happen in place and deletes shift the tail left. Every lookup is a linear
//! scan, which is fine for a demo-sized directory.

use chrono::NaiveDate;

use crate::models::{User, UserPayload};

/// Ordered collection of users plus the id allocator.
#[derive(Debug, Clone)]
pub struct UserStore {
    users: Vec<User>,
    /// `None` once `u64::MAX` has been handed out.
    next_id: Option<u64>,
}

impl UserStore {
    /// Create a store holding `users` in the given order.
    ///
    /// New ids continue from the highest existing id.
    pub fn new(users: Vec<User>) -> Self {
        let next_id = users
            .iter()
            .map(|u| u.id)
            .max()
            .map_or(Some(1), |max| max.checked_add(1));
        Self { users, next_id }
    }

    /// Store seeded with the three demo users.
    pub fn with_demo_users() -> Self {
        Self::new(demo_users())
    }

    /// Number of users.
    pub fn len(&self) -> usize {
        self.users.len()
    }

    /// Whether the store is empty.
    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }

    /// All users in store order.
    pub fn list(&self) -> &[User] {
        &self.users
    }

    /// First user with the given id.
    pub fn get(&self, id: u64) -> Option<&User> {
        self.users.iter().find(|u| u.id == id)
    }

    /// Append a new user created on `today`.
    ///
    /// Any `id`/`created_at` in the payload is discarded. Returns `None`
    /// when no id is left to assign.
    pub fn create(&mut self, payload: UserPayload, today: NaiveDate) -> Option<User> {
        let id = self.next_id?;
        self.next_id = id.checked_add(1);
        let user = User::new(id, payload.name, payload.email, today);
        self.users.push(user.clone());
        Some(user)
    }

    /// Replace name and email of the user with `id`.
    pub fn update(&mut self, id: u64, payload: UserPayload) -> Option<User> {
        let user = self.users.iter_mut().find(|u| u.id == id)?;
        user.name = payload.name;
        user.email = payload.email;
        Some(user.clone())
    }

    /// Remove the user with `id`, keeping the order of the rest.
    pub fn delete(&mut self, id: u64) -> Option<User> {
        let index = self.users.iter().position(|u| u.id == id)?;
        Some(self.users.remove(index))
    }
}

impl Default for UserStore {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

/// The records a fresh service starts with.
pub fn demo_users() -> Vec<User> {
    [
        (1, "Zhang San", "zhangsan@example.com", "2024-01-01"),
        (2, "Li Si", "lisi@example.com", "2024-01-02"),
        (3, "Wang Wu", "wangwu@example.com", "2024-01-03"),
    ]
    .into_iter()
    .map(|(id, name, email, created_at)| User {
        id,
        name: name.to_string(),
        email: email.to_string(),
        created_at: created_at.to_string(),
    })
    .collect()
}
