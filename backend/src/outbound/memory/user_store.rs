//! Map-backed [`UserStore`] adapter.

use std::collections::BTreeMap;

use tracing::debug;

use crate::domain::ports::{UserStore, UserStoreError};
use crate::domain::{User, UserId, UserValidationError};

const FIRST_ID: u64 = 1;

/// User store holding records in a `BTreeMap` keyed by identifier.
///
/// Identifiers come from a counter starting at 1 that only [`UserStore::clear`]
/// resets. Listings are therefore ordered by registration.
#[derive(Debug, Clone)]
pub struct InMemoryUserStore {
    users: BTreeMap<UserId, User>,
    next_id: u64,
}

impl Default for InMemoryUserStore {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryUserStore {
    pub fn new() -> Self {
        Self {
            users: BTreeMap::new(),
            next_id: FIRST_ID,
        }
    }

    fn holder_of(&self, email: &str) -> Option<UserId> {
        self.users
            .iter()
            .find(|(_, user)| user.email() == email)
            .map(|(id, _)| *id)
    }

    fn rejected(error: &UserValidationError) -> UserStoreError {
        UserStoreError::invalid_user(error.to_string())
    }
}

impl UserStore for InMemoryUserStore {
    fn save(&mut self, mut user: User) -> Result<User, UserStoreError> {
        user.validate_for_storage()
            .map_err(|err| Self::rejected(&err))?;
        if self.exists_by_email(user.email()) {
            return Err(UserStoreError::conflict(user.email()));
        }

        let id = UserId::new(self.next_id);
        self.next_id += 1;
        user.assign_id(id);
        self.users.insert(id, user.clone());
        debug!(user_id = %id, "user record stored");
        Ok(user)
    }

    fn find_by_id(&self, id: UserId) -> Option<User> {
        self.users.get(&id).cloned()
    }

    fn find_by_email(&self, email: &str) -> Option<User> {
        self.users.values().find(|user| user.email() == email).cloned()
    }

    fn exists_by_email(&self, email: &str) -> bool {
        self.holder_of(email).is_some()
    }

    fn list_all(&self) -> Vec<User> {
        self.users.values().cloned().collect()
    }

    fn list_active(&self) -> Vec<User> {
        self.users
            .values()
            .filter(|user| user.is_active())
            .cloned()
            .collect()
    }

    fn update(&mut self, user: User) -> Result<User, UserStoreError> {
        let id = user
            .id()
            .ok_or_else(|| Self::rejected(&UserValidationError::MissingId))?;
        if !self.users.contains_key(&id) {
            return Err(UserStoreError::not_found(id));
        }
        if self.holder_of(user.email()).is_some_and(|holder| holder != id) {
            return Err(UserStoreError::conflict(user.email()));
        }

        self.users.insert(id, user.clone());
        debug!(user_id = %id, "user record replaced");
        Ok(user)
    }

    fn delete(&mut self, id: UserId) -> bool {
        self.users.remove(&id).is_some()
    }

    fn count(&self) -> usize {
        self.users.len()
    }

    fn clear(&mut self) {
        self.users.clear();
        self.next_id = FIRST_ID;
    }

    fn is_connected(&self) -> bool {
        true
    }
}
