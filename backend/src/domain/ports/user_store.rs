//! Port abstraction for the user record store and its errors.
//!
//! The store owns identifier assignment and contact-address uniqueness. Its
//! lookups never fail; mutations report validation, conflict, and missing
//! record errors through [`UserStoreError`].

use crate::domain::{User, UserId};

use super::define_port_error;

define_port_error! {
    /// Errors raised by user store adapters.
    pub enum UserStoreError {
        /// The record failed a field rule or has no identifier.
        InvalidUser { message: String } => "user record rejected: {message}",
        /// Another record already uses the contact address.
        Conflict { email: String } => "email address already registered: {email}",
        /// No record exists with the identifier.
        NotFound { id: UserId } => "user {id} not found",
    }
}

/// Persistence port for user records.
///
/// Listing operations return independent snapshots ordered by identifier.
#[cfg_attr(test, mockall::automock)]
pub trait UserStore: Send {
    /// Validate and insert a new record, assigning the next identifier.
    ///
    /// Fails with [`UserStoreError::InvalidUser`] for a blank display name or
    /// malformed address, and with [`UserStoreError::Conflict`] when the
    /// address is taken. Nothing is stored on failure.
    fn save(&mut self, user: User) -> Result<User, UserStoreError>;

    /// Fetch a record by identifier.
    fn find_by_id(&self, id: UserId) -> Option<User>;

    /// Fetch a record by exact contact address.
    fn find_by_email(&self, email: &str) -> Option<User>;

    /// Whether any record uses the contact address.
    fn exists_by_email(&self, email: &str) -> bool;

    /// Snapshot of every record.
    fn list_all(&self) -> Vec<User>;

    /// Snapshot of active records.
    fn list_active(&self) -> Vec<User>;

    /// Replace an existing record.
    ///
    /// Fails with [`UserStoreError::InvalidUser`] when the record has no
    /// identifier, [`UserStoreError::NotFound`] when nothing is stored under
    /// it, and [`UserStoreError::Conflict`] when a different record already
    /// uses its address.
    fn update(&mut self, user: User) -> Result<User, UserStoreError>;

    /// Remove a record, reporting whether one existed.
    fn delete(&mut self, id: UserId) -> bool;

    /// Number of stored records.
    fn count(&self) -> usize;

    /// Remove every record and restart identifiers at 1.
    fn clear(&mut self);

    /// Whether the backing store is reachable.
    fn is_connected(&self) -> bool;
}
