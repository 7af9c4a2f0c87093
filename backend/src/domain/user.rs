//! User record model.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use zeroize::Zeroizing;

/// Minimum number of characters accepted for a secret at registration.
pub const SECRET_MIN: usize = 6;
/// Label used when a record carries no usable display name.
pub const UNKNOWN_DISPLAY_NAME: &str = "Unknown User";

/// Validation errors returned when a record is checked before storage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserValidationError {
    EmptyDisplayName,
    InvalidEmail,
    SecretTooShort { min: usize },
    MissingId,
}

impl fmt::Display for UserValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyDisplayName => write!(f, "display name must not be empty"),
            Self::InvalidEmail => write!(f, "a valid email address is required"),
            Self::SecretTooShort { min } => {
                write!(f, "secret must be at least {min} characters")
            }
            Self::MissingId => write!(f, "user id must be assigned"),
        }
    }
}

impl std::error::Error for UserValidationError {}

/// Sequential user identifier assigned by the record store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(u64);

impl UserId {
    /// Wrap a raw identifier.
    #[must_use]
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    /// Raw numeric value.
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for UserId {
    fn from(value: u64) -> Self {
        Self(value)
    }
}

/// Contact address rule: must contain both an `@` and a `.`.
///
/// The rule is intentionally weak; stricter checks would reject addresses
/// callers already rely on.
///
/// # Examples
/// ```
/// use user_lifecycle::domain::is_valid_email;
///
/// assert!(is_valid_email("ada@example.com"));
/// assert!(is_valid_email("@."));
/// assert!(!is_valid_email("ada.example.com"));
/// ```
#[must_use]
pub fn is_valid_email(email: &str) -> bool {
    email.contains('@') && email.contains('.')
}

/// A user record.
///
/// ## Invariants
/// - `id` is `None` until the record store assigns one; it never changes
///   afterwards.
/// - Equality is defined by the `(id, email)` pair.
/// - The secret is compared by exact match and never printed.
#[derive(Clone)]
pub struct User {
    id: Option<UserId>,
    display_name: String,
    email: String,
    secret: Zeroizing<String>,
    active: bool,
    created_at: DateTime<Utc>,
}

impl User {
    /// Build an unsaved, active record.
    ///
    /// No validation happens here; the record store checks the display name
    /// and address when the record is saved.
    pub fn new(
        display_name: impl Into<String>,
        email: impl Into<String>,
        secret: impl Into<String>,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: None,
            display_name: display_name.into(),
            email: email.into(),
            secret: Zeroizing::new(secret.into()),
            active: true,
            created_at,
        }
    }

    /// Identifier assigned by the store, if saved.
    pub fn id(&self) -> Option<UserId> {
        self.id
    }

    /// Raw display name.
    pub fn display_name(&self) -> &str {
        self.display_name.as_str()
    }

    /// Display name suitable for greetings, falling back to
    /// [`UNKNOWN_DISPLAY_NAME`] when the name is blank.
    pub fn display_label(&self) -> &str {
        if self.display_name.trim().is_empty() {
            UNKNOWN_DISPLAY_NAME
        } else {
            self.display_name.as_str()
        }
    }

    /// Contact address.
    pub fn email(&self) -> &str {
        self.email.as_str()
    }

    /// Whether the contact address satisfies [`is_valid_email`].
    pub fn has_valid_email(&self) -> bool {
        is_valid_email(&self.email)
    }

    /// Compare a candidate secret by exact match.
    pub fn secret_matches(&self, candidate: &str) -> bool {
        self.secret.as_str() == candidate
    }

    /// Whether the account is active.
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Creation timestamp.
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Assign the store identifier.
    pub fn assign_id(&mut self, id: UserId) {
        self.id = Some(id);
    }

    /// Replace the display name.
    pub fn set_display_name(&mut self, display_name: impl Into<String>) {
        self.display_name = display_name.into();
    }

    /// Replace the contact address.
    pub fn set_email(&mut self, email: impl Into<String>) {
        self.email = email.into();
    }

    /// Flip the active flag.
    pub fn set_active(&mut self, active: bool) {
        self.active = active;
    }

    /// Check the fields the record store requires before saving.
    pub fn validate_for_storage(&self) -> Result<(), UserValidationError> {
        if self.display_name.trim().is_empty() {
            return Err(UserValidationError::EmptyDisplayName);
        }
        if !self.has_valid_email() {
            return Err(UserValidationError::InvalidEmail);
        }
        Ok(())
    }
}

impl PartialEq for User {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id && self.email == other.email
    }
}

impl Eq for User {}

impl fmt::Debug for User {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("User")
            .field("id", &self.id)
            .field("display_name", &self.display_name)
            .field("email", &self.email)
            .field("secret", &"<redacted>")
            .field("active", &self.active)
            .field("created_at", &self.created_at)
            .finish()
    }
}

/// Check a registration secret against [`SECRET_MIN`].
///
/// Length is counted in Unicode scalar values.
pub fn validate_secret(secret: &str) -> Result<(), UserValidationError> {
    if secret.chars().count() < SECRET_MIN {
        return Err(UserValidationError::SecretTooShort { min: SECRET_MIN });
    }
    Ok(())
}
