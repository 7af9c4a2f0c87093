//! Port for issuing password reset tokens.

use uuid::Uuid;

/// Length of tokens produced by [`UuidResetTokenGenerator`].
pub const RESET_TOKEN_LEN: usize = 16;

/// Source of opaque password reset tokens.
#[cfg_attr(test, mockall::automock)]
pub trait ResetTokenGenerator: Send + Sync {
    /// Produce a fresh token.
    fn generate(&self) -> String;
}

/// Random tokens cut from a v4 UUID with the separators removed.
///
/// # Examples
/// ```
/// use user_lifecycle::domain::ports::{RESET_TOKEN_LEN, ResetTokenGenerator, UuidResetTokenGenerator};
///
/// let token = UuidResetTokenGenerator.generate();
/// assert_eq!(token.len(), RESET_TOKEN_LEN);
/// ```
#[derive(Debug, Default, Clone, Copy)]
pub struct UuidResetTokenGenerator;

impl ResetTokenGenerator for UuidResetTokenGenerator {
    fn generate(&self) -> String {
        let mut token = Uuid::new_v4().simple().to_string();
        token.truncate(RESET_TOKEN_LEN);
        token
    }
}
