//! User lifecycle orchestration.
//!
//! [`UserLifecycleService`] drives registration, login, profile updates,
//! password resets and account (de)activation over an injected
//! [`UserStore`] and [`NotificationSink`]. Every check runs before the store
//! is mutated; once persistence succeeds only the password reset email can
//! still fail the operation. Other notifications are best effort and their
//! fate is reported through [`Notified`].

use std::fmt;
use std::sync::Arc;

use mockable::Clock;
use serde::Serialize;
use serde_json::json;
use tracing::{debug, info, warn};

use crate::domain::ports::{
    NotificationError, NotificationSink, ResetTokenGenerator, UserStore, UserStoreError,
    UuidResetTokenGenerator,
};
use crate::domain::{
    DeliveryStatus, Error, NotificationOutcome, Notified, User, UserId, UserValidationError,
    is_valid_email, validate_secret,
};

/// Notice sent after a contact address change.
pub const EMAIL_CHANGED_MESSAGE: &str = "Your email address was updated successfully.";
/// Notice sent after an account is deactivated.
pub const DEACTIVATED_MESSAGE: &str = "Your account has been deactivated.";
/// Notice sent after an account is reactivated.
pub const REACTIVATED_MESSAGE: &str = "Your account has been reactivated.";

/// Counts of stored users, computed when requested.
///
/// `active + inactive == total` always holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct UserStats {
    pub total: usize,
    pub active: usize,
    pub inactive: usize,
}

impl fmt::Display for UserStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} users ({} active, {} inactive)",
            self.total, self.active, self.inactive
        )
    }
}

/// Reachability of the service's collaborators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthReport {
    pub store_connected: bool,
    pub notifications_healthy: bool,
}

impl HealthReport {
    /// Whether every collaborator is available.
    pub fn is_healthy(&self) -> bool {
        self.store_connected && self.notifications_healthy
    }
}

/// Orchestrates the user lifecycle over one exclusively owned store and sink.
pub struct UserLifecycleService<S, N> {
    store: S,
    sink: N,
    clock: Arc<dyn Clock>,
    tokens: Arc<dyn ResetTokenGenerator>,
}

impl<S, N> UserLifecycleService<S, N> {
    /// Wrap a store and sink. Reset tokens come from [`UuidResetTokenGenerator`].
    pub fn new(store: S, sink: N, clock: Arc<dyn Clock>) -> Self {
        Self {
            store,
            sink,
            clock,
            tokens: Arc::new(UuidResetTokenGenerator),
        }
    }

    /// Replace the reset token source.
    #[must_use]
    pub fn with_token_generator(mut self, tokens: Arc<dyn ResetTokenGenerator>) -> Self {
        self.tokens = tokens;
        self
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }

    pub fn sink(&self) -> &N {
        &self.sink
    }

    /// Exclusive access to the sink, e.g. to switch delivery off.
    pub fn sink_mut(&mut self) -> &mut N {
        &mut self.sink
    }
}

impl<S, N> UserLifecycleService<S, N>
where
    S: UserStore,
    N: NotificationSink,
{
    fn map_store_error(error: UserStoreError) -> Error {
        match error {
            UserStoreError::InvalidUser { message } => Error::invalid_request(message),
            UserStoreError::Conflict { email } => Error::conflict("email address already registered")
                .with_details(json!({ "email": email, "code": "email_taken" })),
            UserStoreError::NotFound { id } => Error::not_found(format!("user {id} not found"))
                .with_details(json!({ "userId": id.get() })),
        }
    }

    fn map_notification_error(error: NotificationError) -> Error {
        Error::invalid_request(error.to_string())
    }

    fn best_effort(
        user: &User,
        purpose: &'static str,
        result: Result<DeliveryStatus, NotificationError>,
    ) -> NotificationOutcome {
        match result {
            Ok(status) => {
                if !status.is_sent() {
                    debug!(user_id = ?user.id(), purpose, ?status, "notification declined");
                }
                NotificationOutcome::from_delivery(status)
            }
            Err(error) => {
                warn!(
                    user_id = ?user.id(),
                    purpose,
                    %error,
                    "best-effort notification failed; continuing"
                );
                NotificationOutcome::Failed(Self::map_notification_error(error))
            }
        }
    }

    fn require_user(&self, id: UserId) -> Result<User, Error> {
        self.store
            .find_by_id(id)
            .ok_or_else(|| Self::map_store_error(UserStoreError::not_found(id)))
    }

    /// Create, persist and welcome a new user.
    ///
    /// Fails with `InvalidRequest` for a blank display name, a short secret
    /// or a malformed address, and with `Conflict` when the address is
    /// already registered. The welcome message is best effort.
    pub fn register(
        &mut self,
        display_name: &str,
        email: &str,
        secret: &str,
    ) -> Result<Notified<User>, Error> {
        if display_name.trim().is_empty() {
            return Err(Error::invalid_request(
                UserValidationError::EmptyDisplayName.to_string(),
            ));
        }
        validate_secret(secret).map_err(|err| Error::invalid_request(err.to_string()))?;

        let user = User::new(display_name, email, secret, self.clock.utc());
        let saved = self.store.save(user).map_err(Self::map_store_error)?;
        info!(user_id = ?saved.id(), "user registered");

        let result = self.sink.send_welcome(&saved);
        let outcome = Self::best_effort(&saved, "welcome", result);
        Ok(Notified::new(saved, outcome))
    }

    /// Return the user only when the address is known, the secret matches
    /// exactly and the account is active.
    pub fn login(&self, email: &str, secret: &str) -> Option<User> {
        let Some(user) = self.store.find_by_email(email) else {
            debug!("login rejected: unknown address");
            return None;
        };
        if !user.secret_matches(secret) {
            debug!(user_id = ?user.id(), "login rejected: secret mismatch");
            return None;
        }
        if !user.is_active() {
            debug!(user_id = ?user.id(), "login rejected: account inactive");
            return None;
        }
        Some(user)
    }

    /// Change a user's display name and/or contact address.
    ///
    /// A blank name is ignored. An address equal to the current one is
    /// ignored; otherwise it must be valid and unused. Only an address change
    /// triggers a notice.
    pub fn update_profile(
        &mut self,
        id: UserId,
        display_name: Option<&str>,
        email: Option<&str>,
    ) -> Result<Notified<User>, Error> {
        let mut user = self.require_user(id)?;

        if let Some(name) = display_name.filter(|name| !name.trim().is_empty()) {
            user.set_display_name(name);
        }

        let new_email = email.filter(|candidate| *candidate != user.email());
        if let Some(candidate) = new_email {
            if !is_valid_email(candidate) {
                return Err(Error::invalid_request(
                    UserValidationError::InvalidEmail.to_string(),
                ));
            }
            if self.store.exists_by_email(candidate) {
                return Err(Self::map_store_error(UserStoreError::conflict(candidate)));
            }
            user.set_email(candidate);
        }

        let updated = self.store.update(user).map_err(Self::map_store_error)?;
        info!(user_id = %id, email_changed = new_email.is_some(), "profile updated");

        let outcome = if new_email.is_some() {
            let result = self.sink.send_notice(&updated, EMAIL_CHANGED_MESSAGE);
            Self::best_effort(&updated, "email change", result)
        } else {
            NotificationOutcome::NotRequired
        };
        Ok(Notified::new(updated, outcome))
    }

    /// Issue a reset token and email it to the user.
    ///
    /// Delivery is essential here: a declined or rejected send fails the
    /// request. The token is returned to the caller and never logged.
    pub fn request_password_reset(&mut self, email: &str) -> Result<String, Error> {
        let user = self.store.find_by_email(email).ok_or_else(|| {
            Error::not_found("no user registered with that email address")
                .with_details(json!({ "email": email }))
        })?;
        if !user.is_active() {
            return Err(Error::invalid_state(
                "password reset is unavailable for inactive accounts",
            ));
        }

        let token = self.tokens.generate();
        let status = self
            .sink
            .send_password_reset(&user, &token)
            .map_err(Self::map_notification_error)?;
        if !status.is_sent() {
            warn!(user_id = ?user.id(), ?status, "password reset email not delivered");
            return Err(Error::delivery_failed("failed to send password reset email"));
        }

        info!(user_id = ?user.id(), "password reset issued");
        Ok(token)
    }

    /// Mark a user inactive and send a best-effort notice.
    pub fn deactivate(&mut self, id: UserId) -> Result<Notified<User>, Error> {
        self.set_active_flag(id, false)
    }

    /// Mark a user active and send a best-effort notice.
    pub fn activate(&mut self, id: UserId) -> Result<Notified<User>, Error> {
        self.set_active_flag(id, true)
    }

    fn set_active_flag(&mut self, id: UserId, active: bool) -> Result<Notified<User>, Error> {
        let mut user = self.require_user(id)?;
        user.set_active(active);
        let updated = self.store.update(user).map_err(Self::map_store_error)?;
        info!(user_id = %id, active, "account status changed");

        let message = if active {
            REACTIVATED_MESSAGE
        } else {
            DEACTIVATED_MESSAGE
        };
        let result = self.sink.send_notice(&updated, message);
        let outcome = Self::best_effort(&updated, "status change", result);
        Ok(Notified::new(updated, outcome))
    }

    /// Count users from the store's current contents.
    pub fn stats(&self) -> UserStats {
        let users = self.store.list_all();
        let total = users.len();
        let active = users.iter().filter(|user| user.is_active()).count();
        UserStats {
            total,
            active,
            inactive: total - active,
        }
    }

    pub fn find_user(&self, id: UserId) -> Option<User> {
        self.store.find_by_id(id)
    }

    pub fn find_user_by_email(&self, email: &str) -> Option<User> {
        self.store.find_by_email(email)
    }

    pub fn active_users(&self) -> Vec<User> {
        self.store.list_active()
    }

    /// Send one message to every active user, returning how many went out.
    pub fn broadcast(&mut self, subject: &str, body: &str) -> usize {
        let recipients = self.store.list_active();
        let sent = self.sink.send_bulk(&recipients, subject, body);
        info!(recipients = recipients.len(), sent, "broadcast sent");
        sent
    }

    pub fn health(&self) -> HealthReport {
        HealthReport {
            store_connected: self.store.is_connected(),
            notifications_healthy: self.sink.is_healthy(),
        }
    }
}

#[cfg(test)]
#[path = "user_lifecycle_tests.rs"]
mod tests;
