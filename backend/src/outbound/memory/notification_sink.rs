//! Logging [`NotificationSink`] adapter.
//!
//! Nothing leaves the process: every accepted send is appended to an ordered
//! log after an optional simulated delay. Checks run in a fixed order:
//! required arguments, then the enabled flag, then the recipient address.

use std::sync::Arc;
use std::time::Duration;

use mockable::Clock;
use tracing::debug;

use crate::domain::ports::{NoopSleeper, NotificationError, NotificationSink, Sleeper};
use crate::domain::{
    DeliveryStatus, NOTICE_SUBJECT, NotificationKind, PASSWORD_RESET_SUBJECT, SentNotification,
    User, WELCOME_SUBJECT,
};

/// Notification sink that records messages instead of sending them.
pub struct InMemoryNotificationSink {
    log: Vec<SentNotification>,
    enabled: bool,
    delay: Duration,
    sleeper: Arc<dyn Sleeper>,
    clock: Arc<dyn Clock>,
}

impl InMemoryNotificationSink {
    /// Enabled sink with no simulated delay.
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self {
            log: Vec::new(),
            enabled: true,
            delay: Duration::ZERO,
            sleeper: Arc::new(NoopSleeper),
            clock,
        }
    }

    /// Pause for `delay` through `sleeper` before each logged send.
    ///
    /// A zero delay never calls the sleeper.
    #[must_use]
    pub fn with_delay(mut self, delay: Duration, sleeper: Arc<dyn Sleeper>) -> Self {
        self.delay = delay;
        self.sleeper = sleeper;
        self
    }

    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Snapshot of the log in send order.
    pub fn sent(&self) -> Vec<SentNotification> {
        self.log.clone()
    }

    /// Snapshot of the log entries addressed to `email`.
    pub fn sent_to(&self, email: &str) -> Vec<SentNotification> {
        self.log
            .iter()
            .filter(|entry| entry.recipient == email)
            .cloned()
            .collect()
    }

    pub fn sent_count(&self) -> usize {
        self.log.len()
    }

    pub fn clear_log(&mut self) {
        self.log.clear();
    }

    fn deliver(&mut self, kind: NotificationKind, recipient: &str, subject: &str, body: String) {
        if !self.delay.is_zero() {
            self.sleeper.sleep(self.delay);
        }
        debug!(kind = kind.code(), recipient, "notification sent");
        self.log.push(SentNotification {
            kind,
            recipient: recipient.to_owned(),
            subject: subject.to_owned(),
            body,
            sent_at: self.clock.utc(),
        });
    }

    fn require_recipient(user: &User) -> Result<(), NotificationError> {
        if user.has_valid_email() {
            Ok(())
        } else {
            Err(NotificationError::invalid_recipient(user.email()))
        }
    }
}

impl NotificationSink for InMemoryNotificationSink {
    fn send_welcome(&mut self, user: &User) -> Result<DeliveryStatus, NotificationError> {
        if !self.enabled {
            return Ok(DeliveryStatus::Disabled);
        }
        Self::require_recipient(user)?;

        let body = format!("Hello {}, welcome aboard!", user.display_label());
        self.deliver(NotificationKind::Welcome, user.email(), WELCOME_SUBJECT, body);
        Ok(DeliveryStatus::Sent)
    }

    fn send_password_reset(
        &mut self,
        user: &User,
        token: &str,
    ) -> Result<DeliveryStatus, NotificationError> {
        if token.trim().is_empty() {
            return Err(NotificationError::invalid_argument(
                "reset token must not be empty",
            ));
        }
        if !self.enabled {
            return Ok(DeliveryStatus::Disabled);
        }
        Self::require_recipient(user)?;

        let body = format!(
            "Hello {}, use this token to reset your password: {token}",
            user.display_label()
        );
        self.deliver(
            NotificationKind::PasswordReset,
            user.email(),
            PASSWORD_RESET_SUBJECT,
            body,
        );
        Ok(DeliveryStatus::Sent)
    }

    fn send_notice(
        &mut self,
        user: &User,
        message: &str,
    ) -> Result<DeliveryStatus, NotificationError> {
        if message.trim().is_empty() {
            return Err(NotificationError::invalid_argument(
                "message must not be empty",
            ));
        }
        if !self.enabled {
            return Ok(DeliveryStatus::Disabled);
        }
        if !user.has_valid_email() {
            return Ok(DeliveryStatus::InvalidRecipient);
        }

        self.deliver(
            NotificationKind::Notice,
            user.email(),
            NOTICE_SUBJECT,
            message.to_owned(),
        );
        Ok(DeliveryStatus::Sent)
    }

    fn send_bulk(&mut self, users: &[User], subject: &str, body: &str) -> usize {
        if !self.enabled || users.is_empty() {
            return 0;
        }
        let mut sent = 0;
        for user in users.iter().filter(|user| user.has_valid_email()) {
            self.deliver(NotificationKind::Bulk, user.email(), subject, body.to_owned());
            sent += 1;
        }
        sent
    }

    fn is_healthy(&self) -> bool {
        self.enabled
    }
}
