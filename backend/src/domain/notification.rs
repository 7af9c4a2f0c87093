//! Outbound notification records and delivery outcomes.
//!
//! A [`SentNotification`] is appended to the sink's log for every message that
//! goes out. [`DeliveryStatus`] is what a sink reports for a single send, and
//! [`NotificationOutcome`] is what the lifecycle service reports to its caller
//! for a best-effort side effect.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::Error;

/// Subject used for welcome messages.
pub const WELCOME_SUBJECT: &str = "Welcome!";
/// Subject used for password reset messages.
pub const PASSWORD_RESET_SUBJECT: &str = "Password reset";
/// Subject used for account notices.
pub const NOTICE_SUBJECT: &str = "Notification";

/// Category of a sent notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationKind {
    Welcome,
    PasswordReset,
    Notice,
    Bulk,
}

impl NotificationKind {
    /// Machine-readable kind code.
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::Welcome => "welcome",
            Self::PasswordReset => "password_reset",
            Self::Notice => "notice",
            Self::Bulk => "bulk",
        }
    }
}

/// Immutable log entry for a message handed to the sink.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SentNotification {
    pub kind: NotificationKind,
    pub recipient: String,
    pub subject: String,
    pub body: String,
    pub sent_at: DateTime<Utc>,
}

/// Result of a single send that did not raise.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeliveryStatus {
    /// The message was logged as sent.
    Sent,
    /// The sink is switched off; nothing was sent.
    Disabled,
    /// The recipient address failed validation; nothing was sent.
    InvalidRecipient,
}

impl DeliveryStatus {
    /// Whether the message went out.
    #[must_use]
    pub const fn is_sent(self) -> bool {
        matches!(self, Self::Sent)
    }
}

/// Outcome of a best-effort notification attached to a lifecycle operation.
#[derive(Debug, Clone, PartialEq)]
pub enum NotificationOutcome {
    /// The operation had nothing to announce.
    NotRequired,
    /// The notification was delivered.
    Sent,
    /// The sink declined the send without raising.
    Declined(DeliveryStatus),
    /// The sink raised; the error was logged and swallowed.
    Failed(Error),
}

impl NotificationOutcome {
    pub(crate) fn from_delivery(status: DeliveryStatus) -> Self {
        if status.is_sent() {
            Self::Sent
        } else {
            Self::Declined(status)
        }
    }
}

/// Value of a completed lifecycle operation plus the fate of its
/// best-effort notification.
///
/// The operation itself succeeded; `notification` records whether the side
/// effect did.
#[derive(Debug, Clone, PartialEq)]
pub struct Notified<T> {
    pub value: T,
    pub notification: NotificationOutcome,
}

impl<T> Notified<T> {
    /// Pair a value with a notification outcome.
    pub fn new(value: T, notification: NotificationOutcome) -> Self {
        Self {
            value,
            notification,
        }
    }

    /// Whether the side-effect notification was delivered.
    pub fn is_delivered(&self) -> bool {
        matches!(self.notification, NotificationOutcome::Sent)
    }

    /// Discard the notification outcome.
    pub fn into_value(self) -> T {
        self.value
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(NotificationKind::Welcome, "welcome")]
    #[case(NotificationKind::PasswordReset, "password_reset")]
    #[case(NotificationKind::Notice, "notice")]
    #[case(NotificationKind::Bulk, "bulk")]
    fn kind_codes_are_stable(#[case] kind: NotificationKind, #[case] code: &str) {
        assert_eq!(kind.code(), code);
        let serialised = serde_json::to_value(kind).expect("serialise kind");
        assert_eq!(serialised, serde_json::Value::String(code.to_owned()));
    }

    #[rstest]
    #[case(DeliveryStatus::Sent, NotificationOutcome::Sent)]
    #[case(
        DeliveryStatus::Disabled,
        NotificationOutcome::Declined(DeliveryStatus::Disabled)
    )]
    #[case(
        DeliveryStatus::InvalidRecipient,
        NotificationOutcome::Declined(DeliveryStatus::InvalidRecipient)
    )]
    fn delivery_status_maps_to_outcome(
        #[case] status: DeliveryStatus,
        #[case] expected: NotificationOutcome,
    ) {
        assert_eq!(NotificationOutcome::from_delivery(status), expected);
    }

    #[rstest]
    fn notified_reports_delivery() {
        let sent = Notified::new(7_u32, NotificationOutcome::Sent);
        assert!(sent.is_delivered());
        assert_eq!(sent.into_value(), 7);

        let failed = Notified::new((), NotificationOutcome::Failed(Error::internal("smtp down")));
        assert!(!failed.is_delivered());
    }
}
