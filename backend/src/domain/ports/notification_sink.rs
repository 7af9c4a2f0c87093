//! Port abstraction for outbound user notifications.
//!
//! Sends that cannot go out because the sink is switched off are reported as
//! [`DeliveryStatus::Disabled`] rather than raised. Malformed arguments are
//! raised as [`NotificationError`], except for plain notices, which report an
//! unusable recipient softly as [`DeliveryStatus::InvalidRecipient`].

use crate::domain::{DeliveryStatus, User};

use super::define_port_error;

define_port_error! {
    /// Errors raised by notification sink adapters.
    pub enum NotificationError {
        /// A required argument was blank.
        InvalidArgument { message: String } => "notification rejected: {message}",
        /// The recipient address failed validation.
        InvalidRecipient { email: String } =>
            "a valid recipient address is required, got {email:?}",
    }
}

/// Outbound messaging port used by the lifecycle service.
#[cfg_attr(test, mockall::automock)]
pub trait NotificationSink: Send {
    /// Greet a newly registered user.
    fn send_welcome(&mut self, user: &User) -> Result<DeliveryStatus, NotificationError>;

    /// Deliver a password reset token. A blank token is rejected.
    fn send_password_reset(
        &mut self,
        user: &User,
        token: &str,
    ) -> Result<DeliveryStatus, NotificationError>;

    /// Deliver a free-form account notice.
    fn send_notice(&mut self, user: &User, message: &str)
    -> Result<DeliveryStatus, NotificationError>;

    /// Send the same message to every user with a valid address.
    ///
    /// Returns the number of messages sent; zero when `users` is empty or the
    /// sink is disabled.
    fn send_bulk(&mut self, users: &[User], subject: &str, body: &str) -> usize;

    /// Whether the sink can currently deliver.
    fn is_healthy(&self) -> bool;
}
