//! Domain ports for the hexagonal boundary.
//!
//! Ports describe how the lifecycle service expects to talk to driven
//! adapters: the user record store, the notification sink, the reset-token
//! source and the latency simulator used by sink adapters. Fallible ports
//! expose typed errors so the service can map them onto [`crate::domain::Error`].

mod macros;
pub(crate) use macros::define_port_error;

mod notification_sink;
mod reset_token_generator;
mod sleeper;
mod user_store;

#[cfg(test)]
pub use notification_sink::MockNotificationSink;
pub use notification_sink::{NotificationError, NotificationSink};
#[cfg(test)]
pub use reset_token_generator::MockResetTokenGenerator;
pub use reset_token_generator::{RESET_TOKEN_LEN, ResetTokenGenerator, UuidResetTokenGenerator};
pub use sleeper::{NoopSleeper, Sleeper, ThreadSleeper};
#[cfg(test)]
pub use user_store::MockUserStore;
pub use user_store::{UserStore, UserStoreError};
