//! In-memory adapters for the user store and notification sink.

mod notification_sink;
mod user_store;

pub use notification_sink::InMemoryNotificationSink;
pub use user_store::InMemoryUserStore;
