//! User lifecycle library.
//!
//! The domain layer holds the user record, orders, notification log entries
//! and the [`domain::UserLifecycleService`] orchestrator. Outbound adapters
//! provide in-memory implementations of the store and notification ports.

pub mod bootstrap;
pub mod config;
pub mod domain;
pub mod outbound;
pub mod telemetry;

pub use bootstrap::{InMemoryLifecycleService, in_memory_service, in_memory_service_with_clock};
pub use config::LifecycleSettings;
