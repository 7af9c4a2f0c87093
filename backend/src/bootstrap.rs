//! Composition root for the in-memory lifecycle service.

use std::sync::Arc;

use mockable::{Clock, DefaultClock};

use crate::config::LifecycleSettings;
use crate::domain::UserLifecycleService;
use crate::domain::ports::ThreadSleeper;
use crate::outbound::memory::{InMemoryNotificationSink, InMemoryUserStore};

/// Lifecycle service backed by the in-memory adapters.
pub type InMemoryLifecycleService =
    UserLifecycleService<InMemoryUserStore, InMemoryNotificationSink>;

/// Build a service over a fresh store and sink, using the system clock.
pub fn in_memory_service(settings: &LifecycleSettings) -> InMemoryLifecycleService {
    in_memory_service_with_clock(settings, Arc::new(DefaultClock))
}

/// Build a service over a fresh store and sink, taking timestamps from `clock`.
pub fn in_memory_service_with_clock(
    settings: &LifecycleSettings,
    clock: Arc<dyn Clock>,
) -> InMemoryLifecycleService {
    let mut sink = InMemoryNotificationSink::new(Arc::clone(&clock))
        .with_delay(settings.notification_delay(), Arc::new(ThreadSleeper));
    sink.set_enabled(settings.notifications_enabled);
    UserLifecycleService::new(InMemoryUserStore::new(), sink, clock)
}
