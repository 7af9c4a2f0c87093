//! Shared fixtures and recording doubles for lifecycle integration suites.

use std::sync::{Arc, Mutex};

use chrono::{DateTime, Local, TimeZone, Utc};
use mockable::Clock;
use user_lifecycle::domain::ports::{NotificationError, NotificationSink};
use user_lifecycle::domain::{DeliveryStatus, User, UserLifecycleService};
use user_lifecycle::outbound::memory::{InMemoryNotificationSink, InMemoryUserStore};

/// Timestamp reported by [`FixtureClock`].
pub fn fixture_timestamp() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 5, 12, 14, 0, 0)
        .single()
        .expect("valid fixture timestamp")
}

/// Clock frozen at [`fixture_timestamp`].
#[derive(Debug, Clone, Copy, Default)]
pub struct FixtureClock;

impl Clock for FixtureClock {
    fn local(&self) -> DateTime<Local> {
        fixture_timestamp().with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        fixture_timestamp()
    }
}

/// Service over the in-memory adapters with a frozen clock and no delay.
pub fn in_memory_service() -> UserLifecycleService<InMemoryUserStore, InMemoryNotificationSink> {
    UserLifecycleService::new(
        InMemoryUserStore::new(),
        InMemoryNotificationSink::new(Arc::new(FixtureClock)),
        Arc::new(FixtureClock),
    )
}

/// Service over the in-memory store and a recording sink.
///
/// Returns a handle to the sink that shares its call log with the copy the
/// service owns.
pub fn spied_service(
    response: SinkResponse,
) -> (
    UserLifecycleService<InMemoryUserStore, RecordingNotificationSink>,
    RecordingNotificationSink,
) {
    let sink = RecordingNotificationSink::new(response);
    let service = UserLifecycleService::new(
        InMemoryUserStore::new(),
        sink.clone(),
        Arc::new(FixtureClock),
    );
    (service, sink)
}

/// Arguments captured by [`RecordingNotificationSink`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NotificationCall {
    Welcome {
        email: String,
    },
    PasswordReset {
        email: String,
        token: String,
    },
    Notice {
        email: String,
        message: String,
    },
    Bulk {
        recipients: Vec<String>,
        subject: String,
        body: String,
    },
}

/// Configured reply for single-recipient sends.
#[derive(Debug, Clone)]
pub enum SinkResponse {
    Status(DeliveryStatus),
    Error(NotificationError),
}

/// Spy sink recording every call and replying with a configured response.
#[derive(Clone)]
pub struct RecordingNotificationSink {
    calls: Arc<Mutex<Vec<NotificationCall>>>,
    response: Arc<Mutex<SinkResponse>>,
}

impl RecordingNotificationSink {
    pub fn new(response: SinkResponse) -> Self {
        Self {
            calls: Arc::new(Mutex::new(Vec::new())),
            response: Arc::new(Mutex::new(response)),
        }
    }

    pub fn calls(&self) -> Vec<NotificationCall> {
        self.calls.lock().expect("notification calls lock").clone()
    }

    pub fn set_response(&self, response: SinkResponse) {
        *self.response.lock().expect("notification response lock") = response;
    }

    fn record(&self, call: NotificationCall) -> Result<DeliveryStatus, NotificationError> {
        self.calls
            .lock()
            .expect("notification calls lock")
            .push(call);
        match self
            .response
            .lock()
            .expect("notification response lock")
            .clone()
        {
            SinkResponse::Status(status) => Ok(status),
            SinkResponse::Error(error) => Err(error),
        }
    }
}

impl NotificationSink for RecordingNotificationSink {
    fn send_welcome(&mut self, user: &User) -> Result<DeliveryStatus, NotificationError> {
        self.record(NotificationCall::Welcome {
            email: user.email().to_owned(),
        })
    }

    fn send_password_reset(
        &mut self,
        user: &User,
        token: &str,
    ) -> Result<DeliveryStatus, NotificationError> {
        self.record(NotificationCall::PasswordReset {
            email: user.email().to_owned(),
            token: token.to_owned(),
        })
    }

    fn send_notice(
        &mut self,
        user: &User,
        message: &str,
    ) -> Result<DeliveryStatus, NotificationError> {
        self.record(NotificationCall::Notice {
            email: user.email().to_owned(),
            message: message.to_owned(),
        })
    }

    fn send_bulk(&mut self, users: &[User], subject: &str, body: &str) -> usize {
        self.calls
            .lock()
            .expect("notification calls lock")
            .push(NotificationCall::Bulk {
                recipients: users.iter().map(|user| user.email().to_owned()).collect(),
                subject: subject.to_owned(),
                body: body.to_owned(),
            });
        users.len()
    }

    fn is_healthy(&self) -> bool {
        true
    }
}
