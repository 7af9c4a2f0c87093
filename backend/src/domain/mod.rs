//! Domain primitives, aggregates and services.
//!
//! Purpose: define the user record, notification log entries and orders,
//! the domain error returned to callers, and the lifecycle service that
//! drives users through registration, login, profile changes, password
//! resets and (de)activation.
//!
//! Public surface:
//! - Error / ErrorCode — error payload with a stable machine-readable code.
//! - User / UserId — user record and its store-assigned identifier.
//! - SentNotification / DeliveryStatus / Notified — notification log entries
//!   and best-effort delivery reporting.
//! - Order / OrderItem / OrderStatus — orders placed by users.
//! - UserLifecycleService — the orchestrator over the ports in [`ports`].

pub mod error;
pub mod notification;
pub mod order;
pub mod ports;
pub mod user;
pub mod user_lifecycle;

pub use self::error::{Error, ErrorCode, ErrorValidationError};
pub use self::notification::{
    DeliveryStatus, NOTICE_SUBJECT, NotificationKind, NotificationOutcome, Notified,
    PASSWORD_RESET_SUBJECT, SentNotification, WELCOME_SUBJECT,
};
pub use self::order::{Order, OrderId, OrderItem, OrderStateError, OrderStatus};
pub use self::user::{
    SECRET_MIN, UNKNOWN_DISPLAY_NAME, User, UserId, UserValidationError, is_valid_email,
    validate_secret,
};
pub use self::user_lifecycle::{
    DEACTIVATED_MESSAGE, EMAIL_CHANGED_MESSAGE, HealthReport, REACTIVATED_MESSAGE,
    UserLifecycleService, UserStats,
};

/// Result alias for lifecycle operations.
///
/// # Examples
/// ```
/// use user_lifecycle::domain::{DomainResult, Error};
///
/// fn lookup() -> DomainResult<u64> {
///     Err(Error::not_found("user 7 not found"))
/// }
///
/// assert!(lookup().is_err());
/// ```
pub type DomainResult<T> = Result<T, Error>;
