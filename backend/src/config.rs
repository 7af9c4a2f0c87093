//! Lifecycle settings loaded via OrthoConfig.

use std::time::Duration;

use ortho_config::OrthoConfig;
use serde::Deserialize;

/// Settings controlling the notification sink and log output.
///
/// Values come from `USER_LIFECYCLE_*` environment variables, configuration
/// files and command-line flags, in OrthoConfig's usual precedence.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "USER_LIFECYCLE")]
pub struct LifecycleSettings {
    /// Whether the notification sink starts enabled.
    #[ortho_config(default = true)]
    pub notifications_enabled: bool,
    /// Simulated latency per send, in milliseconds. Zero disables it.
    #[ortho_config(default = 10)]
    pub notification_delay_ms: u64,
    /// Emit JSON log lines instead of the compact format.
    #[ortho_config(default = false)]
    pub json_logs: bool,
}

impl LifecycleSettings {
    /// Simulated latency per send.
    pub fn notification_delay(&self) -> Duration {
        Duration::from_millis(self.notification_delay_ms)
    }
}
