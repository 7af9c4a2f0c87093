//! Console walk-through of the user lifecycle over the in-memory adapters.
#![cfg_attr(not(any(test, doctest)), deny(clippy::unwrap_used))]
#![cfg_attr(not(any(test, doctest)), deny(clippy::expect_used))]

use std::ffi::OsString;
use std::io::{self, Write};

use clap::Parser;
use ortho_config::OrthoConfig;

use user_lifecycle::domain::{Error, UserId};
use user_lifecycle::{LifecycleSettings, in_memory_service, telemetry};

/// `user-lifecycle-demo` command arguments.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "user-lifecycle-demo",
    about = "Register, log in and update a user, then print stats and sent notifications",
    version
)]
struct CliArgs {
    /// Display name to register.
    #[arg(long, value_name = "name", default_value = "Alice")]
    name: String,
    /// Contact address to register.
    #[arg(long, value_name = "address", default_value = "alice@example.com")]
    email: String,
    /// Login secret (at least six characters).
    #[arg(long, value_name = "secret", default_value = "secret1")]
    secret: String,
    /// Display name applied by the profile update step.
    #[arg(long = "new-name", value_name = "name", default_value = "Alice Liddell")]
    new_name: String,
}

fn main() -> io::Result<()> {
    let args = CliArgs::try_parse().map_err(io::Error::other)?;
    let settings = LifecycleSettings::load_from_iter([OsString::from("user-lifecycle-demo")])
        .map_err(|error| io::Error::other(format!("load settings: {error}")))?;
    telemetry::init(settings.json_logs);

    let lines = run(&args, &settings).map_err(demo_failed)?;
    let mut stdout = io::stdout().lock();
    for line in lines {
        writeln!(stdout, "{line}")?;
    }
    Ok(())
}

fn demo_failed(error: Error) -> io::Error {
    io::Error::other(format!("lifecycle demo failed: {error}"))
}

fn run(args: &CliArgs, settings: &LifecycleSettings) -> Result<Vec<String>, Error> {
    let mut service = in_memory_service(settings);
    let mut lines = Vec::new();

    let registered = service.register(&args.name, &args.email, &args.secret)?;
    let id: UserId = registered
        .value
        .id()
        .ok_or_else(|| Error::internal("store returned a user without an id"))?;
    lines.push(format!(
        "registered {} <{}> as user {id} (welcome delivered: {})",
        registered.value.display_label(),
        registered.value.email(),
        registered.is_delivered()
    ));

    let logged_in = service.login(&args.email, &args.secret).is_some();
    lines.push(format!("login succeeded: {logged_in}"));

    let updated = service.update_profile(id, Some(&args.new_name), None)?;
    lines.push(format!("display name is now {}", updated.value.display_label()));

    lines.push(format!("stats: {}", service.stats()));

    let sent = service.sink().sent();
    lines.push(format!("sent notifications: {}", sent.len()));
    for entry in sent {
        lines.push(format!(
            "  [{}] to {}: {}",
            entry.kind.code(),
            entry.recipient,
            entry.subject
        ));
    }
    Ok(lines)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use user_lifecycle::domain::ErrorCode;

    fn settings() -> LifecycleSettings {
        LifecycleSettings {
            notifications_enabled: true,
            notification_delay_ms: 0,
            json_logs: false,
        }
    }

    fn args(secret: &str) -> CliArgs {
        CliArgs::parse_from(["user-lifecycle-demo", "--secret", secret])
    }

    #[rstest]
    fn run_reports_each_step() {
        let lines = run(&args("secret1"), &settings()).expect("demo succeeds");
        assert_eq!(lines[1], "login succeeded: true");
        assert_eq!(lines[2], "display name is now Alice Liddell");
        assert_eq!(lines[3], "stats: 1 users (1 active, 0 inactive)");
        assert_eq!(lines[4], "sent notifications: 1");
    }

    #[rstest]
    fn failures_surface_once_through_the_returned_error() {
        let error = run(&args("short"), &settings()).expect_err("secret too short");
        assert_eq!(error.code(), ErrorCode::InvalidRequest);

        let reported = demo_failed(error.clone());
        assert_eq!(reported.kind(), io::ErrorKind::Other);
        assert_eq!(
            reported.to_string(),
            format!("lifecycle demo failed: {error}")
        );
    }
}
