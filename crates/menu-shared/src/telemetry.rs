//! Telemetry setup

use tracing::info;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::LogSettings;

/// Installs the global subscriber.
///
/// The terminal belongs to the interactive prompts, so with a log directory
/// configured events are written as JSON to a daily rolling file; otherwise
/// they go to stderr. Keep the returned guard alive until exit so buffered
/// lines are flushed.
pub fn init_telemetry(settings: &LogSettings, app_name: &str) -> Option<WorkerGuard> {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&settings.level));

    match &settings.directory {
        Some(directory) => {
            let appender = tracing_appender::rolling::daily(directory, format!("{}.log", app_name));
            let (writer, guard) = tracing_appender::non_blocking(appender);
            tracing_subscriber::registry()
                .with(env_filter)
                .with(fmt::layer().json().with_writer(writer))
                .init();
            info!(app = app_name, directory = %directory, "Logging to rolling file");
            Some(guard)
        }
        None => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(fmt::layer().compact().with_writer(std::io::stderr))
                .init();
            info!(app = app_name, "Logging to stderr");
            None
        }
    }
}
