use std::sync::{Once, OnceLock};

use chrono::Utc;
use tracing_appender::{non_blocking::WorkerGuard, rolling};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

static INIT_LOG: Once = Once::new();
static LOG_GUARD: OnceLock<WorkerGuard> = OnceLock::new();

/// Initialise logging exactly once for the whole process.
///
/// Events go both to stdout and to a rolling log file, one file per run.
/// The `RUST_LOG` environment variable overrides the passed filter.
pub fn log_init(filter: String, log_path: Option<String>) {
    INIT_LOG.call_once(|| {
        let started_at = Utc::now().format("%Y%m%dT%H%M%S");

        let log_directory = log_path.unwrap_or_else(|| String::from("logs"));

        let file_appender = rolling::Builder::new()
            .rotation(rolling::Rotation::DAILY)
            .filename_prefix("vault-maker")
            .filename_suffix(format!("{}.log", started_at))
            .build(log_directory)
            .expect("Failed to create rolling file appender");

        let (non_blocking_file_writer, guard) = tracing_appender::non_blocking(file_appender);

        LOG_GUARD
            .set(guard)
            .expect("Failed to store worker guard");

        let file_layer = tracing_subscriber::fmt::layer()
            .with_writer(non_blocking_file_writer)
            .with_ansi(false);

        let stdout_layer = tracing_subscriber::fmt::layer()
            .with_writer(std::io::stdout)
            .with_ansi(true);

        let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into());

        tracing_subscriber::registry()
            .with(env_filter)
            .with(file_layer)
            .with(stdout_layer)
            .init();
    });
}

/// Initialise logging with an `info` filter for the calling crate.
#[macro_export]
macro_rules! init_log {
    () => {
        log_init(format!("{}=info", env!("CARGO_CRATE_NAME")), None);
    };
    ($log_path:expr) => {
        log_init(format!("{}=info", env!("CARGO_CRATE_NAME")), $log_path);
    };
}
