use tracing_subscriber::fmt::time::UtcTime;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::LoggingConfig;

/// Environment variable naming a log file prefix. Takes precedence over
/// `logging.file`.
pub const LOG_ENV_VAR: &str = "LISTFORGE_LOG";

/// Initialize tracing.
///
/// The filter comes from `RUST_LOG`, falling back to `logging.filter`. With a
/// log file configured (through [`LOG_ENV_VAR`] or `logging.file`) events go
/// to a uniquely named file, `{path}.{timestamp}.{pid}`, so concurrent runs
/// never share one. Otherwise they go to stderr.
pub fn init_tracing(config: &LoggingConfig) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.filter))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    let log_path = std::env::var(LOG_ENV_VAR).ok().or_else(|| config.file.clone());

    let Some(log_path) = log_path else {
        let stderr_layer = fmt::layer()
            .with_writer(std::io::stderr)
            .with_timer(UtcTime::rfc_3339())
            .with_target(true);
        tracing_subscriber::registry()
            .with(filter)
            .with(stderr_layer)
            .init();
        return;
    };

    let unique_path = unique_log_path(&log_path);
    let Ok(file) = std::fs::File::create(&unique_path) else {
        eprintln!("Warning: Failed to create log file: {}", unique_path);
        return;
    };

    let file_layer = fmt::layer()
        .with_writer(file)
        .with_ansi(false)
        .with_timer(UtcTime::rfc_3339())
        .with_target(true)
        .with_level(true);

    tracing_subscriber::registry()
        .with(filter)
        .with(file_layer)
        .init();
}

fn unique_log_path(base: &str) -> String {
    let pid = std::process::id();
    let timestamp = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0);
    format!("{}.{}.{}", base, timestamp, pid)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn log_path_carries_timestamp_and_pid() {
        let path = unique_log_path("/tmp/listforge.log");
        let suffix = path
            .strip_prefix("/tmp/listforge.log.")
            .expect("prefix kept");
        let (timestamp, pid) = suffix.split_once('.').expect("two parts");
        assert!(timestamp.parse::<u64>().is_ok());
        assert_eq!(pid, std::process::id().to_string());
    }
}
