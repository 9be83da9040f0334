use tracing_subscriber::EnvFilter;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Environment variable naming the log file
pub const LOG_PATH_ENV: &str = "SHOPPING_LIST_LOG";

const DEFAULT_FILTER: &str = "info";

/// Initialize tracing with optional file output.
///
/// Logging is off unless `SHOPPING_LIST_LOG` names a file, since anything
/// written to the terminal would corrupt the TUI. `RUST_LOG` wins over the
/// configured filter, which wins over `info`.
pub fn init_tracing(config_filter: Option<&str>) {
    let Some(log_path) = std::env::var(LOG_PATH_ENV).ok().filter(|p| !p.is_empty()) else {
        return;
    };

    let Ok(file) = std::fs::File::create(&log_path) else {
        eprintln!("Warning: Failed to create log file: {}", log_path);
        return;
    };

    let file_layer = fmt::layer()
        .with_writer(file)
        .with_ansi(false)
        .with_target(true)
        .with_level(true);

    let _ = tracing_subscriber::registry()
        .with(build_filter(config_filter))
        .with(file_layer)
        .try_init();
}

fn build_filter(config_filter: Option<&str>) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| filter_or_default(config_filter))
}

fn filter_or_default(config_filter: Option<&str>) -> EnvFilter {
    config_filter
        .and_then(|f| EnvFilter::try_new(f).ok())
        .unwrap_or_else(|| EnvFilter::new(DEFAULT_FILTER))
}
