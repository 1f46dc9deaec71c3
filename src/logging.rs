//! Logging configuration with file-based output and size-based rotation.
//!
//! Writes logs to `~/.config/worldclock/worldclock.log` (or platform
//! equivalent) with 10 MB size-based rotation. Set `DEBUG_LOGGING=1` to enable
//! debug output for worldclock crates.

use rolling_file::{BasicRollingFileAppender, RollingConditionBasic};
use tracing_subscriber::{
    EnvFilter,
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

const LOG_FILE_NAME: &str = "worldclock.log";
const MAX_LOG_BYTES: u64 = 10 * 1024 * 1024;

fn filter_directive(debug_logging: bool) -> &'static str {
    if debug_logging {
        "info,worldclock=debug,worldclock_core=debug,worldclock_overlay=debug"
    } else {
        "info"
    }
}

/// Initialize logging with dual-output (file + stdout).
///
/// Returns a `WorkerGuard` that must be held for the application lifetime
/// so buffered logs are flushed on shutdown. Falls back to stdout-only
/// logging (and returns `None`) when the log directory is unusable.
pub fn init() -> Option<tracing_appender::non_blocking::WorkerGuard> {
    let debug_logging = std::env::var("DEBUG_LOGGING").is_ok();

    let Some(log_dir) = dirs::config_dir().map(|config| config.join("worldclock")) else {
        init_stdout_only(debug_logging);
        return None;
    };

    if let Err(e) = std::fs::create_dir_all(&log_dir) {
        // Can't use tracing yet since subscriber not initialized
        eprintln!(
            "Failed to create log directory {:?}: {}, using stdout only",
            log_dir, e
        );
        init_stdout_only(debug_logging);
        return None;
    }

    // Keep worldclock.log and worldclock.log.1
    let log_path = log_dir.join(LOG_FILE_NAME);
    let file_appender = match BasicRollingFileAppender::new(
        &log_path,
        RollingConditionBasic::new().max_size(MAX_LOG_BYTES),
        1,
    ) {
        Ok(appender) => appender,
        Err(e) => {
            eprintln!("Failed to create log file at {:?}: {}", log_path, e);
            init_stdout_only(debug_logging);
            return None;
        }
    };

    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    let file_layer = fmt::layer()
        .with_writer(non_blocking)
        .with_ansi(false)
        .with_target(true)
        .with_span_events(FmtSpan::NONE);

    let stdout_layer = fmt::layer()
        .with_writer(std::io::stdout)
        .with_target(true)
        .with_span_events(FmtSpan::NONE);

    tracing_subscriber::registry()
        .with(file_layer)
        .with(stdout_layer)
        .with(EnvFilter::new(filter_directive(debug_logging)))
        .init();

    tracing::info!(log_file = ?log_path, debug_logging, "World Clock logging initialized");

    Some(guard)
}

/// Fallback: stdout-only logging when file logging fails.
fn init_stdout_only(debug_logging: bool) {
    let stdout_layer = fmt::layer()
        .with_writer(std::io::stdout)
        .with_target(true)
        .with_span_events(FmtSpan::NONE);

    tracing_subscriber::registry()
        .with(stdout_layer)
        .with(EnvFilter::new(filter_directive(debug_logging)))
        .init();

    tracing::info!(debug_logging, "World Clock logging initialized (stdout only)");
}
