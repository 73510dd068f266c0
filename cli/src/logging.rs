//! Logging configuration with file-based output and size-based rotation.
//!
//! Writes logs to `~/.config/evalboard/evalboard.log` (or platform
//! equivalent) with 10 MB size-based rotation. Set `DEBUG_LOGGING=1` to
//! enable debug output for evalboard crates.

use rolling_file::{BasicRollingFileAppender, RollingConditionBasic};
use tracing_subscriber::{
    EnvFilter,
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

const DEBUG_DIRECTIVE: &str = "info,evalboard_cli=debug,evalboard_core=debug";

/// Initialize logging with dual output (file + stderr).
///
/// Returns a `WorkerGuard` that must be held for the process lifetime so
/// buffered lines are flushed on exit. Falls back to stderr-only logging
/// when the log directory or file cannot be created.
pub fn init() -> Option<tracing_appender::non_blocking::WorkerGuard> {
    let debug_logging = std::env::var("DEBUG_LOGGING").is_ok();

    // Get config directory: ~/.config/evalboard on Linux, %APPDATA%/evalboard on Windows
    let log_dir = match dirs::config_dir() {
        Some(config) => config.join("evalboard"),
        None => {
            // Fallback: stderr-only logging
            init_stderr_only(debug_logging);
            return None;
        }
    };

    // Create log directory if needed
    if let Err(e) = std::fs::create_dir_all(&log_dir) {
        // Subscriber not installed yet
        eprintln!(
            "Failed to create log directory {:?}: {}, using stderr only",
            log_dir, e
        );
        init_stderr_only(debug_logging);
        return None;
    }

    // Create size-based rolling file appender (10 MB, keep 1 rotated file)
    let log_path = log_dir.join("evalboard.log");
    let file_appender = match BasicRollingFileAppender::new(
        &log_path,
        RollingConditionBasic::new().max_size(10 * 1024 * 1024), // 10 MB
        1, // evalboard.log and evalboard.log.1
    ) {
        Ok(appender) => appender,
        Err(e) => {
            eprintln!("Failed to create log file at {:?}: {}", log_path, e);
            init_stderr_only(debug_logging);
            return None;
        }
    };

    // Wrap in non-blocking writer
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    // File layer: no ANSI colors
    let file_layer = fmt::layer()
        .with_writer(non_blocking)
        .with_ansi(false)
        .with_target(true)
        .with_span_events(FmtSpan::NONE);

    // Stderr layer; stdout is reserved for command output
    let stderr_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_span_events(FmtSpan::NONE);

    // Single filter for both layers
    tracing_subscriber::registry()
        .with(file_layer)
        .with(stderr_layer)
        .with(filter(debug_logging))
        .init();

    tracing::info!(log_file = ?log_path, debug_logging, "evalboard logging initialized");

    Some(guard)
}

/// Fallback: Initialize stderr-only logging when file logging fails.
fn init_stderr_only(debug_logging: bool) {
    let stderr_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_span_events(FmtSpan::NONE);

    tracing_subscriber::registry()
        .with(stderr_layer)
        .with(filter(debug_logging))
        .init();

    tracing::info!(debug_logging, "evalboard logging initialized (stderr only)");
}

/// Build filter directives based on DEBUG_LOGGING
fn filter(debug_logging: bool) -> EnvFilter {
    if debug_logging {
        // DEBUG_LOGGING=1: debug for evalboard crates, info for dependencies
        EnvFilter::new(DEBUG_DIRECTIVE)
    } else {
        // Default: INFO+ level for everything
        EnvFilter::new("info")
    }
}
