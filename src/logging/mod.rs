//! Application logging
//!
//! Console output goes to stderr without timestamps. When the config
//! directory exists, a daily log file is written to its logs/ folder too.

use crate::core::config_file::ConfigFile;
use std::fs;
use std::path::PathBuf;
use tracing::debug;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Environment variable holding a filter directive, e.g. `anchor_dropper=debug`
pub const LOG_ENV_VAR: &str = "ANCHOR_DROPPER_LOG";

const LOG_FILE_PREFIX: &str = "anchor-dropper.log";

/// Get the path to the logs directory
pub fn logs_dir() -> PathBuf {
    ConfigFile::logs_dir()
}

/// Filter used when the environment does not set one
fn default_directive(verbose: bool) -> &'static str {
    if verbose {
        "anchor_dropper=debug"
    } else {
        "anchor_dropper=info"
    }
}

fn build_filter(verbose: bool) -> EnvFilter {
    EnvFilter::try_from_env(LOG_ENV_VAR).unwrap_or_else(|_| EnvFilter::new(default_directive(verbose)))
}

/// Install the global subscriber.
///
/// The returned guard flushes the log file when dropped, so keep it alive
/// for the life of the process.
pub fn init(verbose: bool) -> Option<WorkerGuard> {
    let console = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time();

    let (file_layer, guard) = match file_writer() {
        Some((writer, guard)) => {
            let layer = fmt::layer().with_ansi(false).with_writer(writer);
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    let installed = tracing_subscriber::registry()
        .with(build_filter(verbose))
        .with(console)
        .with(file_layer)
        .try_init();

    if installed.is_ok() {
        debug!(
            "=== anchor-dropper started at {} ===",
            chrono::Utc::now().format("%Y-%m-%d %H:%M:%S UTC")
        );
    }
    guard
}

/// A non-blocking daily log file, if the config directory is set up
fn file_writer() -> Option<(tracing_appender::non_blocking::NonBlocking, WorkerGuard)> {
    // Only log to file once the user has created a config directory
    if !ConfigFile::config_dir().exists() {
        return None;
    }
    let logs_dir = logs_dir();
    if let Err(e) = fs::create_dir_all(&logs_dir) {
        eprintln!("Failed to create logs directory {:?}: {}", logs_dir, e);
        return None;
    }
    let appender = tracing_appender::rolling::daily(&logs_dir, LOG_FILE_PREFIX);
    Some(tracing_appender::non_blocking(appender))
}
