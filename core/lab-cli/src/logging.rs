//! Logging setup for the regex-lab binary.
//!
//! Logs go to a daily-rolling file under `~/.regex-lab/logs` so they never
//! interleave with session output. If that directory can't be created we fall
//! back to stderr.

use std::env;

use regex_lab_core::StoragePaths;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

const LOG_FILE_PREFIX: &str = "regex-lab.log";

fn env_filter() -> EnvFilter {
    let debug_enabled = env::var("REGEX_LAB_DEBUG_LOG")
        .map(|value| matches!(value.as_str(), "1" | "true" | "TRUE" | "yes" | "YES"))
        .unwrap_or(false);
    if debug_enabled {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_env("REGEX_LAB_LOG").unwrap_or_else(|_| EnvFilter::new("info"))
    }
}

/// Installs the global subscriber. Keep the guard alive until exit.
pub fn init(paths: Option<&StoragePaths>) -> Option<WorkerGuard> {
    let logs_dir = paths.map(|p| p.logs_dir());

    if let Some(dir) = logs_dir.filter(|dir| fs_err::create_dir_all(dir).is_ok()) {
        let appender = tracing_appender::rolling::daily(dir, LOG_FILE_PREFIX);
        let (writer, guard) = tracing_appender::non_blocking(appender);
        tracing_subscriber::fmt()
            .with_env_filter(env_filter())
            .with_writer(writer)
            .with_ansi(false)
            .init();
        return Some(guard);
    }

    tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .with_writer(std::io::stderr)
        .init();
    None
}
