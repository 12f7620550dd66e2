// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Tracing subscriber setup for the CLI.
//!
//! The filter comes from `STINT_LOG`, then `RUST_LOG`, then the config's
//! `log_level`, else `warn`. Logs go to stderr unless a log file is
//! configured.

use std::fs;
use std::io::IsTerminal;
use std::path::Path;

use tracing_subscriber::EnvFilter;

/// Environment variable holding the log filter.
pub const LOG_ENV: &str = "STINT_LOG";

const DEFAULT_LEVEL: &str = "warn";

/// Picks the filter directive from the environment and config.
pub fn resolve_filter(
    stint_log: Option<String>,
    rust_log: Option<String>,
    config_level: Option<&str>,
) -> String {
    [stint_log, rust_log, config_level.map(String::from)]
        .into_iter()
        .flatten()
        .map(|s| s.trim().to_string())
        .find(|s| !s.is_empty())
        .unwrap_or_else(|| DEFAULT_LEVEL.to_string())
}

/// Installs the global subscriber. Safe to call more than once.
pub fn setup_logging(config_level: Option<&str>, log_path: Option<&Path>) {
    let directive = resolve_filter(
        std::env::var(LOG_ENV).ok(),
        std::env::var("RUST_LOG").ok(),
        config_level,
    );
    let filter = EnvFilter::try_new(&directive).unwrap_or_else(|_| EnvFilter::new(DEFAULT_LEVEL));

    // Try to open log file, fall back to stderr
    let file = log_path.and_then(|path| {
        if let Some(parent) = path.parent() {
            let _ = fs::create_dir_all(parent);
        }
        fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .ok()
    });

    let result = match file {
        Some(file) => tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(file)
            .with_ansi(false)
            .try_init(),
        None => tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .with_ansi(std::io::stderr().is_terminal())
            .try_init(),
    };
    if result.is_err() {
        tracing::debug!("tracing subscriber already installed");
    }
}

#[cfg(test)]
#[path = "logging_tests.rs"]
mod tests;
