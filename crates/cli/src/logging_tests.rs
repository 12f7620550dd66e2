// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

#![allow(clippy::unwrap_used)]

use super::*;
use yare::parameterized;

fn s(v: &str) -> Option<String> {
    Some(v.to_string())
}

#[parameterized(
    nothing_set = { None, None, None, "warn" },
    config_only = { None, None, Some("info"), "info" },
    rust_log_beats_config = { None, s("debug"), Some("info"), "debug" },
    stint_log_beats_all = { s("trace"), s("debug"), Some("info"), "trace" },
    blank_is_skipped = { s("  "), None, Some("info"), "info" },
)]
fn test_resolve_filter(
    stint_log: Option<String>,
    rust_log: Option<String>,
    config: Option<&str>,
    expected: &str,
) {
    assert_eq!(resolve_filter(stint_log, rust_log, config), expected);
}

#[test]
fn test_setup_logging_twice_is_harmless() {
    let dir = tempfile::tempdir().unwrap();
    let log = dir.path().join("logs").join("stint.log");
    setup_logging(Some("info"), Some(&log));
    setup_logging(None, None);
    assert!(log.exists());
}
