// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]

use super::*;
use std::sync::Mutex;

// Serializes tests that modify environment variables
static ENV_MUTEX: Mutex<()> = Mutex::new(());

fn with_env<F: FnOnce()>(vars: &[(&str, Option<&str>)], f: F) {
    let _guard = ENV_MUTEX.lock().unwrap();
    let saved: Vec<(String, Option<String>)> = vars
        .iter()
        .map(|(k, _)| (k.to_string(), std::env::var(k).ok()))
        .collect();

    for (k, v) in vars {
        match v {
            Some(v) => std::env::set_var(k, v),
            None => std::env::remove_var(k),
        }
    }

    f();

    for (k, v) in saved {
        match v {
            Some(v) => std::env::set_var(&k, v),
            None => std::env::remove_var(&k),
        }
    }
}

#[test]
fn system_accounts() {
    assert!(is_system_account("root"));
    assert!(is_system_account("ROOT"));
    assert!(is_system_account("daemon"));
    assert!(is_system_account("nobody"));
    assert!(!is_system_account("alice"));
}

#[test]
fn user_name_is_never_empty() {
    assert!(!get_user_name().is_empty());
}

#[test]
fn detect_prefers_env_overrides() {
    with_env(
        &[(ACTOR_ID_ENV, Some("u-42")), (ACTOR_NAME_ENV, Some("Ada"))],
        || {
            assert_eq!(Actor::detect(), Actor::new("u-42", "Ada"));
        },
    );
}

#[test]
fn detect_id_defaults_to_name() {
    with_env(
        &[(ACTOR_ID_ENV, None), (ACTOR_NAME_ENV, Some("Grace"))],
        || {
            let actor = Actor::detect();
            assert_eq!(actor.id, "Grace");
            assert_eq!(actor.name, "Grace");
        },
    );
}

#[test]
fn blank_override_is_ignored() {
    with_env(
        &[(ACTOR_ID_ENV, Some("  ")), (ACTOR_NAME_ENV, Some("Linus"))],
        || {
            assert_eq!(Actor::detect().id, "Linus");
        },
    );
}

#[test]
fn unix_username_falls_through_to_logname() {
    with_env(&[("USER", None), ("LOGNAME", Some("testlogname"))], || {
        assert_eq!(get_unix_username(), Some("testlogname".to_string()));
    });
}

#[test]
fn unix_username_empty_returns_none() {
    with_env(&[("USER", Some("")), ("LOGNAME", None)], || {
        assert_eq!(get_unix_username(), None);
    });
}
