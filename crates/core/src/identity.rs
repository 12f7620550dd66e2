// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Acting identity attributed to transitions.
//!
//! The engine never authenticates an [`Actor`]; it only records who made each
//! move. Permission checks happen before a transition is requested.

#[cfg(test)]
#[path = "identity_tests.rs"]
mod tests;

use serde::{Deserialize, Serialize};
use std::process::Command;

/// Environment variable overriding the actor id.
pub const ACTOR_ID_ENV: &str = "STINT_ACTOR_ID";
/// Environment variable overriding the actor display name.
pub const ACTOR_NAME_ENV: &str = "STINT_ACTOR_NAME";

/// Who performed a change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Actor {
    pub id: String,
    pub name: String,
}

impl Actor {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Actor {
            id: id.into(),
            name: name.into(),
        }
    }

    /// Detects the local actor.
    ///
    /// The name resolves from `STINT_ACTOR_NAME`, then git `user.name`, then
    /// the Unix username (skipping system accounts), then "human". The id
    /// comes from `STINT_ACTOR_ID` and defaults to the name.
    pub fn detect() -> Self {
        let name = env_value(ACTOR_NAME_ENV).unwrap_or_else(get_user_name);
        let id = env_value(ACTOR_ID_ENV).unwrap_or_else(|| name.clone());
        Actor { id, name }
    }
}

/// Returns the current user's display name for audit purposes.
///
/// Resolution order:
/// 1. Git config user.name (display name only, never email)
/// 2. Unix username from USER or LOGNAME env var (if not system account)
/// 3. Fallback to "human"
pub fn get_user_name() -> String {
    if let Some(name) = get_git_user_name() {
        return name;
    }

    if let Some(name) = get_unix_username() {
        if !is_system_account(&name) {
            return name;
        }
    }

    "human".to_string()
}

fn env_value(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

fn get_git_user_name() -> Option<String> {
    let output = Command::new("git")
        .args(["config", "--get", "user.name"])
        .output()
        .ok()?;

    if output.status.success() {
        let name = String::from_utf8_lossy(&output.stdout).trim().to_string();
        if !name.is_empty() {
            return Some(name);
        }
    }
    None
}

fn get_unix_username() -> Option<String> {
    std::env::var("USER")
        .or_else(|_| std::env::var("LOGNAME"))
        .ok()
        .filter(|s| !s.is_empty())
}

fn is_system_account(name: &str) -> bool {
    matches!(
        name.to_lowercase().as_str(),
        "root" | "system" | "administrator" | "admin" | "daemon" | "nobody"
    )
}
