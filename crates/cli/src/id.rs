// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Work id generation.

use chrono::{DateTime, Utc};
use sha2::{Digest, Sha256};
use stint_core::db::format_timestamp;

/// Generate a work id from project, name, and creation time.
/// Format: {project}-{hash} where hash is first 8 hex chars of SHA256(name + timestamp)
pub fn generate_id(project: &str, name: &str, created_at: &DateTime<Utc>) -> String {
    let input = format!("{}{}", name, format_timestamp(created_at));
    let hash = Sha256::digest(input.as_bytes());
    format!("{}-{}", project, hex::encode(&hash[..4]))
}

/// Generate a unique id, appending an incrementing suffix on collision.
pub fn generate_unique_id<F>(
    project: &str,
    name: &str,
    created_at: &DateTime<Utc>,
    exists: F,
) -> String
where
    F: Fn(&str) -> bool,
{
    let base_id = generate_id(project, name, created_at);
    if !exists(&base_id) {
        return base_id;
    }

    let mut suffix = 2;
    loop {
        let id = format!("{}-{}", base_id, suffix);
        if !exists(&id) {
            return id;
        }
        suffix += 1;
    }
}

/// Validate a project id (2+ lowercase alphanumeric with at least one letter)
pub fn validate_project(project: &str) -> bool {
    project.len() >= 2
        && project
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit())
        && project.chars().any(|c| c.is_ascii_lowercase())
}

#[cfg(test)]
#[path = "id_tests.rs"]
mod tests;
