// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use std::path::{Path, PathBuf};

use stint_core::Database;

use crate::config::{get_db_path, init_work_dir, write_gitignore, Config};
use crate::error::{Error, Result};
use crate::id::validate_project;

pub fn run(project: Option<String>, path: Option<String>) -> Result<()> {
    let target_path = match path {
        Some(p) => PathBuf::from(p),
        None => std::env::current_dir()?,
    };
    let work_dir = run_impl(&target_path, project)?;
    let config = Config::load(&work_dir)?;

    println!("Initialized stint project at {}", work_dir.display());
    println!("Project: {}", config.project);
    Ok(())
}

/// Creates `.stint/`, its config and an empty database. Returns the work dir.
pub(crate) fn run_impl(target_path: &Path, project: Option<String>) -> Result<PathBuf> {
    let project = match project {
        Some(p) => p,
        None => derive_project_from_path(target_path)?,
    };
    if !validate_project(&project) {
        return Err(Error::InvalidProject);
    }

    let work_dir = init_work_dir(target_path, &project)?;
    let config = Config::load(&work_dir)?;
    Database::open(&get_db_path(&work_dir, &config))?;
    write_gitignore(&work_dir)?;

    tracing::info!(project = %project, path = %work_dir.display(), "initialized project");
    Ok(work_dir)
}

/// Derives a project id from the directory name: lowercase alphanumerics only.
pub(crate) fn derive_project_from_path(path: &Path) -> Result<String> {
    let dir_name = path
        .file_name()
        .and_then(|n| n.to_str())
        .ok_or_else(|| Error::CannotDerive {
            item: "project id",
            from: path.display().to_string(),
        })?;

    let project: String = dir_name
        .chars()
        .filter(|c| c.is_ascii_alphanumeric())
        .map(|c| c.to_ascii_lowercase())
        .collect();

    if validate_project(&project) {
        Ok(project)
    } else {
        Err(Error::CannotDerive {
            item: "project id",
            from: dir_name.to_string(),
        })
    }
}

#[cfg(test)]
#[path = "init_tests.rs"]
mod tests;
