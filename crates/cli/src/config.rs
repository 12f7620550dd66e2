// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Project configuration management.
//!
//! Configuration is stored in `.stint/config.toml` and includes:
//! - `project`: The project id, also the prefix for work ids (e.g., "prj" → "prj-a1b2c3d4")
//! - `database`: Optional path to the database (relative to project root or absolute)
//! - `log_level` / `log_file`: Defaults for the tracing subscriber

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};
use crate::id::validate_project;

const WORK_DIR_NAME: &str = ".stint";
const CONFIG_FILE_NAME: &str = "config.toml";
const DB_FILE_NAME: &str = "stint.db";
const GITIGNORE_FILE_NAME: &str = ".gitignore";

/// Project configuration stored in `.stint/config.toml`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Project id (2+ lowercase alphanumeric with at least one letter).
    pub project: String,
    /// Optional path for the database file.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub database: Option<String>,
    /// Default log filter when `STINT_LOG` is unset (e.g. "info", "stint_core=debug").
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub log_level: Option<String>,
    /// Append logs to this file instead of stderr.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub log_file: Option<String>,
}

impl Config {
    /// Creates a new config for the given project.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidProject`] if the id is not 2+ lowercase alphanumeric with at least one letter.
    pub fn new(project: String) -> Result<Self> {
        if !validate_project(&project) {
            return Err(Error::InvalidProject);
        }
        Ok(Config {
            project,
            database: None,
            log_level: None,
            log_file: None,
        })
    }

    /// Loads configuration from the given `.stint/` directory.
    pub fn load(work_dir: &Path) -> Result<Self> {
        let config_path = work_dir.join(CONFIG_FILE_NAME);
        let content = fs::read_to_string(&config_path)
            .map_err(|e| Error::Config(format!("failed to read config: {}", e)))?;
        let config: Config = toml::from_str(&content)
            .map_err(|e| Error::Config(format!("failed to parse config: {}", e)))?;
        if !validate_project(&config.project) {
            return Err(Error::InvalidProject);
        }
        Ok(config)
    }

    /// Saves configuration to the given `.stint/` directory.
    pub fn save(&self, work_dir: &Path) -> Result<()> {
        let config_path = work_dir.join(CONFIG_FILE_NAME);
        let content = toml::to_string_pretty(self)
            .map_err(|e| Error::Config(format!("failed to serialize config: {}", e)))?;
        fs::write(&config_path, content)?;
        Ok(())
    }
}

/// Find the .stint directory by walking up from the current directory
pub fn find_work_dir() -> Result<PathBuf> {
    find_work_dir_from(&std::env::current_dir()?)
}

/// Find the .stint directory by walking up from `start`
pub fn find_work_dir_from(start: &Path) -> Result<PathBuf> {
    let mut current = start.to_path_buf();
    loop {
        let work_dir = current.join(WORK_DIR_NAME);
        if work_dir.is_dir() {
            return Ok(work_dir);
        }
        if !current.pop() {
            return Err(Error::NotInitialized);
        }
    }
}

/// Resolves a configured path relative to the project root (the parent of `.stint/`).
fn resolve(work_dir: &Path, configured: &str) -> PathBuf {
    let path = Path::new(configured);
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        work_dir.parent().unwrap_or(work_dir).join(path)
    }
}

/// Get the database path from config
pub fn get_db_path(work_dir: &Path, config: &Config) -> PathBuf {
    match &config.database {
        Some(database) => resolve(work_dir, database),
        None => work_dir.join(DB_FILE_NAME),
    }
}

/// Get the log file path from config, if one is configured
pub fn get_log_path(work_dir: &Path, config: &Config) -> Option<PathBuf> {
    config
        .log_file
        .as_deref()
        .map(|log_file| resolve(work_dir, log_file))
}

/// Initialize a new .stint directory at the given path
pub fn init_work_dir(path: &Path, project: &str) -> Result<PathBuf> {
    let work_dir = path.join(WORK_DIR_NAME);

    if work_dir.join(CONFIG_FILE_NAME).exists() {
        return Err(Error::AlreadyInitialized(work_dir.display().to_string()));
    }

    let config = Config::new(project.to_string())?;
    fs::create_dir_all(&work_dir)?;
    config.save(&work_dir)?;

    Ok(work_dir)
}

/// Write a .gitignore file to the work directory.
///
/// The database and logs are local; only the config is shared.
pub fn write_gitignore(work_dir: &Path) -> Result<()> {
    let gitignore_path = work_dir.join(GITIGNORE_FILE_NAME);
    fs::write(
        &gitignore_path,
        "# Local database\nstint.db\nstint.db-*\n\n# Logs\n*.log\n",
    )?;
    Ok(())
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
