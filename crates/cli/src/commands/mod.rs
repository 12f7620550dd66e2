// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

pub mod archive;
pub mod init;
pub mod list;
pub mod new;
pub mod show;
#[cfg(test)]
#[path = "mod_tests.rs"]
pub mod testing;
pub mod times;
pub mod transition;
pub mod workflow;

use std::path::PathBuf;

use serde::Serialize;
use stint_core::{Database, Engine};

use crate::cli::OutputFormat;
use crate::config::{find_work_dir, get_db_path, Config};
use crate::error::Result;

/// Helper to open the lifecycle engine from the current context.
pub fn open_engine() -> Result<(Engine, Config, PathBuf)> {
    let work_dir = find_work_dir()?;
    let config = Config::load(&work_dir)?;
    let db_path = get_db_path(&work_dir, &config);
    tracing::debug!(path = %db_path.display(), "opening database");
    let engine = Engine::new(Database::open(&db_path)?);
    Ok((engine, config, work_dir))
}

/// Prints a value as one line of JSON.
pub(crate) fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string(value)?);
    Ok(())
}

/// Prints `text`, `value` as JSON, or `id` depending on the output format.
pub(crate) fn emit<T: Serialize>(format: OutputFormat, id: &str, value: &T, text: &str) -> Result<()> {
    match format {
        OutputFormat::Text => println!("{text}"),
        OutputFormat::Json => print_json(value)?,
        OutputFormat::Id => println!("{id}"),
    }
    Ok(())
}
