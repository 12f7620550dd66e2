// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use chrono::Utc;

use crate::error::Result;

use super::open_engine;

pub fn archive(id: &str) -> Result<()> {
    let (mut engine, _, _) = open_engine()?;
    let work = engine.archive_work(id, Utc::now())?;
    println!("Archived {}", work.id);
    Ok(())
}

pub fn unarchive(id: &str) -> Result<()> {
    let (mut engine, _, _) = open_engine()?;
    let work = engine.unarchive_work(id, Utc::now())?;
    println!("Unarchived {}", work.id);
    Ok(())
}
