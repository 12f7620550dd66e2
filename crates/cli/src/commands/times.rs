// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use chrono::{DateTime, Utc};
use stint_core::{Engine, ProcessReport};

use crate::cli::OutputFormat;
use crate::display::format_report;
use crate::error::Result;

use super::{emit, open_engine};

pub fn run(id: &str, format: OutputFormat) -> Result<()> {
    let (engine, _, _) = open_engine()?;
    let report = run_impl(&engine, id, Utc::now())?;
    emit(format, &report.work_id, &report, &format_report(&report))
}

/// Internal implementation that accepts the engine for testing.
pub(crate) fn run_impl(engine: &Engine, id: &str, now: DateTime<Utc>) -> Result<ProcessReport> {
    Ok(engine.process_report(id, now)?)
}

#[cfg(test)]
#[path = "times_tests.rs"]
mod tests;
