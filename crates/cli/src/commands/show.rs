// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use serde::Serialize;
use stint_core::{Engine, Work, WorkProcessStep};

use crate::cli::OutputFormat;
use crate::display::format_work_details;
use crate::error::Result;

use super::{emit, open_engine};

#[derive(Debug, Serialize)]
pub(crate) struct WorkDetails {
    #[serde(flatten)]
    pub work: Work,
    pub flow_name: String,
    pub steps: Vec<WorkProcessStep>,
}

pub fn run(id: &str, format: OutputFormat) -> Result<()> {
    let (engine, _, _) = open_engine()?;
    let details = run_impl(&engine, id)?;
    let text = format_work_details(&details.work, &details.flow_name, &details.steps);
    emit(format, &details.work.id, &details, &text)
}

/// Internal implementation that accepts the engine for testing.
pub(crate) fn run_impl(engine: &Engine, id: &str) -> Result<WorkDetails> {
    let work = engine.get_work(id)?;
    let flow_name = engine.workflow(&work.flow_id)?.name.clone();
    let steps = engine.process_steps(id)?;
    Ok(WorkDetails {
        work,
        flow_name,
        steps,
    })
}

#[cfg(test)]
#[path = "show_tests.rs"]
mod tests;
