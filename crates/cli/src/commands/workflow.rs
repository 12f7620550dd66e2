// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use std::path::Path;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use stint_core::{Engine, NewWorkflow, StateMachine, WorkflowDefinition};

use crate::cli::OutputFormat;
use crate::config::Config;
use crate::display::format_workflow_line;
use crate::error::Result;
use crate::workflow_file::{load_workflow, render_workflow};

use super::{emit, open_engine, print_json};

pub fn add(file: &str) -> Result<()> {
    let (mut engine, config, _) = open_engine()?;
    let def = add_impl(&mut engine, &config, Path::new(file), Utc::now())?;
    println!("Added workflow {} ({})", def.id, def.name);
    Ok(())
}

pub(crate) fn add_impl(
    engine: &mut Engine,
    config: &Config,
    file: &Path,
    now: DateTime<Utc>,
) -> Result<Arc<WorkflowDefinition>> {
    let new = load_workflow(file, &config.project)?;
    Ok(engine.create_workflow(new, now)?)
}

pub fn generic(id: &str, name: &str) -> Result<()> {
    let (mut engine, config, _) = open_engine()?;
    let def = generic_impl(&mut engine, &config, id, name, Utc::now())?;
    println!("Added workflow {} ({})", def.id, def.name);
    Ok(())
}

pub(crate) fn generic_impl(
    engine: &mut Engine,
    config: &Config,
    id: &str,
    name: &str,
    now: DateTime<Utc>,
) -> Result<Arc<WorkflowDefinition>> {
    let new = NewWorkflow {
        id: id.to_string(),
        name: name.to_string(),
        project_id: config.project.clone(),
        property_definitions: Vec::new(),
        state_machine: StateMachine::generic(),
    };
    Ok(engine.create_workflow(new, now)?)
}

pub fn list(all: bool, format: OutputFormat) -> Result<()> {
    let (engine, config, _) = open_engine()?;
    let defs = list_impl(&engine, &config, all)?;

    match format {
        OutputFormat::Text => {
            if defs.is_empty() {
                println!("No workflows. Add one with 'stint workflow generic' or 'stint workflow add <file>'.");
            }
            for def in &defs {
                println!("{}", format_workflow_line(def));
            }
        }
        OutputFormat::Json => print_json(&defs)?,
        OutputFormat::Id => {
            let ids: Vec<&str> = defs.iter().map(|d| d.id.as_str()).collect();
            println!("{}", ids.join(" "));
        }
    }
    Ok(())
}

pub(crate) fn list_impl(
    engine: &Engine,
    config: &Config,
    all: bool,
) -> Result<Vec<WorkflowDefinition>> {
    let project = if all { None } else { Some(config.project.as_str()) };
    Ok(engine.db().list_workflows(project)?)
}

pub fn show(id: &str, format: OutputFormat) -> Result<()> {
    let (engine, _, _) = open_engine()?;
    let def = engine.workflow(id)?;
    let text = render_workflow(&NewWorkflow {
        id: def.id.clone(),
        name: def.name.clone(),
        project_id: def.project_id.clone(),
        property_definitions: def.property_definitions.clone(),
        state_machine: def.state_machine.clone(),
    })?;
    emit(format, &def.id, &*def, text.trim_end())
}

#[cfg(test)]
#[path = "workflow_tests.rs"]
mod tests;
