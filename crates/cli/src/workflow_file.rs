// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Workflow definition files.
//!
//! A workflow is described in TOML:
//!
//! ```toml
//! id = "tasks"
//! name = "Tasks"
//! project = "prj"          # optional, defaults to the configured project
//!
//! [[states]]
//! name = "PENDING"
//! category = "backlog"     # backlog | in_process | done
//!
//! [[transitions]]
//! name = "begin"
//! from = "PENDING"
//! to = "DOING"
//!
//! [[properties]]
//! name = "size"
//! type = "select"
//! options = ["S", "M", "L"]
//! required = true
//! ```

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use stint_core::{NewWorkflow, PropertyDefinition, State, StateMachine, Transition};

use crate::error::{Error, Result};

#[derive(Debug, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
struct WorkflowFile {
    id: String,
    name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    project: Option<String>,
    states: Vec<State>,
    #[serde(default)]
    transitions: Vec<Transition>,
    #[serde(default)]
    properties: Vec<PropertyDefinition>,
}

/// Parses a workflow from TOML text. `default_project` fills a missing `project`.
pub fn parse_workflow(content: &str, default_project: &str, origin: &str) -> Result<NewWorkflow> {
    let file: WorkflowFile = toml::from_str(content).map_err(|e| Error::WorkflowFile {
        path: origin.to_string(),
        reason: e.to_string(),
    })?;

    Ok(NewWorkflow {
        id: file.id,
        name: file.name,
        project_id: file.project.unwrap_or_else(|| default_project.to_string()),
        property_definitions: file.properties,
        state_machine: StateMachine::new(file.states, file.transitions),
    })
}

/// Reads and parses a workflow file.
pub fn load_workflow(path: &Path, default_project: &str) -> Result<NewWorkflow> {
    let content = fs::read_to_string(path).map_err(|e| Error::WorkflowFile {
        path: path.display().to_string(),
        reason: e.to_string(),
    })?;
    parse_workflow(&content, default_project, &path.display().to_string())
}

/// Renders a workflow back to the file format.
pub fn render_workflow(workflow: &NewWorkflow) -> Result<String> {
    let file = WorkflowFile {
        id: workflow.id.clone(),
        name: workflow.name.clone(),
        project: Some(workflow.project_id.clone()),
        states: workflow.state_machine.states.clone(),
        transitions: workflow.state_machine.transitions.clone(),
        properties: workflow.property_definitions.clone(),
    };
    toml::to_string_pretty(&file).map_err(|e| Error::Config(format!("failed to render workflow: {}", e)))
}

#[cfg(test)]
#[path = "workflow_file_tests.rs"]
mod tests;
