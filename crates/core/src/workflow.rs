// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Workflow definitions: a project-scoped state machine plus custom properties.
//!
//! Definitions are immutable once created, which is what makes
//! [`WorkflowCache`] safe: a cached entry can never go stale.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::{HashMap, HashSet};
use std::sync::{Arc, PoisonError, RwLock};

use crate::error::{Error, Result};
use crate::machine::StateMachine;

/// Value type of a custom property.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PropertyKind {
    /// Free text.
    Text,
    /// Any JSON number.
    Number,
    /// RFC 3339 timestamp or `YYYY-MM-DD`.
    Date,
    /// Exactly one of the listed options.
    Select { options: Vec<String> },
    /// Any subset of the listed options.
    MultiSelect { options: Vec<String> },
    /// A user id.
    User,
}

impl PropertyKind {
    fn check(&self, value: &Value) -> std::result::Result<(), String> {
        match (self, value) {
            (PropertyKind::Text, Value::String(_)) => Ok(()),
            (PropertyKind::Number, Value::Number(_)) => Ok(()),
            (PropertyKind::Date, Value::String(s)) => {
                if DateTime::parse_from_rfc3339(s).is_ok()
                    || NaiveDate::parse_from_str(s, "%Y-%m-%d").is_ok()
                {
                    Ok(())
                } else {
                    Err(format!("'{s}' is not a date"))
                }
            }
            (PropertyKind::Select { options }, Value::String(s)) => {
                if options.contains(s) {
                    Ok(())
                } else {
                    Err(format!("'{s}' is not one of: {}", options.join(", ")))
                }
            }
            (PropertyKind::MultiSelect { options }, Value::Array(items)) => {
                for item in items {
                    match item.as_str() {
                        Some(s) if options.contains(&s.to_string()) => {}
                        _ => {
                            return Err(format!(
                                "{item} is not one of: {}",
                                options.join(", ")
                            ))
                        }
                    }
                }
                Ok(())
            }
            (PropertyKind::User, Value::String(s)) if !s.trim().is_empty() => Ok(()),
            (kind, value) => Err(format!("expected {}, got {value}", kind.label())),
        }
    }

    fn label(&self) -> &'static str {
        match self {
            PropertyKind::Text => "text",
            PropertyKind::Number => "a number",
            PropertyKind::Date => "a date",
            PropertyKind::Select { .. } => "one option",
            PropertyKind::MultiSelect { .. } => "a list of options",
            PropertyKind::User => "a user id",
        }
    }
}

/// A custom property work items of a workflow may carry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PropertyDefinition {
    pub name: String,
    #[serde(flatten)]
    pub kind: PropertyKind,
    #[serde(default)]
    pub required: bool,
}

impl PropertyDefinition {
    pub fn new(name: impl Into<String>, kind: PropertyKind) -> Self {
        PropertyDefinition {
            name: name.into(),
            kind,
            required: false,
        }
    }

    /// Marks the property as required (builder pattern).
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }
}

/// Input for creating a workflow.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewWorkflow {
    pub id: String,
    pub name: String,
    pub project_id: String,
    #[serde(default)]
    pub property_definitions: Vec<PropertyDefinition>,
    pub state_machine: StateMachine,
}

impl NewWorkflow {
    /// Checks the state machine table and the property definitions.
    pub fn validate(&self) -> Result<()> {
        if self.id.trim().is_empty() {
            return Err(Error::InvalidWorkflow("id cannot be empty".to_string()));
        }
        if self.name.trim().is_empty() {
            return Err(Error::InvalidWorkflow("name cannot be empty".to_string()));
        }
        if self.project_id.trim().is_empty() {
            return Err(Error::InvalidWorkflow(
                "project id cannot be empty".to_string(),
            ));
        }
        self.state_machine.validate()?;

        let mut seen = HashSet::new();
        for def in &self.property_definitions {
            if def.name.trim().is_empty() {
                return Err(Error::InvalidWorkflow(
                    "property name cannot be empty".to_string(),
                ));
            }
            if !seen.insert(def.name.as_str()) {
                return Err(Error::InvalidWorkflow(format!(
                    "duplicate property '{}'",
                    def.name
                )));
            }
            if let PropertyKind::Select { options } | PropertyKind::MultiSelect { options } =
                &def.kind
            {
                if options.is_empty() {
                    return Err(Error::InvalidWorkflow(format!(
                        "property '{}' has no options",
                        def.name
                    )));
                }
            }
        }
        Ok(())
    }
}

/// A project-scoped binding of a state machine plus custom property definitions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkflowDefinition {
    pub id: String,
    pub name: String,
    pub project_id: String,
    pub property_definitions: Vec<PropertyDefinition>,
    pub state_machine: StateMachine,
    pub create_time: DateTime<Utc>,
}

impl WorkflowDefinition {
    pub fn from_new(new: NewWorkflow, create_time: DateTime<Utc>) -> Self {
        WorkflowDefinition {
            id: new.id,
            name: new.name,
            project_id: new.project_id,
            property_definitions: new.property_definitions,
            state_machine: new.state_machine,
            create_time,
        }
    }

    /// Looks up a property definition by name.
    pub fn property(&self, name: &str) -> Option<&PropertyDefinition> {
        self.property_definitions.iter().find(|p| p.name == name)
    }

    /// Checks custom property values against this workflow's definitions.
    ///
    /// Unknown properties, missing required ones and type mismatches are all
    /// rejected. A JSON `null` counts as absent.
    pub fn validate_props(&self, props: &Map<String, Value>) -> Result<()> {
        for (name, value) in props {
            let def = self.property(name).ok_or_else(|| Error::InvalidProperty {
                name: name.clone(),
                reason: format!("not defined by workflow {}", self.id),
            })?;
            if value.is_null() {
                continue;
            }
            def.kind.check(value).map_err(|reason| Error::InvalidProperty {
                name: name.clone(),
                reason,
            })?;
        }

        for def in self.property_definitions.iter().filter(|d| d.required) {
            if props.get(&def.name).is_none_or(Value::is_null) {
                return Err(Error::InvalidProperty {
                    name: def.name.clone(),
                    reason: "required".to_string(),
                });
            }
        }
        Ok(())
    }
}

/// In-process cache of resolved workflow definitions keyed by id.
#[derive(Debug, Default)]
pub struct WorkflowCache {
    entries: RwLock<HashMap<String, Arc<WorkflowDefinition>>>,
}

impl WorkflowCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the cached definition, loading and caching it on a miss.
    ///
    /// Load errors are returned as-is and nothing is cached.
    pub fn get_or_load<F>(&self, id: &str, load: F) -> Result<Arc<WorkflowDefinition>>
    where
        F: FnOnce(&str) -> Result<WorkflowDefinition>,
    {
        if let Some(def) = self.get(id) {
            return Ok(def);
        }

        tracing::debug!(flow_id = id, "workflow cache miss");
        let def = Arc::new(load(id)?);
        self.entries
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(id.to_string(), Arc::clone(&def));
        Ok(def)
    }

    pub fn get(&self, id: &str) -> Option<Arc<WorkflowDefinition>> {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(id)
            .cloned()
    }

    pub fn insert(&self, def: WorkflowDefinition) -> Arc<WorkflowDefinition> {
        let def = Arc::new(def);
        self.entries
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(def.id.clone(), Arc::clone(&def));
        def
    }

    pub fn len(&self) -> usize {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
#[path = "workflow_tests.rs"]
mod tests;
