// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Work items and their process-step history.
//!
//! A [`Work`] carries denormalized copies of its current state so it can be
//! queried without consulting the workflow. A [`WorkProcessStep`] is one closed
//! interval the item spent in a state; the still-open interval is implied by
//! `Work::state_begin_time`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::state::{Category, State};

/// A trackable item moving through a workflow's state machine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Work {
    /// Unique identifier (format: `{project}-{hash}`).
    pub id: String,
    /// Owning project.
    pub project_id: String,
    /// Workflow this item follows.
    pub flow_id: String,
    /// Short description of the work.
    pub name: String,
    /// Current state name.
    pub state_name: String,
    /// Category of the current state.
    pub state_category: Category,
    /// When the item entered its current state.
    pub state_begin_time: DateTime<Utc>,
    /// First time the item left the backlog.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub process_begin_time: Option<DateTime<Utc>>,
    /// When the item reached a done state. Cleared on reopen.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub process_end_time: Option<DateTime<Utc>>,
    /// Set when removed from active views; history is kept.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub archive_time: Option<DateTime<Utc>>,
    /// Ordering token within the item's state column.
    pub order_in_state: i64,
    pub create_time: DateTime<Utc>,
    pub update_time: DateTime<Utc>,
    /// Bumped on every transition; guards against concurrent writers.
    pub revision: i64,
    /// Custom property values, validated against the workflow.
    #[serde(default, skip_serializing_if = "Map::is_empty")]
    pub props: Map<String, Value>,
}

impl Work {
    /// Creates a work item sitting in `initial` since `create_time`.
    pub fn new(new: NewWork, initial: &State, create_time: DateTime<Utc>) -> Self {
        Work {
            id: new.id,
            project_id: new.project_id,
            flow_id: new.flow_id,
            name: new.name,
            state_name: initial.name.clone(),
            state_category: initial.category,
            state_begin_time: create_time,
            process_begin_time: None,
            process_end_time: None,
            archive_time: None,
            order_in_state: create_time.timestamp_millis(),
            create_time,
            update_time: create_time,
            revision: 0,
            props: new.props,
        }
    }

    pub fn is_archived(&self) -> bool {
        self.archive_time.is_some()
    }

    /// Returns true once the item has reached a done state and not been reopened.
    pub fn is_finished(&self) -> bool {
        self.process_end_time.is_some()
    }
}

/// Input for creating a work item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewWork {
    pub id: String,
    pub project_id: String,
    pub flow_id: String,
    pub name: String,
    #[serde(default)]
    pub props: Map<String, Value>,
}

impl NewWork {
    pub fn new(
        id: impl Into<String>,
        project_id: impl Into<String>,
        flow_id: impl Into<String>,
        name: impl Into<String>,
    ) -> Self {
        NewWork {
            id: id.into(),
            project_id: project_id.into(),
            flow_id: flow_id.into(),
            name: name.into(),
            props: Map::new(),
        }
    }

    /// Sets a custom property value (builder pattern).
    pub fn with_prop(mut self, name: impl Into<String>, value: Value) -> Self {
        self.props.insert(name.into(), value);
        self
    }
}

/// One closed interval a work item spent in a state. Append-only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkProcessStep {
    /// Database-assigned identifier.
    pub id: i64,
    pub work_id: String,
    pub flow_id: String,
    /// State the interval was spent in.
    pub state_name: String,
    pub state_category: Category,
    /// State the item moved to when the interval closed.
    pub next_state_name: String,
    pub next_state_category: Category,
    /// Who made the move.
    pub creator_id: String,
    pub creator_name: String,
    pub begin_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
}

impl WorkProcessStep {
    /// Length of the interval.
    pub fn duration(&self) -> chrono::Duration {
        self.end_time - self.begin_time
    }
}

#[cfg(test)]
#[path = "work_tests.rs"]
mod tests;
