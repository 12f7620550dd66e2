// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Immutable state machines: the legal states and named transitions of a workflow.
//!
//! A [`StateMachine`] carries no per-item data, so one instance is shared by
//! every work item using the same workflow. Lookups never fail: an unknown
//! state name simply matches nothing.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;

use crate::error::{Error, Result};
use crate::state::{Category, State};

/// A named, directed, legal move between two states of the same machine.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Transition {
    /// Descriptive label ("begin", "close"). Not an identity.
    pub name: String,
    /// Name of the source state.
    pub from: String,
    /// Name of the target state.
    pub to: String,
}

impl Transition {
    pub fn new(name: impl Into<String>, from: impl Into<String>, to: impl Into<String>) -> Self {
        Transition {
            name: name.into(),
            from: from.into(),
            to: to.into(),
        }
    }
}

impl fmt::Display for Transition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {} -> {}", self.name, self.from, self.to)
    }
}

/// The full set of states and transitions for one workflow.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct StateMachine {
    pub states: Vec<State>,
    pub transitions: Vec<Transition>,
}

impl StateMachine {
    pub fn new(states: Vec<State>, transitions: Vec<Transition>) -> Self {
        StateMachine {
            states,
            transitions,
        }
    }

    /// The generic three-state workflow every project starts with.
    ///
    /// ```text
    /// PENDING --begin--> DOING --finish--> DONE
    ///    ^  \              |                 |
    ///    |   `---close-----+---------------->'
    ///    '----cancel-------'<----reopen------'
    /// ```
    pub fn generic() -> Self {
        StateMachine::new(
            vec![
                State::new("PENDING", Category::Backlog),
                State::new("DOING", Category::InProcess),
                State::new("DONE", Category::Done),
            ],
            vec![
                Transition::new("begin", "PENDING", "DOING"),
                Transition::new("close", "PENDING", "DONE"),
                Transition::new("cancel", "DOING", "PENDING"),
                Transition::new("finish", "DOING", "DONE"),
                Transition::new("reopen", "DONE", "PENDING"),
            ],
        )
    }

    /// Returns every transition matching `from` and `to`, in declared order.
    ///
    /// An empty string acts as a wildcard for either side. Unknown names match
    /// nothing, so the result is empty rather than an error.
    pub fn available_transitions(&self, from: &str, to: &str) -> Vec<&Transition> {
        self.transitions
            .iter()
            .filter(|t| from.is_empty() || t.from == from)
            .filter(|t| to.is_empty() || t.to == to)
            .collect()
    }

    /// Looks up a state by name.
    pub fn state(&self, name: &str) -> Option<&State> {
        self.states.iter().find(|s| s.name == name)
    }

    /// The state new work items start in: the first Backlog-category state.
    pub fn initial_state(&self) -> Option<&State> {
        self.states.iter().find(|s| s.category == Category::Backlog)
    }

    /// Distinct target state names reachable in one step from `from`, in
    /// declared order.
    pub fn targets_from(&self, from: &str) -> Vec<&str> {
        let mut seen = HashSet::new();
        self.available_transitions(from, "")
            .into_iter()
            .map(|t| t.to.as_str())
            .filter(|to| seen.insert(*to))
            .collect()
    }

    /// Comma-separated state names, for error hints.
    pub fn state_names(&self) -> String {
        self.states
            .iter()
            .map(|s| s.name.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }

    /// Checks the machine's static table.
    ///
    /// Lookups trust the table, so this runs once when a workflow is created.
    /// All problems are reported together.
    pub fn validate(&self) -> Result<()> {
        let mut problems = Vec::new();

        if self.states.is_empty() {
            problems.push("no states defined".to_string());
        }

        let mut names = HashSet::new();
        for state in &self.states {
            if state.name.trim().is_empty() {
                problems.push("state name cannot be empty".to_string());
            } else if !names.insert(state.name.as_str()) {
                problems.push(format!("duplicate state '{}'", state.name));
            }
        }

        if !self.states.is_empty() && self.initial_state().is_none() {
            problems.push("no backlog state to start work in".to_string());
        }

        let mut edges = HashSet::new();
        for t in &self.transitions {
            if t.name.trim().is_empty() {
                problems.push(format!("transition {} -> {} has no name", t.from, t.to));
            }
            for endpoint in [&t.from, &t.to] {
                if !names.contains(endpoint.as_str()) {
                    problems.push(format!(
                        "transition '{}' references unknown state '{}'",
                        t.name, endpoint
                    ));
                }
            }
            if !edges.insert((t.name.as_str(), t.from.as_str(), t.to.as_str())) {
                problems.push(format!("duplicate transition '{t}'"));
            }
        }

        if problems.is_empty() {
            Ok(())
        } else {
            Err(Error::InvalidWorkflow(problems.join("; ")))
        }
    }
}

#[cfg(test)]
#[path = "machine_tests.rs"]
mod tests;
