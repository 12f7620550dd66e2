// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Lifecycle categories and named states.
//!
//! Every [`State`] belongs to exactly one [`Category`]. Categories are the
//! coarse buckets used for reporting (is the item still open, is it being
//! worked on), while state names are defined per workflow.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{Error, Result};

/// Coarse lifecycle bucket a state belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    /// Not started yet. Initial states live here.
    Backlog,
    /// Actively being worked on. Only time spent here counts as processing.
    InProcess,
    /// Finished. Entering a Done state stamps the process end time.
    Done,
}

impl Category {
    /// Returns the string representation used in storage and display.
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Backlog => "backlog",
            Category::InProcess => "in_process",
            Category::Done => "done",
        }
    }

    /// Returns true if items in this category are still open.
    pub fn is_open(&self) -> bool {
        !matches!(self, Category::Done)
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Category {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "backlog" => Ok(Category::Backlog),
            "in_process" | "in-process" | "inprocess" => Ok(Category::InProcess),
            "done" => Ok(Category::Done),
            _ => Err(Error::InvalidCategory(s.to_string())),
        }
    }
}

/// A named lifecycle position a work item can occupy.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct State {
    /// Unique within one state machine.
    pub name: String,
    /// Reporting bucket.
    pub category: Category,
}

impl State {
    pub fn new(name: impl Into<String>, category: Category) -> Self {
        State {
            name: name.into(),
            category,
        }
    }
}

impl fmt::Display for State {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.category)
    }
}

#[cfg(test)]
#[path = "state_tests.rs"]
mod tests;
