// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! stint-core: workflow state machines and process-time tracking.
//!
//! This crate holds the data model (workflows, states, work items, process
//! steps), the SQLite store, the lifecycle engine that moves work between
//! states, and the aggregator that turns step history into durations.

pub mod db;
pub mod error;
pub mod identity;
pub mod lifecycle;
pub mod machine;
pub mod process;
pub mod state;
pub mod work;
pub mod workflow;

pub use db::Database;
pub use error::{Error, ErrorKind, Result};
pub use identity::Actor;
pub use lifecycle::{Engine, TransitionOutcome};
pub use machine::{StateMachine, Transition};
pub use process::{ProcessReport, ProcessTimes, StateDuration};
pub use state::{Category, State};
pub use work::{NewWork, Work, WorkProcessStep};
pub use workflow::{NewWorkflow, PropertyDefinition, PropertyKind, WorkflowCache, WorkflowDefinition};
