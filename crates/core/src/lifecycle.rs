// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Work item lifecycle: creation, transitions and archiving.
//!
//! [`Engine`] is the only writer of a work item's state fields and the only
//! creator of process steps. Every transition runs in one IMMEDIATE SQLite
//! transaction that re-reads the row, validates against it, appends the closed
//! interval and writes the new state. A caller holding a stale copy gets
//! [`Error::Conflict`] instead of overwriting a concurrent move.

use chrono::{DateTime, Utc};
use rusqlite::TransactionBehavior;
use serde::Serialize;
use std::sync::Arc;

use crate::db::{self, Database};
use crate::error::{Error, Result};
use crate::identity::Actor;
use crate::machine::Transition;
use crate::process::{ProcessReport, ProcessTimes};
use crate::state::Category;
use crate::work::{NewWork, Work, WorkProcessStep};
use crate::workflow::{NewWorkflow, WorkflowCache, WorkflowDefinition};

/// Result of a committed transition.
///
/// `work` is the row as committed, ready to be republished to any index.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TransitionOutcome {
    pub work: Work,
    pub step: WorkProcessStep,
    pub transition: Transition,
}

/// The lifecycle engine over one database connection.
pub struct Engine {
    db: Database,
    workflows: Arc<WorkflowCache>,
}

impl Engine {
    pub fn new(db: Database) -> Self {
        Self::with_cache(db, Arc::new(WorkflowCache::new()))
    }

    /// Creates an engine sharing a workflow cache with other engines.
    pub fn with_cache(db: Database, workflows: Arc<WorkflowCache>) -> Self {
        Engine { db, workflows }
    }

    pub fn db(&self) -> &Database {
        &self.db
    }

    /// Resolves a workflow definition through the cache.
    pub fn workflow(&self, flow_id: &str) -> Result<Arc<WorkflowDefinition>> {
        self.workflows
            .get_or_load(flow_id, |id| self.db.get_workflow(id))
    }

    /// Validates and stores a new workflow definition.
    pub fn create_workflow(
        &mut self,
        new: NewWorkflow,
        now: DateTime<Utc>,
    ) -> Result<Arc<WorkflowDefinition>> {
        let now = db::truncate_timestamp(now);
        new.validate()?;
        if self.db.workflow_exists(&new.id)? {
            return Err(Error::InvalidWorkflow(format!(
                "workflow '{}' already exists",
                new.id
            )));
        }

        let def = WorkflowDefinition::from_new(new, now);
        self.db.create_workflow(&def)?;
        tracing::info!(
            flow_id = %def.id,
            project_id = %def.project_id,
            states = def.state_machine.states.len(),
            "created workflow"
        );
        Ok(self.workflows.insert(def))
    }

    /// Creates a work item in its workflow's initial state.
    pub fn create_work(&mut self, new: NewWork, now: DateTime<Utc>) -> Result<Work> {
        let now = db::truncate_timestamp(now);
        if new.id.trim().is_empty() {
            return Err(Error::InvalidInput("work id cannot be empty".to_string()));
        }
        if new.name.trim().is_empty() {
            return Err(Error::InvalidInput("work name cannot be empty".to_string()));
        }

        let tx = self
            .db
            .conn
            .transaction_with_behavior(TransactionBehavior::Immediate)?;

        let flow = self
            .workflows
            .get_or_load(&new.flow_id, |id| db::get_workflow_on(&tx, id))?;

        if flow.project_id != new.project_id {
            return Err(Error::InvalidInput(format!(
                "workflow {} belongs to project {}, not {}",
                flow.id, flow.project_id, new.project_id
            )));
        }
        flow.validate_props(&new.props)?;

        let initial = flow.state_machine.initial_state().ok_or_else(|| {
            Error::InvalidWorkflow(format!("workflow {} has no backlog state", flow.id))
        })?;

        if db::work_exists_on(&tx, &new.id)? {
            return Err(Error::InvalidInput(format!(
                "work '{}' already exists",
                new.id
            )));
        }

        let mut work = Work::new(new, initial, now);
        work.order_in_state =
            db::next_order_in_state_on(&tx, &work.project_id, &work.state_name, &work.id, &now)?;
        db::insert_work_on(&tx, &work)?;
        tx.commit()?;

        tracing::info!(
            work_id = %work.id,
            flow_id = %work.flow_id,
            state = %work.state_name,
            "created work"
        );
        Ok(work)
    }

    pub fn get_work(&self, id: &str) -> Result<Work> {
        self.db.get_work(id)
    }

    pub fn list_works(
        &self,
        project_id: &str,
        state_name: Option<&str>,
        include_archived: bool,
    ) -> Result<Vec<Work>> {
        self.db.list_works(project_id, state_name, include_archived)
    }

    /// The closed intervals of a work item, ordered by begin time.
    pub fn process_steps(&self, work_id: &str) -> Result<Vec<WorkProcessStep>> {
        if !self.db.work_exists(work_id)? {
            return Err(Error::WorkNotFound(work_id.to_string()));
        }
        self.db.get_process_steps(work_id)
    }

    /// Transitions available from the work item's current state.
    pub fn available_for(&self, work: &Work) -> Result<Vec<Transition>> {
        let flow = self.workflow(&work.flow_id)?;
        Ok(flow
            .state_machine
            .available_transitions(&work.state_name, "")
            .into_iter()
            .cloned()
            .collect())
    }

    /// Moves `work` to `to_state`, recording the interval just closed.
    ///
    /// `work` is the caller's view of the item. If the stored row has moved
    /// on since it was read, the call fails with [`Error::Conflict`] and
    /// nothing is written. Validation failures also write nothing.
    pub fn transition(
        &mut self,
        work: &Work,
        to_state: &str,
        actor: &Actor,
        now: DateTime<Utc>,
    ) -> Result<TransitionOutcome> {
        let now = db::truncate_timestamp(now);
        let tx = self
            .db
            .conn
            .transaction_with_behavior(TransactionBehavior::Immediate)?;

        let current = db::get_work_on(&tx, &work.id)?;
        if current.revision != work.revision {
            return Err(Error::Conflict {
                work_id: work.id.clone(),
                expected_revision: work.revision,
            });
        }
        if current.is_archived() {
            return Err(Error::WorkArchived(current.id));
        }
        if now < current.state_begin_time {
            return Err(Error::InvalidInput(format!(
                "transition time {} is before {} entered {}",
                db::format_timestamp(&now),
                current.id,
                current.state_name
            )));
        }

        let flow = self
            .workflows
            .get_or_load(&current.flow_id, |id| db::get_workflow_on(&tx, id))?;
        let machine = &flow.state_machine;

        let target = machine
            .state(to_state)
            .ok_or_else(|| Error::UnknownState {
                flow_id: flow.id.clone(),
                state: to_state.to_string(),
                known: machine.state_names(),
            })?;

        let transition = machine
            .available_transitions(&current.state_name, to_state)
            .into_iter()
            .next()
            .cloned()
            .ok_or_else(|| {
                let targets = machine.targets_from(&current.state_name);
                Error::NoSuchTransition {
                    from: current.state_name.clone(),
                    to: to_state.to_string(),
                    valid_targets: if targets.is_empty() {
                        "(none)".to_string()
                    } else {
                        targets.join(", ")
                    },
                }
            })?;

        let mut step = WorkProcessStep {
            id: 0,
            work_id: current.id.clone(),
            flow_id: current.flow_id.clone(),
            state_name: current.state_name.clone(),
            state_category: current.state_category,
            next_state_name: target.name.clone(),
            next_state_category: target.category,
            creator_id: actor.id.clone(),
            creator_name: actor.name.clone(),
            begin_time: current.state_begin_time,
            end_time: now,
        };

        let mut next = current.clone();
        next.state_name = target.name.clone();
        next.state_category = target.category;
        next.state_begin_time = now;
        if current.state_category == Category::Backlog
            && target.category != Category::Backlog
            && next.process_begin_time.is_none()
        {
            next.process_begin_time = Some(now);
        }
        next.process_end_time = match target.category {
            Category::Done => Some(now),
            _ => None,
        };
        next.order_in_state =
            db::next_order_in_state_on(&tx, &next.project_id, &next.state_name, &next.id, &now)?;
        next.update_time = now;
        next.revision = current.revision + 1;

        step.id = db::insert_process_step_on(&tx, &step)?;
        db::update_work_state_on(&tx, &next, current.revision)?;
        tx.commit()?;

        tracing::info!(
            work_id = %next.id,
            transition = %transition.name,
            from = %step.state_name,
            to = %next.state_name,
            actor = %actor.id,
            revision = next.revision,
            "transitioned work"
        );

        Ok(TransitionOutcome {
            work: next,
            step,
            transition,
        })
    }

    /// Like [`Engine::transition`], but on a conflict re-reads the work item
    /// once and re-validates the move against the fresh row.
    pub fn transition_with_retry(
        &mut self,
        work: &Work,
        to_state: &str,
        actor: &Actor,
        now: DateTime<Utc>,
    ) -> Result<TransitionOutcome> {
        match self.transition(work, to_state, actor, now) {
            Err(e) if e.is_retryable() => {
                tracing::warn!(work_id = %work.id, error = %e, "retrying transition");
                let fresh = self.db.get_work(&work.id)?;
                self.transition(&fresh, to_state, actor, now)
            }
            other => other,
        }
    }

    /// Hides a work item from active views. History is kept.
    pub fn archive_work(&mut self, id: &str, now: DateTime<Utc>) -> Result<Work> {
        let now = db::truncate_timestamp(now);
        let work = self.db.get_work(id)?;
        if work.is_archived() {
            return Ok(work);
        }
        self.db.set_archive_time(id, Some(now), now)?;
        tracing::info!(work_id = id, "archived work");
        self.db.get_work(id)
    }

    pub fn unarchive_work(&mut self, id: &str, now: DateTime<Utc>) -> Result<Work> {
        let now = db::truncate_timestamp(now);
        let work = self.db.get_work(id)?;
        if !work.is_archived() {
            return Ok(work);
        }
        self.db.set_archive_time(id, None, now)?;
        tracing::info!(work_id = id, "unarchived work");
        self.db.get_work(id)
    }

    /// Computes process times for a work item as of `now`.
    ///
    /// The work row and its step log are read in one transaction so the open
    /// interval and the history come from the same snapshot.
    pub fn process_report(&self, work_id: &str, now: DateTime<Utc>) -> Result<ProcessReport> {
        let tx = self.db.conn.unchecked_transaction()?;
        let work = db::get_work_on(&tx, work_id)?;
        if work.is_archived() {
            return Err(Error::WorkArchived(work.id));
        }
        self.workflows
            .get_or_load(&work.flow_id, |id| db::get_workflow_on(&tx, id))?;
        let steps = db::get_process_steps_on(&tx, work_id)?;
        tx.finish()?;

        Ok(ProcessTimes::new(&work, &steps).report(now))
    }
}

#[cfg(test)]
#[path = "lifecycle_tests.rs"]
mod tests;
