// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Process-time aggregation: how long a work item has existed, been worked
//! on, and sat in each state.
//!
//! Closed history comes only from the [`WorkProcessStep`] log. The live
//! [`Work`] fields contribute only the currently open interval
//! `[state_begin_time, now]`. Steps and the open interval are disjoint, so
//! summing both never double-counts.

use chrono::{DateTime, Duration, Utc};
use serde::Serialize;

use crate::state::Category;
use crate::work::{Work, WorkProcessStep};

/// Read-only view over one work item and its step log.
#[derive(Debug, Clone, Copy)]
pub struct ProcessTimes<'a> {
    work: &'a Work,
    steps: &'a [WorkProcessStep],
}

impl<'a> ProcessTimes<'a> {
    /// `steps` must be the closed intervals of `work`.
    pub fn new(work: &'a Work, steps: &'a [WorkProcessStep]) -> Self {
        ProcessTimes { work, steps }
    }

    /// Length of the still-open interval in the current state.
    ///
    /// A `now` earlier than the interval start counts as zero.
    fn open_interval(&self, now: DateTime<Utc>) -> Duration {
        (now - self.work.state_begin_time).max(Duration::zero())
    }

    fn closed_where<F>(&self, pred: F) -> Duration
    where
        F: Fn(&WorkProcessStep) -> bool,
    {
        self.steps
            .iter()
            .filter(|s| pred(*s))
            .fold(Duration::zero(), |acc, s| acc + s.duration())
    }

    /// Time since the item was created.
    pub fn existence(&self, now: DateTime<Utc>) -> Duration {
        (now - self.work.create_time).max(Duration::zero())
    }

    /// Total time spent in InProcess-category states.
    ///
    /// Closed InProcess intervals, plus the open interval while the item
    /// currently sits in an InProcess state and is not finished. Backlog time
    /// is never counted, including after a reopen.
    pub fn processing(&self, now: DateTime<Utc>) -> Duration {
        let closed = self.closed_where(|s| s.state_category == Category::InProcess);
        if self.work.process_end_time.is_none()
            && self.work.state_category == Category::InProcess
        {
            closed + self.open_interval(now)
        } else {
            closed
        }
    }

    /// Total time spent in `state_name`, across every visit.
    pub fn in_state(&self, state_name: &str, now: DateTime<Utc>) -> Duration {
        let closed = self.closed_where(|s| s.state_name == state_name);
        if self.work.state_name == state_name {
            closed + self.open_interval(now)
        } else {
            closed
        }
    }

    /// Creation to finish, for finished items.
    pub fn lead_time(&self) -> Option<Duration> {
        self.work
            .process_end_time
            .map(|end| end - self.work.create_time)
    }

    /// First start to finish, for finished items.
    pub fn cycle_time(&self) -> Option<Duration> {
        match (self.work.process_begin_time, self.work.process_end_time) {
            (Some(begin), Some(end)) => Some(end - begin),
            _ => None,
        }
    }

    /// Per-state totals in order of first appearance; the current state
    /// comes last if it was never left.
    pub fn per_state(&self, now: DateTime<Utc>) -> Vec<StateDuration> {
        let mut out: Vec<StateDuration> = Vec::new();

        for step in self.steps {
            match out.iter_mut().find(|d| d.state_name == step.state_name) {
                Some(entry) => {
                    entry.duration_ms += step.duration().num_milliseconds();
                    entry.visits += 1;
                }
                None => out.push(StateDuration {
                    state_name: step.state_name.clone(),
                    category: step.state_category,
                    duration_ms: step.duration().num_milliseconds(),
                    visits: 1,
                    current: false,
                }),
            }
        }

        let open_ms = self.open_interval(now).num_milliseconds();
        match out
            .iter_mut()
            .find(|d| d.state_name == self.work.state_name)
        {
            Some(entry) => {
                entry.duration_ms += open_ms;
                entry.visits += 1;
                entry.current = true;
            }
            None => out.push(StateDuration {
                state_name: self.work.state_name.clone(),
                category: self.work.state_category,
                duration_ms: open_ms,
                visits: 1,
                current: true,
            }),
        }

        out
    }

    /// All figures for the item as of `now`.
    pub fn report(&self, now: DateTime<Utc>) -> ProcessReport {
        ProcessReport {
            work_id: self.work.id.clone(),
            state_name: self.work.state_name.clone(),
            state_category: self.work.state_category,
            as_of: now,
            existence_ms: self.existence(now).num_milliseconds(),
            processing_ms: self.processing(now).num_milliseconds(),
            lead_time_ms: self.lead_time().map(|d| d.num_milliseconds()),
            cycle_time_ms: self.cycle_time().map(|d| d.num_milliseconds()),
            states: self.per_state(now),
        }
    }
}

/// Time spent in one state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StateDuration {
    pub state_name: String,
    pub category: Category,
    pub duration_ms: i64,
    /// Number of separate intervals, including the open one.
    pub visits: usize,
    /// True if the item is in this state right now.
    pub current: bool,
}

/// Process-time figures for one work item. Durations are in milliseconds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProcessReport {
    pub work_id: String,
    pub state_name: String,
    pub state_category: Category,
    pub as_of: DateTime<Utc>,
    pub existence_ms: i64,
    pub processing_ms: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lead_time_ms: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cycle_time_ms: Option<i64>,
    pub states: Vec<StateDuration>,
}

impl ProcessReport {
    /// Looks up the total for one state.
    pub fn state(&self, name: &str) -> Option<&StateDuration> {
        self.states.iter().find(|s| s.state_name == name)
    }
}

#[cfg(test)]
#[path = "process_tests.rs"]
mod tests;
