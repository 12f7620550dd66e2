// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! SQLite-backed storage for workflows, work items and process steps.
//!
//! The [`Database`] struct provides plain reads and inserts. The row-level
//! helpers (`*_on`) take any [`Connection`], so the lifecycle engine can run
//! them inside a single write transaction.

use chrono::{DateTime, SecondsFormat, SubsecRound, Utc};
use rusqlite::{params, Connection, OptionalExtension, Row};
use serde_json::{Map, Value};
use std::path::Path;

use crate::error::{Error, Result};
use crate::work::{Work, WorkProcessStep};
use crate::workflow::WorkflowDefinition;

/// SQL schema for the workflow database.
pub const SCHEMA: &str = r#"
-- Immutable workflow definitions; machine and properties stored as JSON
CREATE TABLE IF NOT EXISTS workflows (
    id TEXT PRIMARY KEY,
    name TEXT NOT NULL,
    project_id TEXT NOT NULL,
    property_definitions TEXT NOT NULL,
    state_machine TEXT NOT NULL,
    create_time TEXT NOT NULL
);

-- Work items with denormalized state fields
CREATE TABLE IF NOT EXISTS works (
    id TEXT PRIMARY KEY,
    project_id TEXT NOT NULL,
    flow_id TEXT NOT NULL,
    name TEXT NOT NULL,
    state_name TEXT NOT NULL,
    state_category TEXT NOT NULL,
    state_begin_time TEXT NOT NULL,
    process_begin_time TEXT,
    process_end_time TEXT,
    archive_time TEXT,
    order_in_state INTEGER NOT NULL,
    create_time TEXT NOT NULL,
    update_time TEXT NOT NULL,
    revision INTEGER NOT NULL DEFAULT 0,
    props TEXT NOT NULL DEFAULT '{}',
    FOREIGN KEY (flow_id) REFERENCES workflows(id)
);

-- Append-only log of closed state intervals
CREATE TABLE IF NOT EXISTS work_process_steps (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    work_id TEXT NOT NULL,
    flow_id TEXT NOT NULL,
    state_name TEXT NOT NULL,
    state_category TEXT NOT NULL,
    next_state_name TEXT NOT NULL,
    next_state_category TEXT NOT NULL,
    creator_id TEXT NOT NULL,
    creator_name TEXT NOT NULL,
    begin_time TEXT NOT NULL,
    end_time TEXT NOT NULL,
    FOREIGN KEY (work_id) REFERENCES works(id)
);

-- Indexes
CREATE INDEX IF NOT EXISTS idx_workflows_project ON workflows(project_id);
CREATE INDEX IF NOT EXISTS idx_works_column ON works(project_id, state_name, order_in_state);
CREATE INDEX IF NOT EXISTS idx_works_flow ON works(flow_id);
CREATE INDEX IF NOT EXISTS idx_steps_work ON work_process_steps(work_id, begin_time);
"#;

const WORK_COLUMNS: &str = "id, project_id, flow_id, name, state_name, state_category,
    state_begin_time, process_begin_time, process_end_time, archive_time,
    order_in_state, create_time, update_time, revision, props";

const STEP_COLUMNS: &str = "id, work_id, flow_id, state_name, state_category,
    next_state_name, next_state_category, creator_id, creator_name, begin_time, end_time";

/// Format a timestamp for storage.
///
/// Fixed-width UTC so that text ordering matches time ordering.
pub fn format_timestamp(dt: &DateTime<Utc>) -> String {
    dt.to_rfc3339_opts(SecondsFormat::Micros, true)
}

/// Drop sub-microsecond precision so a value equals its stored form.
pub fn truncate_timestamp(dt: DateTime<Utc>) -> DateTime<Utc> {
    dt.trunc_subsecs(6)
}

fn conversion_error(message: String) -> rusqlite::Error {
    rusqlite::Error::FromSqlConversionFailure(
        0,
        rusqlite::types::Type::Text,
        Box::new(Error::CorruptedData(message)),
    )
}

/// Parse a string value from the database, returning a rusqlite error on parse failure.
fn parse_db<T: std::str::FromStr>(
    value: &str,
    column: &str,
) -> std::result::Result<T, rusqlite::Error> {
    value
        .parse()
        .map_err(|_| conversion_error(format!("invalid value '{value}' in column '{column}'")))
}

/// Parse an RFC3339 timestamp from the database.
fn parse_timestamp(
    value: &str,
    column: &str,
) -> std::result::Result<DateTime<Utc>, rusqlite::Error> {
    DateTime::parse_from_rfc3339(value)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|_| conversion_error(format!("invalid timestamp '{value}' in column '{column}'")))
}

fn parse_timestamp_opt(
    value: Option<String>,
    column: &str,
) -> std::result::Result<Option<DateTime<Utc>>, rusqlite::Error> {
    value.map(|s| parse_timestamp(&s, column)).transpose()
}

fn parse_json<T: serde::de::DeserializeOwned>(
    value: &str,
    column: &str,
) -> std::result::Result<T, rusqlite::Error> {
    serde_json::from_str(value)
        .map_err(|e| conversion_error(format!("invalid JSON in column '{column}': {e}")))
}

fn work_from_row(row: &Row<'_>) -> std::result::Result<Work, rusqlite::Error> {
    let category: String = row.get(5)?;
    let state_begin: String = row.get(6)?;
    let create: String = row.get(11)?;
    let update: String = row.get(12)?;
    let props: String = row.get(14)?;

    Ok(Work {
        id: row.get(0)?,
        project_id: row.get(1)?,
        flow_id: row.get(2)?,
        name: row.get(3)?,
        state_name: row.get(4)?,
        state_category: parse_db(&category, "state_category")?,
        state_begin_time: parse_timestamp(&state_begin, "state_begin_time")?,
        process_begin_time: parse_timestamp_opt(row.get(7)?, "process_begin_time")?,
        process_end_time: parse_timestamp_opt(row.get(8)?, "process_end_time")?,
        archive_time: parse_timestamp_opt(row.get(9)?, "archive_time")?,
        order_in_state: row.get(10)?,
        create_time: parse_timestamp(&create, "create_time")?,
        update_time: parse_timestamp(&update, "update_time")?,
        revision: row.get(13)?,
        props: parse_json::<Map<String, Value>>(&props, "props")?,
    })
}

fn step_from_row(row: &Row<'_>) -> std::result::Result<WorkProcessStep, rusqlite::Error> {
    let category: String = row.get(4)?;
    let next_category: String = row.get(6)?;
    let begin: String = row.get(9)?;
    let end: String = row.get(10)?;

    Ok(WorkProcessStep {
        id: row.get(0)?,
        work_id: row.get(1)?,
        flow_id: row.get(2)?,
        state_name: row.get(3)?,
        state_category: parse_db(&category, "state_category")?,
        next_state_name: row.get(5)?,
        next_state_category: parse_db(&next_category, "next_state_category")?,
        creator_id: row.get(7)?,
        creator_name: row.get(8)?,
        begin_time: parse_timestamp(&begin, "begin_time")?,
        end_time: parse_timestamp(&end, "end_time")?,
    })
}

fn workflow_from_row(row: &Row<'_>) -> std::result::Result<WorkflowDefinition, rusqlite::Error> {
    let props: String = row.get(3)?;
    let machine: String = row.get(4)?;
    let create: String = row.get(5)?;

    Ok(WorkflowDefinition {
        id: row.get(0)?,
        name: row.get(1)?,
        project_id: row.get(2)?,
        property_definitions: parse_json(&props, "property_definitions")?,
        state_machine: parse_json(&machine, "state_machine")?,
        create_time: parse_timestamp(&create, "create_time")?,
    })
}

/// Run schema creation on a database connection.
///
/// Every statement in [`SCHEMA`] is idempotent, so this is safe to run on
/// each open.
pub fn run_migrations(conn: &Connection) -> Result<()> {
    conn.execute_batch(SCHEMA)?;
    Ok(())
}

/// Insert a workflow definition.
pub fn insert_workflow_on(conn: &Connection, def: &WorkflowDefinition) -> Result<()> {
    conn.execute(
        "INSERT INTO workflows (id, name, project_id, property_definitions, state_machine, create_time)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
        params![
            def.id,
            def.name,
            def.project_id,
            serde_json::to_string(&def.property_definitions)?,
            serde_json::to_string(&def.state_machine)?,
            format_timestamp(&def.create_time),
        ],
    )?;
    Ok(())
}

/// Get a workflow definition by ID.
pub fn get_workflow_on(conn: &Connection, id: &str) -> Result<WorkflowDefinition> {
    conn.query_row(
        "SELECT id, name, project_id, property_definitions, state_machine, create_time
         FROM workflows WHERE id = ?1",
        params![id],
        workflow_from_row,
    )
    .optional()?
    .ok_or_else(|| Error::WorkflowNotFound(id.to_string()))
}

/// Insert a new work item.
pub fn insert_work_on(conn: &Connection, work: &Work) -> Result<()> {
    conn.execute(
        &format!(
            "INSERT INTO works ({WORK_COLUMNS})
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15)"
        ),
        params![
            work.id,
            work.project_id,
            work.flow_id,
            work.name,
            work.state_name,
            work.state_category.as_str(),
            format_timestamp(&work.state_begin_time),
            work.process_begin_time.as_ref().map(format_timestamp),
            work.process_end_time.as_ref().map(format_timestamp),
            work.archive_time.as_ref().map(format_timestamp),
            work.order_in_state,
            format_timestamp(&work.create_time),
            format_timestamp(&work.update_time),
            work.revision,
            serde_json::to_string(&work.props)?,
        ],
    )?;
    Ok(())
}

/// Get a work item by ID.
pub fn get_work_on(conn: &Connection, id: &str) -> Result<Work> {
    conn.query_row(
        &format!("SELECT {WORK_COLUMNS} FROM works WHERE id = ?1"),
        params![id],
        work_from_row,
    )
    .optional()?
    .ok_or_else(|| Error::WorkNotFound(id.to_string()))
}

/// Check if a work item exists.
pub fn work_exists_on(conn: &Connection, id: &str) -> Result<bool> {
    let count: i64 = conn.query_row(
        "SELECT COUNT(*) FROM works WHERE id = ?1",
        params![id],
        |row| row.get(0),
    )?;
    Ok(count > 0)
}

/// Write a work item's state fields, guarded by its previous revision.
///
/// Returns [`Error::Conflict`] if another writer bumped the revision first.
pub fn update_work_state_on(conn: &Connection, work: &Work, expected_revision: i64) -> Result<()> {
    let affected = conn.execute(
        "UPDATE works SET state_name = ?1, state_category = ?2, state_begin_time = ?3,
             process_begin_time = ?4, process_end_time = ?5, order_in_state = ?6,
             update_time = ?7, revision = ?8
         WHERE id = ?9 AND revision = ?10",
        params![
            work.state_name,
            work.state_category.as_str(),
            format_timestamp(&work.state_begin_time),
            work.process_begin_time.as_ref().map(format_timestamp),
            work.process_end_time.as_ref().map(format_timestamp),
            work.order_in_state,
            format_timestamp(&work.update_time),
            work.revision,
            work.id,
            expected_revision,
        ],
    )?;

    if affected == 0 {
        return Err(Error::Conflict {
            work_id: work.id.clone(),
            expected_revision,
        });
    }
    Ok(())
}

/// Append a process step, returning its database ID.
pub fn insert_process_step_on(conn: &Connection, step: &WorkProcessStep) -> Result<i64> {
    conn.execute(
        "INSERT INTO work_process_steps (work_id, flow_id, state_name, state_category,
             next_state_name, next_state_category, creator_id, creator_name, begin_time, end_time)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)",
        params![
            step.work_id,
            step.flow_id,
            step.state_name,
            step.state_category.as_str(),
            step.next_state_name,
            step.next_state_category.as_str(),
            step.creator_id,
            step.creator_name,
            format_timestamp(&step.begin_time),
            format_timestamp(&step.end_time),
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

/// Get all process steps for a work item, ordered by begin time.
pub fn get_process_steps_on(conn: &Connection, work_id: &str) -> Result<Vec<WorkProcessStep>> {
    let mut stmt = conn.prepare(&format!(
        "SELECT {STEP_COLUMNS} FROM work_process_steps
         WHERE work_id = ?1 ORDER BY begin_time, id"
    ))?;

    let steps = stmt
        .query_map(params![work_id], step_from_row)?
        .collect::<std::result::Result<Vec<_>, _>>()?;

    Ok(steps)
}

/// Next ordering token for an item entering a state column.
///
/// Wall-clock milliseconds, bumped past the column's current maximum so
/// tokens never repeat within a column.
pub fn next_order_in_state_on(
    conn: &Connection,
    project_id: &str,
    state_name: &str,
    work_id: &str,
    now: &DateTime<Utc>,
) -> Result<i64> {
    let max: Option<i64> = conn.query_row(
        "SELECT MAX(order_in_state) FROM works
         WHERE project_id = ?1 AND state_name = ?2 AND id != ?3",
        params![project_id, state_name, work_id],
        |row| row.get(0),
    )?;

    let now_ms = now.timestamp_millis();
    Ok(match max {
        Some(max) if max >= now_ms => max + 1,
        _ => now_ms,
    })
}

/// SQLite database connection with workflow operations.
pub struct Database {
    /// The underlying SQLite connection.
    pub conn: Connection,
}

impl Database {
    /// Open a database connection at the given path, creating and migrating if needed.
    pub fn open(path: &Path) -> Result<Self> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let conn = Connection::open(path)?;

        // Enable foreign keys and WAL mode for concurrency
        conn.execute_batch(
            "PRAGMA foreign_keys = ON;
             PRAGMA journal_mode = WAL;
             PRAGMA busy_timeout = 5000;",
        )?;

        let db = Database { conn };
        run_migrations(&db.conn)?;
        Ok(db)
    }

    /// Open an in-memory database (for testing).
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        conn.execute_batch("PRAGMA foreign_keys = ON;")?;
        let db = Database { conn };
        run_migrations(&db.conn)?;
        Ok(db)
    }

    /// Create a workflow definition.
    pub fn create_workflow(&self, def: &WorkflowDefinition) -> Result<()> {
        insert_workflow_on(&self.conn, def)
    }

    /// Get a workflow definition by ID.
    pub fn get_workflow(&self, id: &str) -> Result<WorkflowDefinition> {
        get_workflow_on(&self.conn, id)
    }

    /// Check if a workflow exists.
    pub fn workflow_exists(&self, id: &str) -> Result<bool> {
        let count: i64 = self.conn.query_row(
            "SELECT COUNT(*) FROM workflows WHERE id = ?1",
            params![id],
            |row| row.get(0),
        )?;
        Ok(count > 0)
    }

    /// List workflow definitions, optionally for a single project.
    pub fn list_workflows(&self, project_id: Option<&str>) -> Result<Vec<WorkflowDefinition>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, name, project_id, property_definitions, state_machine, create_time
             FROM workflows WHERE ?1 IS NULL OR project_id = ?1
             ORDER BY create_time, id",
        )?;

        let defs = stmt
            .query_map(params![project_id], workflow_from_row)?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(defs)
    }

    /// Create a new work item.
    pub fn create_work(&self, work: &Work) -> Result<()> {
        insert_work_on(&self.conn, work)
    }

    /// Get a work item by ID.
    pub fn get_work(&self, id: &str) -> Result<Work> {
        get_work_on(&self.conn, id)
    }

    /// Check if a work item exists.
    pub fn work_exists(&self, id: &str) -> Result<bool> {
        work_exists_on(&self.conn, id)
    }

    /// List work items of a project in board order.
    ///
    /// Items are grouped by state column and ordered by `order_in_state`
    /// within a column. Archived items are skipped unless requested.
    pub fn list_works(
        &self,
        project_id: &str,
        state_name: Option<&str>,
        include_archived: bool,
    ) -> Result<Vec<Work>> {
        let mut sql = format!("SELECT {WORK_COLUMNS} FROM works WHERE project_id = ?");
        let mut params_vec: Vec<String> = vec![project_id.to_string()];

        if let Some(state) = state_name {
            sql.push_str(" AND state_name = ?");
            params_vec.push(state.to_string());
        }

        if !include_archived {
            sql.push_str(" AND archive_time IS NULL");
        }

        sql.push_str(" ORDER BY state_name, order_in_state, id");

        let mut stmt = self.conn.prepare(&sql)?;

        let params_refs: Vec<&dyn rusqlite::ToSql> = params_vec
            .iter()
            .map(|s| s as &dyn rusqlite::ToSql)
            .collect();

        let works = stmt
            .query_map(params_refs.as_slice(), work_from_row)?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(works)
    }

    /// Set or clear a work item's archive time.
    pub fn set_archive_time(
        &self,
        id: &str,
        archive_time: Option<DateTime<Utc>>,
        now: DateTime<Utc>,
    ) -> Result<()> {
        let affected = self.conn.execute(
            "UPDATE works SET archive_time = ?1, update_time = ?2 WHERE id = ?3",
            params![
                archive_time.as_ref().map(format_timestamp),
                format_timestamp(&now),
                id
            ],
        )?;

        if affected == 0 {
            return Err(Error::WorkNotFound(id.to_string()));
        }
        Ok(())
    }

    /// Get all process steps for a work item, ordered by begin time.
    pub fn get_process_steps(&self, work_id: &str) -> Result<Vec<WorkProcessStep>> {
        get_process_steps_on(&self.conn, work_id)
    }
}

#[cfg(test)]
#[path = "db_tests.rs"]
mod tests;
