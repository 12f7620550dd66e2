// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! stintrs - workflow-driven work tracking with process-time reporting.
//!
//! This crate provides the `stint` command line on top of [`stint_core`].
//! Work items move through a workflow's state machine, every move is
//! recorded, and the recorded history answers how long an item spent in
//! each state.
//!
//! # Main Components
//!
//! - [`Config`] - Project configuration stored in `.stint/config.toml`
//! - [`workflow_file`] - TOML workflow definitions
//! - [`Error`] - Error types and process exit codes
//!
//! # Initialization
//!
//! ```rust,ignore
//! use stintrs::{init_work_dir, find_work_dir, get_db_path, Config};
//! use stint_core::{Database, Engine};
//!
//! let work_dir = init_work_dir(Path::new("."), "prj")?;
//!
//! let work_dir = find_work_dir()?;
//! let config = Config::load(&work_dir)?;
//! let engine = Engine::new(Database::open(&get_db_path(&work_dir, &config))?);
//! ```

mod cli;
mod commands;
mod display;
mod logging;

pub mod config;
pub mod error;
pub mod id;
pub mod workflow_file;

pub use cli::{Cli, Command, ListArgs, OutputArgs, OutputFormat, WorkflowCommand};
pub use config::{find_work_dir, get_db_path, init_work_dir, Config};
pub use error::{Error, Result};

/// Installs logging using the project config when one can be found.
fn init_logging() {
    let loaded = find_work_dir()
        .ok()
        .and_then(|dir| Config::load(&dir).ok().map(|config| (dir, config)));
    match loaded {
        Some((dir, config)) => {
            let log_path = config::get_log_path(&dir, &config);
            logging::setup_logging(config.log_level.as_deref(), log_path.as_deref());
        }
        None => logging::setup_logging(None, None),
    }
}

/// Execute a CLI command. This is the main entry point for library users
/// and provides a testable way to run commands without process execution.
pub fn run(command: Command) -> Result<()> {
    init_logging();
    match command {
        Command::Init { project, path } => commands::init::run(project, path),
        Command::Workflow(cmd) => match cmd {
            WorkflowCommand::Add { file } => commands::workflow::add(&file),
            WorkflowCommand::Generic { id, name } => commands::workflow::generic(&id, &name),
            WorkflowCommand::List { all, output } => commands::workflow::list(all, output.output),
            WorkflowCommand::Show { id, output } => commands::workflow::show(&id, output.output),
        },
        Command::New {
            name,
            flow,
            props,
            output,
        } => commands::new::run(&name, &flow, &props, output.output),
        Command::Move {
            id,
            state,
            retry,
            output,
        } => commands::transition::run(&id, &state, retry, output.output),
        Command::Transitions { id, output } => commands::transition::available(&id, output.output),
        Command::Show { id, output } => commands::show::run(&id, output.output),
        Command::Times { id, output } => commands::times::run(&id, output.output),
        Command::List { filter, output } => commands::list::run(filter, output.output),
        Command::Archive { id } => commands::archive::archive(&id),
        Command::Unarchive { id } => commands::archive::unarchive(&id),
    }
}
