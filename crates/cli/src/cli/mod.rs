// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

mod args;

use clap::{Parser, Subcommand};

pub use args::{ListArgs, OutputArgs, OutputFormat};

/// Parse a string that must not be empty or whitespace-only.
fn non_empty_string(s: &str) -> Result<String, String> {
    if s.trim().is_empty() {
        Err("cannot be empty".to_string())
    } else {
        Ok(s.to_string())
    }
}

#[derive(Parser)]
#[command(name = "stint")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Track work through workflow states and measure how long it takes")]
#[command(
    long_about = "Track work through workflow states and measure how long it takes.\n\n\
    Work items follow a workflow's state machine. Every move is recorded, so stint can\n\
    report time spent per state, processing time, lead time and cycle time."
)]
pub struct Cli {
    /// Run as if stint was started in <path>
    #[arg(short = 'C', long = "directory", global = true, value_name = "path")]
    pub directory: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Initialize a project in the current directory
    #[command(after_help = "\
Examples:
  stint init                      Derive the project id from the directory name
  stint init --project prj        Use an explicit project id")]
    Init {
        /// Project id, also the work id prefix (defaults to the directory name)
        #[arg(long, short)]
        project: Option<String>,

        /// Directory to initialize (defaults to the current directory)
        #[arg(long)]
        path: Option<String>,
    },

    /// Manage workflow definitions
    #[command(subcommand)]
    Workflow(WorkflowCommand),

    /// Create a new work item
    #[command(after_help = "\
Examples:
  stint new \"Fix login\" --flow generic                Create in the workflow's first backlog state
  stint new \"Review\" --flow review --prop size=M      Set a custom property
  stint new \"Task\" --flow generic -o id              Output only the id")]
    New {
        /// Name of the work item
        #[arg(value_parser = non_empty_string)]
        name: String,

        /// Workflow id
        #[arg(long, short)]
        flow: String,

        /// Custom property as name=value (repeatable)
        #[arg(long = "prop", value_name = "NAME=VALUE")]
        props: Vec<String>,

        #[command(flatten)]
        output: OutputArgs,
    },

    /// Move a work item to another state
    #[command(
        name = "move",
        after_help = "\
Examples:
  stint move prj-1a2b3c4d DOING          Start work
  stint move prj-1a2b3c4d DONE --retry   Re-check once if someone else moved it first"
    )]
    Move {
        /// Work id
        id: String,

        /// Target state name
        state: String,

        /// On a concurrent change, re-read the item and try once more
        #[arg(long)]
        retry: bool,

        #[command(flatten)]
        output: OutputArgs,
    },

    /// List the transitions available to a work item
    Transitions {
        /// Work id
        id: String,

        #[command(flatten)]
        output: OutputArgs,
    },

    /// Show a work item and its state history
    Show {
        /// Work id
        id: String,

        #[command(flatten)]
        output: OutputArgs,
    },

    /// Report how long a work item has spent in each state
    Times {
        /// Work id
        id: String,

        #[command(flatten)]
        output: OutputArgs,
    },

    /// List work items in board order
    #[command(after_help = "\
Examples:
  stint list                  List active items grouped by state
  stint list --state DOING    List one column
  stint list --all            Include archived items
  stint list -o json          Output in JSON format")]
    List {
        #[command(flatten)]
        filter: ListArgs,

        #[command(flatten)]
        output: OutputArgs,
    },

    /// Hide a work item from active views (history is kept)
    Archive {
        /// Work id
        id: String,
    },

    /// Restore an archived work item
    Unarchive {
        /// Work id
        id: String,
    },
}

#[derive(Subcommand)]
pub enum WorkflowCommand {
    /// Add a workflow from a TOML definition file
    Add {
        /// Path to the workflow file
        file: String,
    },

    /// Add the built-in PENDING / DOING / DONE workflow
    Generic {
        /// Workflow id
        #[arg(long, default_value = "generic")]
        id: String,

        /// Display name
        #[arg(long, default_value = "Generic")]
        name: String,
    },

    /// List workflows
    List {
        /// Show workflows of every project
        #[arg(long)]
        all: bool,

        #[command(flatten)]
        output: OutputArgs,
    },

    /// Show a workflow definition
    Show {
        /// Workflow id
        id: String,

        #[command(flatten)]
        output: OutputArgs,
    },
}

#[cfg(test)]
#[path = "../cli_tests/mod.rs"]
mod tests;
