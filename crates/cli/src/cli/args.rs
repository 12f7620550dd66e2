// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Shared argument structs for CLI commands.
//!
//! These structs are used with `#[command(flatten)]` to reduce duplication
//! across commands.

use clap::{Args, ValueEnum};

/// Output format for commands supporting structured output.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
    #[value(alias = "ids")]
    Id,
}

/// The `-o/--output` flag.
#[derive(Args, Clone, Copy, Debug, Default)]
pub struct OutputArgs {
    /// Output format (text, json, id)
    #[arg(long = "output", short = 'o', value_enum, default_value = "text")]
    pub output: OutputFormat,
}

/// Filters for listing work items.
#[derive(Args, Clone, Debug, Default)]
pub struct ListArgs {
    /// Only show items in this state
    #[arg(long, short)]
    pub state: Option<String>,

    /// Include archived items
    #[arg(long)]
    pub all: bool,

    /// Project to list (defaults to the configured project)
    #[arg(long, short)]
    pub project: Option<String>,
}
