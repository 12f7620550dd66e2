// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use serde::Serialize;
use stint_core::{Engine, Work};

use crate::cli::{ListArgs, OutputFormat};
use crate::config::Config;
use crate::display::format_work_line;
use crate::error::Result;

use super::{open_engine, print_json};

/// JSON output structure for the list command.
#[derive(Serialize)]
struct ListOutputJson<'a> {
    project: &'a str,
    works: &'a [Work],
}

pub fn run(filter: ListArgs, format: OutputFormat) -> Result<()> {
    let (engine, config, _) = open_engine()?;
    let project = filter.project.clone().unwrap_or_else(|| config.project.clone());
    let works = run_impl(&engine, &config, &filter)?;

    match format {
        OutputFormat::Text => {
            let mut column: Option<&str> = None;
            for work in &works {
                if column != Some(work.state_name.as_str()) {
                    if column.is_some() {
                        println!();
                    }
                    println!("{}:", work.state_name);
                    column = Some(work.state_name.as_str());
                }
                println!("{}", format_work_line(work));
            }
        }
        OutputFormat::Json => print_json(&ListOutputJson {
            project: &project,
            works: &works,
        })?,
        OutputFormat::Id => {
            let ids: Vec<&str> = works.iter().map(|w| w.id.as_str()).collect();
            println!("{}", ids.join(" "));
        }
    }
    Ok(())
}

/// Internal implementation that accepts engine/config for testing.
pub(crate) fn run_impl(engine: &Engine, config: &Config, filter: &ListArgs) -> Result<Vec<Work>> {
    let project = filter.project.as_deref().unwrap_or(&config.project);
    Ok(engine.list_works(project, filter.state.as_deref(), filter.all)?)
}

#[cfg(test)]
#[path = "list_tests.rs"]
mod tests;
