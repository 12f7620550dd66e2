// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use chrono::{DateTime, Utc};
use stint_core::{Actor, Engine, Transition, TransitionOutcome};

use crate::cli::OutputFormat;
use crate::display::format_transition;
use crate::error::Result;

use super::{emit, open_engine, print_json};

pub fn run(id: &str, state: &str, retry: bool, format: OutputFormat) -> Result<()> {
    let (mut engine, _, _) = open_engine()?;
    let outcome = run_impl(&mut engine, id, state, retry, &Actor::detect(), Utc::now())?;
    let text = format!(
        "Moved {}: {} -> {} ({})",
        outcome.work.id, outcome.step.state_name, outcome.work.state_name, outcome.transition.name
    );
    emit(format, &outcome.work.id, &outcome, &text)
}

/// Internal implementation that accepts the engine for testing.
pub(crate) fn run_impl(
    engine: &mut Engine,
    id: &str,
    state: &str,
    retry: bool,
    actor: &Actor,
    now: DateTime<Utc>,
) -> Result<TransitionOutcome> {
    let work = engine.get_work(id)?;
    let outcome = if retry {
        engine.transition_with_retry(&work, state, actor, now)?
    } else {
        engine.transition(&work, state, actor, now)?
    };
    Ok(outcome)
}

pub fn available(id: &str, format: OutputFormat) -> Result<()> {
    let (engine, _, _) = open_engine()?;
    let transitions = available_impl(&engine, id)?;

    match format {
        OutputFormat::Text => {
            if transitions.is_empty() {
                println!("No transitions available from this state.");
            }
            for transition in &transitions {
                println!("{}", format_transition(transition));
            }
        }
        OutputFormat::Json => print_json(&transitions)?,
        OutputFormat::Id => {
            let targets: Vec<&str> = transitions.iter().map(|t| t.to.as_str()).collect();
            println!("{}", targets.join(" "));
        }
    }
    Ok(())
}

pub(crate) fn available_impl(engine: &Engine, id: &str) -> Result<Vec<Transition>> {
    let work = engine.get_work(id)?;
    Ok(engine.available_for(&work)?)
}

#[cfg(test)]
#[path = "transition_tests.rs"]
mod tests;
