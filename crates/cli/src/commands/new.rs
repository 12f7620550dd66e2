// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use chrono::{DateTime, Utc};
use serde_json::{Map, Value};
use stint_core::{Engine, NewWork, PropertyDefinition, PropertyKind, Work};

use crate::cli::OutputFormat;
use crate::config::Config;
use crate::error::{Error, Result};
use crate::id::generate_unique_id;

use super::{emit, open_engine};

pub fn run(name: &str, flow: &str, props: &[String], format: OutputFormat) -> Result<()> {
    let (mut engine, config, _) = open_engine()?;
    let work = run_impl(&mut engine, &config, name, flow, props, Utc::now())?;
    let text = format!("Created {} in {}: {}", work.id, work.state_name, work.name);
    emit(format, &work.id, &work, &text)
}

/// Internal implementation that accepts engine/config for testing.
pub(crate) fn run_impl(
    engine: &mut Engine,
    config: &Config,
    name: &str,
    flow: &str,
    props: &[String],
    now: DateTime<Utc>,
) -> Result<Work> {
    let name = name.trim();
    if name.is_empty() {
        return Err(Error::FieldEmpty { field: "Name" });
    }

    let def = engine.workflow(flow)?;
    let props = parse_props(props, &def.property_definitions)?;

    let db = engine.db();
    let id = generate_unique_id(&def.project_id, name, &now, |id| {
        db.work_exists(id).unwrap_or(false)
    });

    let mut new = NewWork::new(id, def.project_id.clone(), def.id.clone(), name);
    new.props = props;
    Ok(engine.create_work(new, now)?)
}

/// Parses `name=value` arguments, typing each value by its property definition.
///
/// Unknown names are kept as text so that validation reports them.
pub(crate) fn parse_props(
    args: &[String],
    defs: &[PropertyDefinition],
) -> Result<Map<String, Value>> {
    let mut props = Map::new();
    for arg in args {
        let (name, raw) = arg
            .split_once('=')
            .map(|(n, v)| (n.trim(), v.trim()))
            .filter(|(n, _)| !n.is_empty())
            .ok_or_else(|| Error::InvalidPropArg { arg: arg.clone() })?;

        let kind = defs.iter().find(|d| d.name == name).map(|d| &d.kind);
        props.insert(name.to_string(), coerce(kind, raw));
    }
    Ok(props)
}

fn coerce(kind: Option<&PropertyKind>, raw: &str) -> Value {
    match kind {
        Some(PropertyKind::Number) => serde_json::from_str::<serde_json::Number>(raw)
            .map(Value::Number)
            .unwrap_or_else(|_| Value::String(raw.to_string())),
        Some(PropertyKind::MultiSelect { .. }) => Value::Array(
            raw.split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(|s| Value::String(s.to_string()))
                .collect(),
        ),
        _ => Value::String(raw.to_string()),
    }
}

#[cfg(test)]
#[path = "new_tests.rs"]
mod tests;
