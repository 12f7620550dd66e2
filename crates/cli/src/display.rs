// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use stint_core::{ProcessReport, Transition, Work, WorkProcessStep, WorkflowDefinition};

const TIME_FORMAT: &str = "%Y-%m-%d %H:%M";

/// Format a millisecond duration with its two largest units.
///
/// `90_061_000` → `"1d 1h"`, `125_000` → `"2m 5s"`, `800` → `"0s"`.
pub fn format_duration(ms: i64) -> String {
    let total = ms.max(0) / 1000;
    let units = [
        (total / 86_400, "d"),
        (total % 86_400 / 3_600, "h"),
        (total % 3_600 / 60, "m"),
        (total % 60, "s"),
    ];

    let parts: Vec<String> = units
        .iter()
        .skip_while(|(n, _)| *n == 0)
        .take(2)
        .filter(|(n, _)| *n > 0)
        .map(|(n, unit)| format!("{n}{unit}"))
        .collect();

    if parts.is_empty() {
        "0s".to_string()
    } else {
        parts.join(" ")
    }
}

/// Format a single work item line for list output
pub fn format_work_line(work: &Work) -> String {
    let archived = if work.is_archived() { ", archived" } else { "" };
    format!(
        "- [{}{}] {}: {}",
        work.state_name, archived, work.id, work.name
    )
}

/// Format one process step as a history line.
pub fn format_step(step: &WorkProcessStep) -> String {
    format!(
        "  {}  {} -> {} by {} ({})",
        step.end_time.format(TIME_FORMAT),
        step.state_name,
        step.next_state_name,
        step.creator_name,
        format_duration(step.duration().num_milliseconds())
    )
}

/// Format work item details for the show command
pub fn format_work_details(work: &Work, flow_name: &str, steps: &[WorkProcessStep]) -> String {
    let mut output = Vec::new();

    output.push(format!("[{}] {}", work.state_name, work.id));
    output.push(format!("Name: {}", work.name));
    output.push(format!("Workflow: {} ({})", flow_name, work.flow_id));
    output.push(format!("State: {} ({})", work.state_name, work.state_category));
    output.push(format!(
        "Created: {}",
        work.create_time.format(TIME_FORMAT)
    ));
    output.push(format!(
        "In state since: {}",
        work.state_begin_time.format(TIME_FORMAT)
    ));
    if let Some(begin) = work.process_begin_time {
        output.push(format!("Started: {}", begin.format(TIME_FORMAT)));
    }
    if let Some(end) = work.process_end_time {
        output.push(format!("Finished: {}", end.format(TIME_FORMAT)));
    }
    if let Some(archived) = work.archive_time {
        output.push(format!("Archived: {}", archived.format(TIME_FORMAT)));
    }

    if !work.props.is_empty() {
        output.push(String::new());
        output.push("Properties:".to_string());
        for (name, value) in &work.props {
            let shown = match value.as_str() {
                Some(s) => s.to_string(),
                None => value.to_string(),
            };
            output.push(format!("  {}: {}", name, shown));
        }
    }

    if !steps.is_empty() {
        output.push(String::new());
        output.push("History:".to_string());
        output.extend(steps.iter().map(format_step));
    }

    output.join("\n")
}

/// Format a transition as `name: FROM -> TO`.
pub fn format_transition(transition: &Transition) -> String {
    format!("  {}", transition)
}

/// Format a process report as a per-state table with totals.
pub fn format_report(report: &ProcessReport) -> String {
    let mut output = Vec::new();
    output.push(format!(
        "{} in {} ({})",
        report.work_id, report.state_name, report.state_category
    ));

    let width = report
        .states
        .iter()
        .map(|s| s.state_name.len())
        .max()
        .unwrap_or(0);
    for state in &report.states {
        let marker = if state.current { " *" } else { "" };
        output.push(format!(
            "  {:<width$}  {:>8}  {}x{}",
            state.state_name,
            format_duration(state.duration_ms),
            state.visits,
            marker,
        ));
    }

    output.push(String::new());
    output.push(format!("Existence:  {}", format_duration(report.existence_ms)));
    output.push(format!("Processing: {}", format_duration(report.processing_ms)));
    if let Some(lead) = report.lead_time_ms {
        output.push(format!("Lead time:  {}", format_duration(lead)));
    }
    if let Some(cycle) = report.cycle_time_ms {
        output.push(format!("Cycle time: {}", format_duration(cycle)));
    }

    output.join("\n")
}

/// Format a workflow summary line for list output.
pub fn format_workflow_line(def: &WorkflowDefinition) -> String {
    let states: Vec<&str> = def
        .state_machine
        .states
        .iter()
        .map(|s| s.name.as_str())
        .collect();
    format!(
        "- {} ({}): {} [{}]",
        def.id,
        def.project_id,
        def.name,
        states.join(" | ")
    )
}

#[cfg(test)]
#[path = "display_tests.rs"]
mod tests;
