// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Rust specs for `stint times`.

#![allow(clippy::unwrap_used)]

#[path = "common.rs"]
mod common;

use common::*;

#[test]
fn fresh_work_has_no_processing_time() {
    let temp = init_temp();
    let id = create_work(&temp, "Task");

    let report = json(&temp, &["times", &id]);
    assert_eq!(report["work_id"], id.as_str());
    assert_eq!(report["processing_ms"], 0);
    assert!(report.get("lead_time_ms").is_none());
    assert_eq!(report["states"].as_array().unwrap().len(), 1);
    assert_eq!(report["states"][0]["state_name"], "PENDING");
}

#[test]
fn finished_work_reports_every_state_visited() {
    let temp = init_temp();
    let id = create_work(&temp, "Task");
    move_work(&temp, &id, "DOING");
    move_work(&temp, &id, "DONE");

    let report = json(&temp, &["times", &id]);
    let names: Vec<&str> = report["states"]
        .as_array()
        .unwrap()
        .iter()
        .map(|s| s["state_name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["PENDING", "DOING", "DONE"]);
    assert!(report["lead_time_ms"].is_number());
    assert!(report["cycle_time_ms"].is_number());
}

#[test]
fn text_output_has_totals() {
    let temp = init_temp();
    let id = create_work(&temp, "Task");
    move_work(&temp, &id, "DOING");

    stint()
        .args(["times", &id])
        .current_dir(temp.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("in DOING (in_process)"))
        .stdout(predicate::str::contains("Existence:"))
        .stdout(predicate::str::contains("Processing:"));
}

#[test]
fn missing_work_is_not_found() {
    let temp = init_temp();
    stint()
        .args(["times", "prj-00000000"])
        .current_dir(temp.path())
        .assert()
        .code(2);
}
