// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Rust specs for creating and moving work items.

#![allow(clippy::unwrap_used)]

#[path = "common.rs"]
mod common;

use common::*;

#[test]
fn new_starts_in_initial_state() {
    let temp = init_temp();

    stint()
        .args(["new", "Fix login", "--flow", "generic"])
        .current_dir(temp.path())
        .assert()
        .success()
        .stdout(predicate::str::starts_with("Created prj-"))
        .stdout(predicate::str::contains("in PENDING: Fix login"));
}

#[test]
fn new_rejects_unknown_workflow() {
    let temp = init_temp();
    stint()
        .args(["new", "Task", "--flow", "nope"])
        .current_dir(temp.path())
        .assert()
        .code(2);
}

#[test]
fn new_rejects_blank_name() {
    let temp = init_temp();
    stint()
        .args(["new", "  ", "--flow", "generic"])
        .current_dir(temp.path())
        .assert()
        .failure();
}

#[test]
fn move_along_the_happy_path() {
    let temp = init_temp();
    let id = create_work(&temp, "Task");

    stint()
        .args(["move", &id, "DOING"])
        .current_dir(temp.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("PENDING -> DOING (begin)"));
    move_work(&temp, &id, "DONE");

    let work = json(&temp, &["show", &id]);
    assert_eq!(work["state_name"], "DONE");
    assert_eq!(work["state_category"], "done");
    assert!(work["process_begin_time"].is_string());
    assert!(work["process_end_time"].is_string());
    assert_eq!(work["steps"].as_array().unwrap().len(), 2);
}

#[test]
fn move_without_edge_is_invalid_state() {
    let temp = init_temp();
    let id = create_work(&temp, "Task");
    move_work(&temp, &id, "DONE");

    stint()
        .args(["move", &id, "DOING"])
        .current_dir(temp.path())
        .assert()
        .code(3)
        .stderr(predicate::str::contains("no transition from DONE to DOING"))
        .stderr(predicate::str::contains("you can go to: PENDING"));
}

#[test]
fn move_to_unknown_state_is_invalid_state() {
    let temp = init_temp();
    let id = create_work(&temp, "Task");

    stint()
        .args(["move", &id, "LIMBO"])
        .current_dir(temp.path())
        .assert()
        .code(3)
        .stderr(predicate::str::contains("unknown state"));
}

#[test]
fn move_missing_work_is_not_found() {
    let temp = init_temp();
    stint()
        .args(["move", "prj-00000000", "DOING"])
        .current_dir(temp.path())
        .assert()
        .code(2)
        .stderr(predicate::str::contains("work not found"));
}

#[test]
fn close_starts_and_ends_processing() {
    let temp = init_temp();
    let id = create_work(&temp, "Task");
    move_work(&temp, &id, "DONE");

    let work = json(&temp, &["show", &id]);
    assert_eq!(work["state_name"], "DONE");
    assert_eq!(work["process_begin_time"], work["process_end_time"]);
}

#[test]
fn reopen_clears_finish_time() {
    let temp = init_temp();
    let id = create_work(&temp, "Task");
    move_work(&temp, &id, "DOING");
    move_work(&temp, &id, "DONE");
    move_work(&temp, &id, "PENDING");

    let work = json(&temp, &["show", &id]);
    assert_eq!(work["state_name"], "PENDING");
    assert!(work.get("process_end_time").is_none());
    assert!(work["process_begin_time"].is_string());
}

#[test]
fn transitions_lists_outgoing_edges() {
    let temp = init_temp();
    let id = create_work(&temp, "Task");
    move_work(&temp, &id, "DOING");

    stint()
        .args(["transitions", &id, "-o", "id"])
        .current_dir(temp.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("PENDING"))
        .stdout(predicate::str::contains("DONE"));
}

#[test]
fn show_text_includes_history() {
    let temp = init_temp();
    let id = create_work(&temp, "Task");
    move_work(&temp, &id, "DOING");

    stint()
        .args(["show", &id])
        .current_dir(temp.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Workflow: Generic (generic)"))
        .stdout(predicate::str::contains("History:"))
        .stdout(predicate::str::contains("PENDING -> DOING"));
}

#[test]
fn archived_work_cannot_move() {
    let temp = init_temp();
    let id = create_work(&temp, "Task");

    stint()
        .args(["archive", &id])
        .current_dir(temp.path())
        .assert()
        .success();
    stint()
        .args(["move", &id, "DOING"])
        .current_dir(temp.path())
        .assert()
        .code(2)
        .stderr(predicate::str::contains("archived"));

    stint()
        .args(["unarchive", &id])
        .current_dir(temp.path())
        .assert()
        .success();
    move_work(&temp, &id, "DOING");
}
