// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Rust specs for `stint list`.

#![allow(clippy::unwrap_used)]

#[path = "common.rs"]
mod common;

use common::*;

fn list_ids(temp: &TempDir, args: &[&str]) -> Vec<String> {
    let output = stint()
        .arg("list")
        .args(args)
        .args(["-o", "id"])
        .current_dir(temp.path())
        .output()
        .unwrap();
    assert!(output.status.success());
    String::from_utf8_lossy(&output.stdout)
        .split_whitespace()
        .map(String::from)
        .collect()
}

#[test]
fn empty_project_lists_nothing() {
    let temp = init_temp();
    assert!(list_ids(&temp, &[]).is_empty());
}

#[test]
fn groups_by_state_in_entry_order() {
    let temp = init_temp();
    let a = create_work(&temp, "A");
    let b = create_work(&temp, "B");
    let c = create_work(&temp, "C");
    move_work(&temp, &c, "DOING");
    move_work(&temp, &a, "DOING");

    assert_eq!(list_ids(&temp, &[]), vec![c.clone(), a.clone(), b.clone()]);

    stint()
        .arg("list")
        .current_dir(temp.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("DOING:"))
        .stdout(predicate::str::contains("PENDING:"));
}

#[test]
fn state_filter() {
    let temp = init_temp();
    let a = create_work(&temp, "A");
    let b = create_work(&temp, "B");
    move_work(&temp, &b, "DOING");

    assert_eq!(list_ids(&temp, &["--state", "PENDING"]), vec![a]);
    assert_eq!(list_ids(&temp, &["-s", "DOING"]), vec![b]);
}

#[test]
fn archived_items_are_hidden_by_default() {
    let temp = init_temp();
    let a = create_work(&temp, "A");
    let b = create_work(&temp, "B");
    stint()
        .args(["archive", &a])
        .current_dir(temp.path())
        .assert()
        .success();

    assert_eq!(list_ids(&temp, &[]), vec![b]);
    assert_eq!(list_ids(&temp, &["--all"]).len(), 2);
}

#[test]
fn json_output() {
    let temp = init_temp();
    let id = create_work(&temp, "A");

    let value = json(&temp, &["list"]);
    assert_eq!(value["project"], "prj");
    assert_eq!(value["works"][0]["id"], id.as_str());
    assert_eq!(value["works"][0]["state_name"], "PENDING");
}
