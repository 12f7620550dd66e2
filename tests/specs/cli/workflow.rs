// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Rust specs for `stint workflow`.

#![allow(clippy::unwrap_used)]

#[path = "common.rs"]
mod common;

use common::*;

const REVIEW_FLOW: &str = r#"
id = "review"
name = "Code review"

[[states]]
name = "QUEUED"
category = "backlog"

[[states]]
name = "REVIEWING"
category = "in_process"

[[states]]
name = "MERGED"
category = "done"

[[transitions]]
name = "pick"
from = "QUEUED"
to = "REVIEWING"

[[transitions]]
name = "merge"
from = "REVIEWING"
to = "MERGED"

[[properties]]
name = "size"
type = "select"
options = ["S", "M", "L"]
required = true
"#;

fn write_flow(temp: &TempDir, name: &str, content: &str) -> std::path::PathBuf {
    let path = temp.path().join(name);
    std::fs::write(&path, content).unwrap();
    path
}

#[test]
fn generic_installs_three_states() {
    let temp = init_temp();

    stint()
        .args(["workflow", "show", "generic"])
        .current_dir(temp.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("PENDING"))
        .stdout(predicate::str::contains("DOING"))
        .stdout(predicate::str::contains("DONE"));
}

#[test]
fn generic_twice_is_rejected() {
    let temp = init_temp();
    stint()
        .args(["workflow", "generic"])
        .current_dir(temp.path())
        .assert()
        .code(5);
}

#[test]
fn add_from_file() {
    let temp = init_temp();
    let path = write_flow(&temp, "review.toml", REVIEW_FLOW);

    stint()
        .args(["workflow", "add"])
        .arg(&path)
        .current_dir(temp.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Added workflow review"));

    stint()
        .args(["workflow", "list", "-o", "id"])
        .current_dir(temp.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("generic"))
        .stdout(predicate::str::contains("review"));
}

#[test]
fn add_rejects_dangling_transition() {
    let temp = init_temp();
    let broken = REVIEW_FLOW.replace("to = \"MERGED\"", "to = \"SHIPPED\"");
    let path = write_flow(&temp, "broken.toml", &broken);

    stint()
        .args(["workflow", "add"])
        .arg(&path)
        .current_dir(temp.path())
        .assert()
        .code(5)
        .stderr(predicate::str::contains("invalid workflow"));
}

#[test]
fn add_rejects_malformed_file() {
    let temp = init_temp();
    let path = write_flow(&temp, "bad.toml", "id = ");

    stint()
        .args(["workflow", "add"])
        .arg(&path)
        .current_dir(temp.path())
        .assert()
        .code(5)
        .stderr(predicate::str::contains("bad.toml"));
}

#[test]
fn show_unknown_workflow() {
    let temp = init_temp();
    stint()
        .args(["workflow", "show", "nope"])
        .current_dir(temp.path())
        .assert()
        .code(2)
        .stderr(predicate::str::contains("workflow not found"));
}

#[test]
fn required_property_is_enforced() {
    let temp = init_temp();
    let path = write_flow(&temp, "review.toml", REVIEW_FLOW);
    stint()
        .args(["workflow", "add"])
        .arg(&path)
        .current_dir(temp.path())
        .assert()
        .success();

    stint()
        .args(["new", "Refactor", "--flow", "review"])
        .current_dir(temp.path())
        .assert()
        .code(5)
        .stderr(predicate::str::contains("size"));

    let id = create_work_in(&temp, "Refactor", "review", &["size=M"]);
    let work = json(&temp, &["show", &id]);
    assert_eq!(work["state_name"], "QUEUED");
    assert_eq!(work["props"]["size"], "M");
}
