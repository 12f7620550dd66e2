// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Rust specs for `stint init`.

#![allow(clippy::unwrap_used)]

#[path = "common.rs"]
mod common;

use common::*;

#[test]
fn creates_stint_directory() {
    let temp = TempDir::new().unwrap();

    stint()
        .args(["init", "--project", "myapp"])
        .current_dir(temp.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Project: myapp"));

    assert!(temp.path().join(".stint/config.toml").exists());
    assert!(temp.path().join(".stint/stint.db").exists());
    assert!(temp.path().join(".stint/.gitignore").exists());

    let config = std::fs::read_to_string(temp.path().join(".stint/config.toml")).unwrap();
    assert!(config.contains("project = \"myapp\""));
}

#[test]
fn fails_if_already_initialized() {
    let temp = TempDir::new().unwrap();
    stint()
        .args(["init", "--project", "prj"])
        .current_dir(temp.path())
        .assert()
        .success();

    stint()
        .args(["init", "--project", "prj"])
        .current_dir(temp.path())
        .assert()
        .code(1)
        .stderr(predicate::str::contains("already initialized"));
}

#[test]
fn derives_project_from_directory_name() {
    let temp = TempDir::new().unwrap();
    let dir = temp.path().join("My-App2");
    std::fs::create_dir(&dir).unwrap();

    stint()
        .arg("init")
        .current_dir(&dir)
        .assert()
        .success()
        .stdout(predicate::str::contains("Project: myapp2"));
}

#[test]
fn path_option_initializes_elsewhere() {
    let temp = TempDir::new().unwrap();
    let target = temp.path().join("sub");
    std::fs::create_dir(&target).unwrap();

    stint()
        .args(["init", "--project", "prj", "--path"])
        .arg(&target)
        .current_dir(temp.path())
        .assert()
        .success();

    assert!(target.join(".stint/config.toml").exists());
    assert!(!temp.path().join(".stint").exists());
}

#[test]
fn rejects_invalid_project() {
    let temp = TempDir::new().unwrap();
    stint()
        .args(["init", "--project", "123"])
        .current_dir(temp.path())
        .assert()
        .code(5)
        .stderr(predicate::str::contains("invalid project id"));
}

#[test]
fn commands_outside_a_project_fail() {
    let temp = TempDir::new().unwrap();
    stint()
        .arg("list")
        .current_dir(temp.path())
        .assert()
        .code(1)
        .stderr(predicate::str::contains("not initialized"));
}

#[test]
fn directory_flag_changes_working_directory() {
    let temp = init_temp();
    let other = TempDir::new().unwrap();

    stint()
        .arg("-C")
        .arg(temp.path())
        .args(["workflow", "list"])
        .current_dir(other.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("generic"));
}
