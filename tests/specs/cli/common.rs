// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

// Allow unused items: test helpers are shared across multiple test files,
// and not every test file uses every helper.
#![allow(dead_code)]
#![allow(unused_imports)]

use assert_cmd::cargo::cargo_bin_cmd;
use assert_cmd::Command;

pub use predicates::prelude::*;
pub use tempfile::TempDir;

pub fn stint() -> Command {
    let mut cmd = cargo_bin_cmd!("stint");
    cmd.env_remove("STINT_LOG").env_remove("RUST_LOG");
    cmd
}

/// Initialized temp directory for project "prj" with the generic workflow.
pub fn init_temp() -> TempDir {
    let temp = TempDir::new().unwrap();
    stint()
        .args(["init", "--project", "prj"])
        .current_dir(temp.path())
        .assert()
        .success();
    stint()
        .args(["workflow", "generic"])
        .current_dir(temp.path())
        .assert()
        .success();
    temp
}

/// Creates a work item and returns its id.
pub fn create_work(temp: &TempDir, name: &str) -> String {
    create_work_in(temp, name, "generic", &[])
}

pub fn create_work_in(temp: &TempDir, name: &str, flow: &str, props: &[&str]) -> String {
    let mut cmd = stint();
    cmd.args(["new", name, "--flow", flow, "-o", "id"]);
    for prop in props {
        cmd.args(["--prop", prop]);
    }
    let output = cmd.current_dir(temp.path()).output().unwrap();
    assert!(
        output.status.success(),
        "new failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    String::from_utf8_lossy(&output.stdout).trim().to_string()
}

pub fn move_work(temp: &TempDir, id: &str, state: &str) {
    stint()
        .args(["move", id, state])
        .current_dir(temp.path())
        .assert()
        .success();
}

/// Runs a command and parses its stdout as JSON.
pub fn json(temp: &TempDir, args: &[&str]) -> serde_json::Value {
    let output = stint()
        .args(args)
        .args(["-o", "json"])
        .current_dir(temp.path())
        .output()
        .unwrap();
    assert!(
        output.status.success(),
        "{:?} failed: {}",
        args,
        String::from_utf8_lossy(&output.stderr)
    );
    serde_json::from_slice(&output.stdout).unwrap()
}
