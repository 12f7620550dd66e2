// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

#![allow(clippy::unwrap_used)]

use super::*;
use yare::parameterized;

fn names(transitions: Vec<&Transition>) -> Vec<&str> {
    transitions.into_iter().map(|t| t.name.as_str()).collect()
}

#[test]
fn generic_machine_is_valid() {
    StateMachine::generic().validate().unwrap();
}

#[parameterized(
    from_pending = { "PENDING", "", &["begin", "close"] },
    from_doing = { "DOING", "", &["cancel", "finish"] },
    from_done = { "DONE", "", &["reopen"] },
    into_done = { "", "DONE", &["close", "finish"] },
    into_pending = { "", "PENDING", &["cancel", "reopen"] },
    exact_edge = { "DOING", "DONE", &["finish"] },
    missing_edge = { "DONE", "DOING", &[] },
    all = { "", "", &["begin", "close", "cancel", "finish", "reopen"] },
    unknown_from = { "UNKNOWN", "", &[] },
    unknown_to = { "", "UNKNOWN", &[] },
    both_unknown = { "NOPE", "NADA", &[] },
)]
fn available_transitions(from: &str, to: &str, expected: &[&str]) {
    let machine = StateMachine::generic();
    assert_eq!(names(machine.available_transitions(from, to)), expected);
}

#[test]
fn available_transitions_is_case_sensitive() {
    let machine = StateMachine::generic();
    assert!(machine.available_transitions("pending", "").is_empty());
}

#[test]
fn transitions_may_share_a_name_across_edges() {
    let machine = StateMachine::new(
        vec![
            State::new("NEW", Category::Backlog),
            State::new("TRIAGED", Category::Backlog),
            State::new("SHIPPED", Category::Done),
        ],
        vec![
            Transition::new("ship", "NEW", "SHIPPED"),
            Transition::new("ship", "TRIAGED", "SHIPPED"),
        ],
    );
    machine.validate().unwrap();
    assert_eq!(machine.available_transitions("", "SHIPPED").len(), 2);
    assert_eq!(machine.available_transitions("TRIAGED", "").len(), 1);
}

#[test]
fn initial_state_is_first_backlog_state() {
    let machine = StateMachine::new(
        vec![
            State::new("REVIEW", Category::InProcess),
            State::new("INBOX", Category::Backlog),
            State::new("READY", Category::Backlog),
        ],
        vec![],
    );
    assert_eq!(machine.initial_state().unwrap().name, "INBOX");
}

#[test]
fn state_lookup() {
    let machine = StateMachine::generic();
    assert_eq!(machine.state("DOING").unwrap().category, Category::InProcess);
    assert!(machine.state("MISSING").is_none());
}

#[test]
fn targets_from_deduplicates() {
    let machine = StateMachine::new(
        vec![
            State::new("A", Category::Backlog),
            State::new("B", Category::Done),
        ],
        vec![
            Transition::new("finish", "A", "B"),
            Transition::new("skip", "A", "B"),
        ],
    );
    assert_eq!(machine.targets_from("A"), vec!["B"]);
    assert!(machine.targets_from("B").is_empty());
}

#[test]
fn validate_reports_unknown_endpoint() {
    let mut machine = StateMachine::generic();
    machine
        .transitions
        .push(Transition::new("ship", "DONE", "SHIPPED"));
    let err = machine.validate().unwrap_err();
    assert!(matches!(err, Error::InvalidWorkflow(_)));
    assert!(err.to_string().contains("SHIPPED"));
}

#[test]
fn validate_reports_duplicate_state() {
    let mut machine = StateMachine::generic();
    machine.states.push(State::new("DOING", Category::InProcess));
    let err = machine.validate().unwrap_err();
    assert!(err.to_string().contains("duplicate state 'DOING'"));
}

#[test]
fn validate_reports_duplicate_transition() {
    let mut machine = StateMachine::generic();
    machine
        .transitions
        .push(Transition::new("begin", "PENDING", "DOING"));
    let err = machine.validate().unwrap_err();
    assert!(err.to_string().contains("duplicate transition"));
}

#[test]
fn validate_requires_backlog_state() {
    let machine = StateMachine::new(vec![State::new("DOING", Category::InProcess)], vec![]);
    let err = machine.validate().unwrap_err();
    assert!(err.to_string().contains("no backlog state"));
}

#[test]
fn validate_rejects_empty_machine() {
    let err = StateMachine::default().validate().unwrap_err();
    assert!(err.to_string().contains("no states"));
}

#[test]
fn validate_collects_every_problem() {
    let machine = StateMachine::new(
        vec![State::new("A", Category::Backlog)],
        vec![
            Transition::new("x", "A", "B"),
            Transition::new("y", "C", "A"),
        ],
    );
    let msg = machine.validate().unwrap_err().to_string();
    assert!(msg.contains("'B'"));
    assert!(msg.contains("'C'"));
}

#[test]
fn machine_is_shareable_across_threads() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<StateMachine>();
}
