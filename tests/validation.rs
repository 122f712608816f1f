//! Tests for structural playbook validation.
mod common;
use brickflow::prelude::*;
use common::*;

#[test]
fn test_empty_playbook_short_circuits() {
    let issues = validate(&[], &[]);

    assert_eq!(issues.len(), 1);
    assert_eq!(issues[0].id, "empty-playbook");
    assert_eq!(issues[0].severity, Severity::Error);
    assert!(issues[0].brick_id.is_none());
    assert!(has_errors(&issues));
}

#[test]
fn test_single_brick_is_valid() {
    let bricks = vec![brick("a", BrickCategory::Collection, "Intake")];

    assert!(validate(&bricks, &[]).is_empty());
}

#[test]
fn test_valid_chain_has_no_issues() {
    let (bricks, connections) = contract_playbook();

    assert!(validate(&bricks, &connections).is_empty());
}

#[test]
fn test_two_brick_cycle_reports_no_entry_and_cycle() {
    let bricks = vec![
        brick("a", BrickCategory::Review, "A"),
        brick("b", BrickCategory::Review, "B"),
    ];
    let connections = vec![connect("a", "b"), connect("b", "a")];

    let issues = validate(&bricks, &connections);
    let ids: Vec<&str> = issues.iter().map(|i| i.id.as_str()).collect();
    assert_eq!(ids, vec!["no-entry-brick", "cycle"]);
    assert!(issues.iter().all(|i| i.severity == Severity::Error));
}

#[test]
fn test_cycle_error_clears_when_back_edge_removed() {
    let bricks = vec![
        brick("a", BrickCategory::Collection, "A"),
        brick("b", BrickCategory::Review, "B"),
        brick("c", BrickCategory::Approval, "C"),
    ];
    let mut connections = vec![connect("a", "b"), connect("b", "c"), connect("c", "a")];

    let issues = validate(&bricks, &connections);
    assert!(issues.iter().any(|i| i.id == "cycle"));

    connections.retain(|conn| conn.source != "c");
    assert!(validate(&bricks, &connections).is_empty());
}

#[test]
fn test_isolated_brick_gets_both_warnings() {
    let bricks = vec![
        brick("a", BrickCategory::Collection, "A"),
        brick("b", BrickCategory::Review, "B"),
        brick("c", BrickCategory::Approval, "Request Approval"),
    ];
    let connections = vec![connect("a", "b")];

    let issues = validate(&bricks, &connections);
    assert_eq!(issues.len(), 2);
    assert_eq!(issues[0].id, "disconnected:c");
    assert_eq!(issues[1].id, "unreachable:c");
    for issue in &issues {
        assert_eq!(issue.severity, Severity::Warning);
        assert_eq!(issue.brick_id.as_deref(), Some("c"));
        assert!(issue.message.contains("Request Approval"));
    }
    assert!(!has_errors(&issues));
}

#[test]
fn test_validation_is_deterministic() {
    let bricks = vec![
        brick("a", BrickCategory::Collection, "A"),
        brick("b", BrickCategory::Review, "B"),
        brick("c", BrickCategory::Approval, "C"),
    ];
    let connections = vec![connect("a", "b")];

    assert_eq!(
        validate(&bricks, &connections),
        validate(&bricks, &connections)
    );
}

#[test]
fn test_dangling_connection_is_ignored() {
    // The ghost edge would give c1 an incoming connection and break the
    // entry check if it were counted.
    let (bricks, mut connections) = contract_playbook();
    connections.push(connect("ghost", "c1"));

    assert!(validate(&bricks, &connections).is_empty());
}

#[test]
fn test_has_errors_helper() {
    assert!(!has_errors(&[]));

    let warning = Issue::warning("disconnected:x", "x", "'X' is not connected.");
    assert!(!has_errors(&[warning.clone()]));

    let error = Issue::error("cycle", "Playbook contains a cycle.");
    assert!(has_errors(&[warning, error]));
}
