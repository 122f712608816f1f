//! Tests for the layered auto-layout.
mod common;
use brickflow::prelude::*;
use common::*;

fn pos(positions: &ahash::AHashMap<String, Position>, id: &str) -> Position {
    positions.get(id).copied().expect("brick should be placed")
}

#[test]
fn test_chain_stacks_top_to_bottom() {
    let (bricks, connections) = contract_playbook();
    let positions = layout(&bricks, &connections);

    assert_eq!(positions.len(), 5);
    for (rank, id) in ["c1", "d1", "r1", "ap1", "s1"].iter().enumerate() {
        let p = pos(&positions, id);
        assert_eq!(p.x, 40.0);
        assert_eq!(p.y, 40.0 + rank as f64 * 180.0);
    }
}

#[test]
fn test_longest_path_rule_beats_bfs_depth() {
    // The direct a -> d edge must not pull d up to rank 1.
    let bricks = vec![
        brick("a", BrickCategory::Collection, "A"),
        brick("b", BrickCategory::Review, "B"),
        brick("c", BrickCategory::Approval, "C"),
        brick("d", BrickCategory::Commitment, "D"),
    ];
    let connections = vec![
        connect("a", "b"),
        connect("a", "c"),
        connect("b", "d"),
        connect("c", "d"),
        connect("a", "d"),
    ];
    let positions = layout(&bricks, &connections);

    assert_eq!(pos(&positions, "a").y, 40.0);
    assert_eq!(pos(&positions, "b").y, 220.0);
    assert_eq!(pos(&positions, "c").y, 220.0);
    assert_eq!(pos(&positions, "d").y, 400.0);
}

#[test]
fn test_rows_center_against_widest_row() {
    let bricks = vec![
        brick("a", BrickCategory::Collection, "A"),
        brick("b", BrickCategory::Review, "B"),
        brick("c", BrickCategory::Approval, "C"),
    ];
    let connections = vec![connect("a", "b"), connect("a", "c")];
    let positions = layout(&bricks, &connections);

    // Widest row is [b, c] at 460 units; the single-brick row floats to
    // its center.
    assert_eq!(pos(&positions, "a").x, 170.0);
    assert_eq!(pos(&positions, "b").x, 40.0);
    assert_eq!(pos(&positions, "c").x, 300.0);
}

#[test]
fn test_layout_is_idempotent() {
    let (bricks, connections) = contract_playbook();

    let first = layout(&bricks, &connections);
    let second = layout(&bricks, &connections);
    assert_eq!(first, second);
}

#[test]
fn test_cycle_members_share_the_top_row() {
    let bricks = vec![
        brick("a", BrickCategory::Review, "A"),
        brick("b", BrickCategory::Review, "B"),
        brick("c", BrickCategory::Review, "C"),
    ];
    let connections = vec![connect("a", "b"), connect("b", "c"), connect("c", "a")];
    let positions = layout(&bricks, &connections);

    assert_eq!(positions.len(), 3);
    assert_eq!(pos(&positions, "a").x, 40.0);
    assert_eq!(pos(&positions, "b").x, 300.0);
    assert_eq!(pos(&positions, "c").x, 560.0);
    for id in ["a", "b", "c"] {
        assert_eq!(pos(&positions, id).y, 40.0);
    }
}

#[test]
fn test_empty_graph_yields_no_positions() {
    assert!(layout(&[], &[]).is_empty());
}

#[test]
fn test_single_brick_sits_at_the_margin() {
    let bricks = vec![brick("solo", BrickCategory::Collection, "Solo")];
    let p = pos(&layout(&bricks, &[]), "solo");

    assert_eq!(p.x, 40.0);
    assert_eq!(p.y, 40.0);
}

#[test]
fn test_dangling_connections_do_not_shift_layout() {
    let (bricks, connections) = contract_playbook();
    let clean = layout(&bricks, &connections);

    let mut noisy = connections.clone();
    noisy.push(connect("ghost", "r1"));
    noisy.push(connect("r1", "phantom"));
    assert_eq!(layout(&bricks, &noisy), clean);
}
