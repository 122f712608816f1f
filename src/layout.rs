use crate::graph::{Brick, Connection, Position};
use ahash::{AHashMap, AHashSet};
use std::collections::VecDeque;

// Fixed module-wide so repeated layouts of the same graph land on the
// same coordinates. Tune here, never per call.
pub const NODE_WIDTH: f64 = 200.0;
pub const NODE_HEIGHT: f64 = 80.0;
pub const RANK_SEPARATION: f64 = 100.0;
pub const NODE_SEPARATION: f64 = 60.0;
pub const MARGIN_X: f64 = 40.0;
pub const MARGIN_Y: f64 = 40.0;

/// Computes a top-to-bottom layered position for every brick.
///
/// Ranks come from a Kahn topological sweep with the longest-path rule: a
/// brick sits one rank below its deepest parent, not at its naive BFS
/// depth. Bricks the sweep cannot reach (members of a cycle) keep rank 0
/// and are appended after the sorted ones; a malformed graph still gets a
/// layout. Within a rank, bricks run left to right in sweep order and each
/// row is centered against the widest row.
///
/// Pure function of the graph topology, so applying it twice moves nothing
/// the second time. Connections with a missing endpoint are ignored.
pub fn layout(bricks: &[Brick], connections: &[Connection]) -> AHashMap<String, Position> {
    if bricks.is_empty() {
        return AHashMap::new();
    }

    let ids: AHashSet<&str> = bricks.iter().map(|b| b.id.as_str()).collect();
    let mut outgoing: AHashMap<&str, Vec<&str>> = AHashMap::new();
    let mut remaining: AHashMap<&str, usize> =
        bricks.iter().map(|b| (b.id.as_str(), 0usize)).collect();
    for connection in connections {
        let source = connection.source.as_str();
        let target = connection.target.as_str();
        if !ids.contains(source) || !ids.contains(target) {
            continue;
        }
        outgoing.entry(source).or_default().push(target);
        if let Some(count) = remaining.get_mut(target) {
            *count += 1;
        }
    }

    let mut rank: AHashMap<&str, usize> =
        bricks.iter().map(|b| (b.id.as_str(), 0usize)).collect();
    let mut order: Vec<&str> = Vec::with_capacity(bricks.len());
    let mut queue: VecDeque<&str> = bricks
        .iter()
        .map(|b| b.id.as_str())
        .filter(|id| remaining.get(id).copied().unwrap_or(0) == 0)
        .collect();

    while let Some(id) = queue.pop_front() {
        order.push(id);
        let Some(children) = outgoing.get(id) else {
            continue;
        };
        let below_parent = rank.get(id).copied().unwrap_or(0) + 1;
        for &child in children {
            let child_rank = rank.entry(child).or_insert(0);
            if below_parent > *child_rank {
                *child_rank = below_parent;
            }
            if let Some(count) = remaining.get_mut(child) {
                *count -= 1;
                if *count == 0 {
                    queue.push_back(child);
                }
            }
        }
    }

    // Sweep leftovers are cycle members; they keep rank 0 and trail the
    // sorted bricks within that row.
    if order.len() < bricks.len() {
        let placed: AHashSet<&str> = order.iter().copied().collect();
        for brick in bricks {
            if !placed.contains(brick.id.as_str()) {
                order.push(brick.id.as_str());
            }
        }
    }

    let mut rows: Vec<Vec<&str>> = Vec::new();
    for &id in &order {
        let r = rank.get(id).copied().unwrap_or(0);
        while rows.len() <= r {
            rows.push(Vec::new());
        }
        rows[r].push(id);
    }

    let max_width = rows
        .iter()
        .map(|row| row_width(row.len()))
        .fold(0.0_f64, f64::max);

    let mut positions = AHashMap::with_capacity(bricks.len());
    for (r, row) in rows.iter().enumerate() {
        let y = MARGIN_Y + r as f64 * (NODE_HEIGHT + RANK_SEPARATION);
        let left = MARGIN_X + (max_width - row_width(row.len())) / 2.0;
        for (i, &id) in row.iter().enumerate() {
            let x = left + i as f64 * (NODE_WIDTH + NODE_SEPARATION);
            positions.insert(id.to_string(), Position::new(x, y));
        }
    }
    positions
}

fn row_width(count: usize) -> f64 {
    count as f64 * NODE_WIDTH + count.saturating_sub(1) as f64 * NODE_SEPARATION
}
