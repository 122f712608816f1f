use crate::graph::{Brick, Connection};
use ahash::{AHashMap, AHashSet};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::fmt;

/// Severity of a validation issue. Errors describe playbooks that cannot
/// run; warnings are advisory and never block anything on their own.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Error,
    Warning,
}

impl Severity {
    pub fn as_key(&self) -> &'static str {
        match self {
            Severity::Error => "error",
            Severity::Warning => "warning",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_key())
    }
}

/// A single finding from [`validate`]. `brick_id` is set for per-brick
/// findings so the editor can focus the offending brick.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Issue {
    pub id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub brick_id: Option<String>,
    pub message: String,
    pub severity: Severity,
}

impl Issue {
    pub fn error(id: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            brick_id: None,
            message: message.into(),
            severity: Severity::Error,
        }
    }

    pub fn warning(
        id: impl Into<String>,
        brick_id: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            brick_id: Some(brick_id.into()),
            message: message.into(),
            severity: Severity::Warning,
        }
    }
}

/// True when at least one issue is a hard error.
pub fn has_errors(issues: &[Issue]) -> bool {
    issues.iter().any(|issue| issue.severity == Severity::Error)
}

/// Checks the playbook structure and returns every applicable finding.
///
/// All checks run and all findings are returned together; the one
/// exception is the empty playbook, which short-circuits because nothing
/// else is meaningful without bricks. Output order is deterministic for an
/// unmodified graph. Connections with a missing endpoint are ignored.
pub fn validate(bricks: &[Brick], connections: &[Connection]) -> Vec<Issue> {
    if bricks.is_empty() {
        return vec![Issue::error(
            "empty-playbook",
            "Playbook has no bricks. Drag a brick from the palette to get started.",
        )];
    }

    let ids: AHashSet<&str> = bricks.iter().map(|b| b.id.as_str()).collect();
    let mut in_degree: AHashMap<&str, usize> = AHashMap::new();
    let mut out_degree: AHashMap<&str, usize> = AHashMap::new();
    let mut outgoing: AHashMap<&str, Vec<&str>> = AHashMap::new();
    for connection in connections {
        let source = connection.source.as_str();
        let target = connection.target.as_str();
        if !ids.contains(source) || !ids.contains(target) {
            continue;
        }
        *in_degree.entry(target).or_insert(0) += 1;
        *out_degree.entry(source).or_insert(0) += 1;
        outgoing.entry(source).or_default().push(target);
    }

    let mut issues = Vec::new();

    if !bricks.iter().any(|b| degree(&in_degree, &b.id) == 0) {
        issues.push(Issue::error(
            "no-entry-brick",
            "Playbook has no entry brick. At least one brick must have no incoming connections.",
        ));
    }

    // A lone brick is a playbook being started, not a mistake.
    if bricks.len() > 1 {
        for brick in bricks {
            if degree(&in_degree, &brick.id) == 0 && degree(&out_degree, &brick.id) == 0 {
                issues.push(Issue::warning(
                    format!("disconnected:{}", brick.id),
                    &brick.id,
                    format!("'{}' is not connected to the rest of the playbook.", brick.label),
                ));
            }
        }
    }

    if contains_cycle(bricks, &outgoing) {
        issues.push(Issue::error(
            "cycle",
            "Playbook contains a cycle. Bricks cannot depend on their own output.",
        ));
    }

    // Reachability is only meaningful from bricks that start a path; a
    // graph without such a brick (all bricks isolated, or one big cycle)
    // is already covered by the checks above.
    let seeds: Vec<&str> = bricks
        .iter()
        .map(|b| b.id.as_str())
        .filter(|id| degree(&in_degree, id) == 0 && degree(&out_degree, id) > 0)
        .collect();
    if !seeds.is_empty() {
        let mut reached: AHashSet<&str> = seeds.iter().copied().collect();
        let mut queue: VecDeque<&str> = seeds.into_iter().collect();
        while let Some(id) = queue.pop_front() {
            if let Some(children) = outgoing.get(id) {
                for &child in children {
                    if reached.insert(child) {
                        queue.push_back(child);
                    }
                }
            }
        }
        for brick in bricks {
            if !reached.contains(brick.id.as_str()) {
                issues.push(Issue::warning(
                    format!("unreachable:{}", brick.id),
                    &brick.id,
                    format!("'{}' can never be reached from an entry brick.", brick.label),
                ));
            }
        }
    }

    issues
}

fn degree(map: &AHashMap<&str, usize>, id: &str) -> usize {
    map.get(id).copied().unwrap_or(0)
}

fn contains_cycle(bricks: &[Brick], outgoing: &AHashMap<&str, Vec<&str>>) -> bool {
    let mut visited: AHashSet<&str> = AHashSet::new();
    let mut stack: AHashSet<&str> = AHashSet::new();
    bricks
        .iter()
        .any(|brick| walk(brick.id.as_str(), outgoing, &mut visited, &mut stack))
}

fn walk<'a>(
    id: &'a str,
    outgoing: &AHashMap<&str, Vec<&'a str>>,
    visited: &mut AHashSet<&'a str>,
    stack: &mut AHashSet<&'a str>,
) -> bool {
    if stack.contains(id) {
        return true;
    }
    if !visited.insert(id) {
        return false;
    }
    stack.insert(id);
    if let Some(children) = outgoing.get(id) {
        for &child in children {
            if walk(child, outgoing, visited, stack) {
                return true;
            }
        }
    }
    stack.remove(id);
    false
}
