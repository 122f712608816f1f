pub mod dataflow;

pub use dataflow::*;

use crate::catalog::{BrickCategory, OutputField};
use crate::graph::{Brick, Connection};
use ahash::{AHashMap, AHashSet};
use std::collections::VecDeque;

/// An output field reachable from upstream, together with the brick that
/// produces it. Closeness is encoded by position: fields from nearer
/// ancestors come first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpstreamField {
    pub field: OutputField,
    pub source_id: String,
    pub source_label: String,
    pub source_category: BrickCategory,
}

/// Read-only traversal over a playbook's bricks and connections.
///
/// Built fresh from the current collections before each use; nothing is
/// cached across mutations. Connections whose endpoints do not resolve to
/// a known brick are ignored rather than reported — a dangling row in
/// storage must never break the editor.
pub struct Analyzer<'a> {
    by_id: AHashMap<&'a str, &'a Brick>,
    incoming: AHashMap<&'a str, Vec<&'a str>>,
    outgoing: AHashMap<&'a str, Vec<&'a str>>,
}

impl<'a> Analyzer<'a> {
    pub fn new(bricks: &'a [Brick], connections: &'a [Connection]) -> Self {
        let by_id: AHashMap<&str, &Brick> =
            bricks.iter().map(|b| (b.id.as_str(), b)).collect();

        let mut incoming: AHashMap<&str, Vec<&str>> = AHashMap::new();
        let mut outgoing: AHashMap<&str, Vec<&str>> = AHashMap::new();
        for connection in connections {
            let source = connection.source.as_str();
            let target = connection.target.as_str();
            if !by_id.contains_key(source) || !by_id.contains_key(target) {
                continue;
            }
            incoming.entry(target).or_default().push(source);
            outgoing.entry(source).or_default().push(target);
        }

        Self {
            by_id,
            incoming,
            outgoing,
        }
    }

    /// Looks a brick up by id.
    pub fn brick(&self, brick_id: &str) -> Option<&'a Brick> {
        self.by_id.get(brick_id).copied()
    }

    /// Bricks with a connection directly into `brick_id`.
    pub fn immediate_upstream(&self, brick_id: &str) -> Vec<&'a Brick> {
        self.parent_ids(brick_id)
            .iter()
            .filter_map(|&id| self.brick(id))
            .collect()
    }

    /// Bricks with a connection directly out of `brick_id`.
    pub fn immediate_downstream(&self, brick_id: &str) -> Vec<&'a Brick> {
        self.child_ids(brick_id)
            .iter()
            .filter_map(|&id| self.brick(id))
            .collect()
    }

    /// All ancestors of `brick_id`, closest first.
    ///
    /// Breadth-first walk against the connection direction. The visited set
    /// guarantees termination and duplicate-free output even when the
    /// connection set contains a cycle; the brick itself never appears in
    /// its own ancestry. The closest-first order is load-bearing: field
    /// provenance resolves to the nearest ancestor emitting a name.
    pub fn all_upstream(&self, brick_id: &str) -> Vec<&'a Brick> {
        let mut visited: AHashSet<&str> = AHashSet::new();
        visited.insert(brick_id);
        let mut queue: VecDeque<&str> = self.parent_ids(brick_id).iter().copied().collect();
        let mut ancestors = Vec::new();

        while let Some(id) = queue.pop_front() {
            if !visited.insert(id) {
                continue;
            }
            let Some(brick) = self.brick(id) else {
                continue;
            };
            ancestors.push(brick);
            for &parent in self.parent_ids(id) {
                if !visited.contains(parent) {
                    queue.push_back(parent);
                }
            }
        }
        ancestors
    }

    /// Every output field available to `brick_id` from its ancestors:
    /// each ancestor's static schema plus the complete user-defined fields
    /// of collection ancestors. Empty for entry bricks — the UI presents
    /// that as "no upstream data", not as an error.
    pub fn available_upstream_outputs(&self, brick_id: &str) -> Vec<UpstreamField> {
        let mut outputs = Vec::new();
        for ancestor in self.all_upstream(brick_id) {
            for field in ancestor.output_fields() {
                outputs.push(UpstreamField {
                    field,
                    source_id: ancestor.id.clone(),
                    source_label: ancestor.label.clone(),
                    source_category: ancestor.category,
                });
            }
        }
        outputs
    }

    /// The nearest documentation brick on every upstream path.
    ///
    /// Walks upstream like [`all_upstream`](Self::all_upstream), but a path
    /// stops at the first documentation brick it meets: that brick is
    /// included and its own ancestors are not explored. Document pickers
    /// use this so only documents no closer documentation step supersedes
    /// are offered.
    pub fn nearest_upstream_documents(&self, brick_id: &str) -> Vec<&'a Brick> {
        let mut visited: AHashSet<&str> = AHashSet::new();
        visited.insert(brick_id);
        let mut queue: VecDeque<&str> = self.parent_ids(brick_id).iter().copied().collect();
        let mut documents = Vec::new();

        while let Some(id) = queue.pop_front() {
            if !visited.insert(id) {
                continue;
            }
            let Some(brick) = self.brick(id) else {
                continue;
            };
            if brick.category == BrickCategory::Documentation {
                documents.push(brick);
                continue;
            }
            for &parent in self.parent_ids(id) {
                if !visited.contains(parent) {
                    queue.push_back(parent);
                }
            }
        }
        documents
    }

    fn parent_ids(&self, brick_id: &str) -> &[&'a str] {
        match self.incoming.get(brick_id) {
            Some(ids) => ids,
            None => &[],
        }
    }

    fn child_ids(&self, brick_id: &str) -> &[&'a str] {
        match self.outgoing.get(brick_id) {
            Some(ids) => ids,
            None => &[],
        }
    }
}
