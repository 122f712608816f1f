use crate::analysis::{Analyzer, UpstreamField};
use crate::catalog::{BrickCategory, OutputField};
use crate::graph::Brick;
use ahash::AHashMap;

/// Lightweight handle on a brick for provenance display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BrickRef {
    pub brick_id: String,
    pub label: String,
    pub category: BrickCategory,
}

impl From<&Brick> for BrickRef {
    fn from(brick: &Brick) -> Self {
        Self {
            brick_id: brick.id.clone(),
            label: brick.label.clone(),
            category: brick.category,
        }
    }
}

/// One output field of a brick with where it comes from and where it goes.
///
/// `produced_by` is the closest ancestor emitting a field of the same name,
/// or `None` when the brick originates the field itself. `delivered_to`
/// lists every immediate downstream brick; delivery is not conditional on
/// the consumer actually referencing the field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldFlow {
    pub field: OutputField,
    pub produced_by: Option<BrickRef>,
    pub delivered_to: Vec<BrickRef>,
}

/// Everything the data-flow inspector shows for one brick: the fields it
/// can receive from upstream and the fields it emits downstream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldDataFlow {
    pub brick_id: String,
    pub receives: Vec<UpstreamField>,
    pub outputs: Vec<FieldFlow>,
}

impl<'a> Analyzer<'a> {
    /// Builds the data-flow view for `brick_id`, or `None` when no such
    /// brick exists.
    pub fn field_data_flow(&self, brick_id: &str) -> Option<FieldDataFlow> {
        let brick = self.brick(brick_id)?;

        // Closest ancestor wins for same-named fields; the breadth-first
        // upstream order makes first insertion the nearest producer.
        let mut origin_by_name: AHashMap<String, BrickRef> = AHashMap::new();
        for ancestor in self.all_upstream(brick_id) {
            for field in ancestor.output_fields() {
                origin_by_name
                    .entry(field.name)
                    .or_insert_with(|| BrickRef::from(ancestor));
            }
        }

        let delivered_to: Vec<BrickRef> = self
            .immediate_downstream(brick_id)
            .into_iter()
            .map(BrickRef::from)
            .collect();

        let outputs = brick
            .output_fields()
            .into_iter()
            .map(|field| FieldFlow {
                produced_by: origin_by_name.get(&field.name).cloned(),
                delivered_to: delivered_to.clone(),
                field,
            })
            .collect();

        Some(FieldDataFlow {
            brick_id: brick.id.clone(),
            receives: self.available_upstream_outputs(brick_id),
            outputs,
        })
    }
}
