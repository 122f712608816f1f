use serde::{Deserialize, Serialize};
use std::fmt;

/// The closed set of step types a playbook is built from.
///
/// Every brick on the canvas belongs to exactly one category, fixed at
/// creation time. The category drives the default label, the palette
/// description and the output schema the step exposes to downstream bricks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BrickCategory {
    Collection,
    Review,
    Approval,
    Documentation,
    Commitment,
}

impl BrickCategory {
    /// All categories, in palette order.
    pub const ALL: [BrickCategory; 5] = [
        BrickCategory::Collection,
        BrickCategory::Review,
        BrickCategory::Approval,
        BrickCategory::Documentation,
        BrickCategory::Commitment,
    ];

    /// The storage key for this category (`"collection"`, `"review"`, ...).
    pub fn as_key(&self) -> &'static str {
        match self {
            BrickCategory::Collection => "collection",
            BrickCategory::Review => "review",
            BrickCategory::Approval => "approval",
            BrickCategory::Documentation => "documentation",
            BrickCategory::Commitment => "commitment",
        }
    }

    /// Parses a storage key back into a category.
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "collection" => Some(BrickCategory::Collection),
            "review" => Some(BrickCategory::Review),
            "approval" => Some(BrickCategory::Approval),
            "documentation" => Some(BrickCategory::Documentation),
            "commitment" => Some(BrickCategory::Commitment),
            _ => None,
        }
    }

    /// The label a freshly dropped brick starts out with.
    pub fn default_label(&self) -> &'static str {
        match self {
            BrickCategory::Collection => "Collect Information",
            BrickCategory::Review => "Review Document",
            BrickCategory::Approval => "Request Approval",
            BrickCategory::Documentation => "Generate Document",
            BrickCategory::Commitment => "Collect Signature",
        }
    }

    /// Palette description shown next to the brick.
    pub fn description(&self) -> &'static str {
        match self {
            BrickCategory::Collection => {
                "Gather structured information from a counterparty or colleague"
            }
            BrickCategory::Review => "Have a person review a document or submission",
            BrickCategory::Approval => "Route the result to an approver or approval team",
            BrickCategory::Documentation => "Generate a document from a template",
            BrickCategory::Commitment => "Collect a binding signature on a document",
        }
    }
}

impl fmt::Display for BrickCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_key())
    }
}
