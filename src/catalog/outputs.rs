use super::category::BrickCategory;
use serde::{Deserialize, Serialize};

/// One entry in a category's static output schema.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    pub name: &'static str,
    pub field_type: &'static str,
    pub description: &'static str,
}

/// An output field a concrete brick exposes once executed. Owned variant of
/// [`FieldSpec`], also used for the dynamic fields of collection bricks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputField {
    pub name: String,
    pub field_type: String,
    pub description: String,
}

impl From<&FieldSpec> for OutputField {
    fn from(spec: &FieldSpec) -> Self {
        OutputField {
            name: spec.name.to_string(),
            field_type: spec.field_type.to_string(),
            description: spec.description.to_string(),
        }
    }
}

/// A user-defined field on a collection brick, stored in its config under
/// the `"fields"` key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CollectionField {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub label: String,
    #[serde(default, alias = "fieldType", skip_serializing_if = "Option::is_none")]
    pub field_type: Option<String>,
}

impl CollectionField {
    /// A field only contributes an output once the author has given it both
    /// a name and a label.
    pub fn is_complete(&self) -> bool {
        !self.name.trim().is_empty() && !self.label.trim().is_empty()
    }
}

/// The fixed output schema each category produces when its step runs.
pub fn static_outputs(category: BrickCategory) -> &'static [FieldSpec] {
    match category {
        BrickCategory::Collection => COLLECTION_OUTPUTS,
        BrickCategory::Review => REVIEW_OUTPUTS,
        BrickCategory::Approval => APPROVAL_OUTPUTS,
        BrickCategory::Documentation => DOCUMENTATION_OUTPUTS,
        BrickCategory::Commitment => COMMITMENT_OUTPUTS,
    }
}

const COLLECTION_OUTPUTS: &[FieldSpec] = &[
    FieldSpec {
        name: "collected_values",
        field_type: "object",
        description: "All values captured by the collection form",
    },
    FieldSpec {
        name: "collected_at",
        field_type: "timestamp",
        description: "When the form was submitted",
    },
    FieldSpec {
        name: "collected_by",
        field_type: "id",
        description: "User who submitted the form",
    },
];

const REVIEW_OUTPUTS: &[FieldSpec] = &[
    FieldSpec {
        name: "review_status",
        field_type: "string",
        description: "Outcome of the review (approved, changes_requested, ...)",
    },
    FieldSpec {
        name: "reviewed_by",
        field_type: "id",
        description: "User who completed the review",
    },
    FieldSpec {
        name: "reviewed_at",
        field_type: "timestamp",
        description: "When the review was completed",
    },
    FieldSpec {
        name: "comments",
        field_type: "string",
        description: "Reviewer comments",
    },
];

const APPROVAL_OUTPUTS: &[FieldSpec] = &[
    FieldSpec {
        name: "approval_status",
        field_type: "string",
        description: "Outcome of the approval request",
    },
    FieldSpec {
        name: "approved_by",
        field_type: "id",
        description: "User or team that decided",
    },
    FieldSpec {
        name: "approved_at",
        field_type: "timestamp",
        description: "When the decision was made",
    },
    FieldSpec {
        name: "rejection_reason",
        field_type: "string",
        description: "Reason given when the request was rejected",
    },
];

const DOCUMENTATION_OUTPUTS: &[FieldSpec] = &[
    FieldSpec {
        name: "document_id",
        field_type: "id",
        description: "Identifier of the generated document",
    },
    FieldSpec {
        name: "document_url",
        field_type: "string",
        description: "Link to the generated document",
    },
    FieldSpec {
        name: "format",
        field_type: "string",
        description: "File format of the generated document",
    },
    FieldSpec {
        name: "name",
        field_type: "string",
        description: "Display name of the generated document",
    },
    FieldSpec {
        name: "template_used",
        field_type: "string",
        description: "Template the document was generated from",
    },
];

const COMMITMENT_OUTPUTS: &[FieldSpec] = &[
    FieldSpec {
        name: "signature_status",
        field_type: "string",
        description: "State of the signature request",
    },
    FieldSpec {
        name: "signed_by",
        field_type: "id",
        description: "Signer who completed the request",
    },
    FieldSpec {
        name: "signed_at",
        field_type: "timestamp",
        description: "When the document was signed",
    },
    FieldSpec {
        name: "signed_document_url",
        field_type: "string",
        description: "Link to the executed document",
    },
];
