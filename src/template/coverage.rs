use crate::analysis::UpstreamField;
use crate::catalog::BrickCategory;
use crate::template::{TemplateVariable, extract_variables};
use ahash::AHashMap;

/// Namespaces the runtime fills in regardless of graph shape.
pub const ALWAYS_AVAILABLE_NAMESPACES: [&str; 3] = ["workstream", "user", "play_config"];

/// Namespace that reads from upstream brick outputs.
pub const PREVIOUS_OUTPUT_NAMESPACE: &str = "previous_output";

/// How a single template variable was classified against upstream data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VariableResolution {
    AlwaysAvailable {
        namespace: String,
    },
    /// Matched a field on an upstream collection brick.
    CollectionField {
        brick_id: String,
        brick_label: String,
    },
    Unresolved,
}

impl VariableResolution {
    pub fn is_resolved(&self) -> bool {
        !matches!(self, Self::Unresolved)
    }

    /// Display string for the coverage panel.
    pub fn source_label(&self) -> String {
        match self {
            Self::AlwaysAvailable { namespace } => format!("Always available ({namespace})"),
            Self::CollectionField { brick_label, .. } => brick_label.clone(),
            Self::Unresolved => "No matching upstream field".to_string(),
        }
    }
}

/// One extracted variable together with its classification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VariableCoverage {
    pub variable: TemplateVariable,
    pub resolution: VariableResolution,
}

/// Classifies template variables against the outputs reachable upstream.
///
/// Only fields of collection-category ancestors are indexed for matching;
/// a review or approval brick between the template and the collection step
/// never shadows the collected data. Where two collection ancestors define
/// the same field name, the closer one wins because `upstream_outputs`
/// arrives closest first.
pub fn analyze_coverage(
    variables: Vec<TemplateVariable>,
    upstream_outputs: &[UpstreamField],
) -> Vec<VariableCoverage> {
    let mut collection_fields: AHashMap<&str, &UpstreamField> = AHashMap::new();
    for output in upstream_outputs {
        if output.source_category == BrickCategory::Collection {
            collection_fields
                .entry(output.field.name.as_str())
                .or_insert(output);
        }
    }

    variables
        .into_iter()
        .map(|variable| {
            let resolution = classify(&variable, &collection_fields);
            VariableCoverage {
                variable,
                resolution,
            }
        })
        .collect()
}

/// Extracts and classifies in one step.
pub fn template_coverage(text: &str, upstream_outputs: &[UpstreamField]) -> Vec<VariableCoverage> {
    analyze_coverage(extract_variables(text), upstream_outputs)
}

fn classify(
    variable: &TemplateVariable,
    collection_fields: &AHashMap<&str, &UpstreamField>,
) -> VariableResolution {
    match variable.namespace.as_deref() {
        Some(namespace) if ALWAYS_AVAILABLE_NAMESPACES.contains(&namespace) => {
            VariableResolution::AlwaysAvailable {
                namespace: namespace.to_string(),
            }
        }
        Some(PREVIOUS_OUTPUT_NAMESPACE) | None => {
            match collection_fields.get(variable.field_path.as_str()) {
                Some(output) => VariableResolution::CollectionField {
                    brick_id: output.source_id.clone(),
                    brick_label: output.source_label.clone(),
                },
                None => VariableResolution::Unresolved,
            }
        }
        Some(_) => VariableResolution::Unresolved,
    }
}
