use crate::catalog::BrickCategory;
use crate::graph::Brick;
use crate::template::TemplateDirectory;
use serde_json::Value;

/// Leading verbs stripped from a source label when deriving the subject
/// noun phrase, e.g. "Draft NDA" contributes the subject "NDA".
pub const VERB_PREFIXES: [&str; 7] = [
    "generate", "create", "draft", "gather", "collect", "get", "build",
];

/// Changes auto-configuration wants applied to the target brick of a new
/// connection. The session applies it through its normal patch paths so
/// the shallow-merge semantics hold.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BrickPatch {
    pub label: Option<String>,
    pub config: Vec<(String, Value)>,
}

impl BrickPatch {
    pub fn is_empty(&self) -> bool {
        self.label.is_none() && self.config.is_empty()
    }
}

/// Derives the patch for a freshly drawn connection from `source` into
/// `target`.
///
/// Strictly non-destructive: a label is only replaced while it is still the
/// category default, and a config key is only set while unset (missing,
/// null or empty string). Anything the author already touched stays.
pub fn configure_connection(
    source: &Brick,
    target: &Brick,
    templates: Option<&dyn TemplateDirectory>,
) -> BrickPatch {
    let mut patch = BrickPatch::default();

    match (source.category, target.category) {
        (BrickCategory::Documentation, BrickCategory::Review) => {
            if target.has_default_label() {
                patch.label = Some(format!("Review {}", subject_for(source, templates)));
            }
            set_if_unset(
                &mut patch,
                target,
                "document_id",
                Value::String(source.id.clone()),
            );
        }
        (BrickCategory::Documentation, BrickCategory::Approval) => {
            set_if_unset(
                &mut patch,
                target,
                "document_id",
                Value::String(source.id.clone()),
            );
        }
        (BrickCategory::Documentation, BrickCategory::Commitment) => {
            set_if_unset(
                &mut patch,
                target,
                "document_source",
                Value::String("previous_brick".to_string()),
            );
            set_if_unset(
                &mut patch,
                target,
                "document_id",
                Value::String(source.id.clone()),
            );
        }
        (BrickCategory::Collection, BrickCategory::Review) => {
            if target.has_default_label() {
                patch.label = Some(format!("Review {}", subject_for(source, templates)));
            }
        }
        _ => {}
    }
    patch
}

/// Noun phrase describing what `source` produces: the template's short
/// name when a documentation brick references a known template, otherwise
/// the source label with any leading verb stripped.
fn subject_for(source: &Brick, templates: Option<&dyn TemplateDirectory>) -> String {
    if source.category == BrickCategory::Documentation {
        if let Some(directory) = templates {
            if let Some(template_id) = source.config_str("template_id") {
                if let Some(short_name) = directory.short_name(template_id) {
                    return short_name;
                }
            }
        }
    }
    strip_verb_prefix(&source.label)
}

fn strip_verb_prefix(label: &str) -> String {
    if let Some((first, rest)) = label.trim().split_once(char::is_whitespace) {
        let rest = rest.trim();
        if !rest.is_empty()
            && VERB_PREFIXES
                .iter()
                .any(|verb| first.eq_ignore_ascii_case(verb))
        {
            return rest.to_string();
        }
    }
    label.to_string()
}

fn set_if_unset(patch: &mut BrickPatch, target: &Brick, key: &str, value: Value) {
    if !target.is_config_set(key) {
        patch.config.push((key.to_string(), value));
    }
}
