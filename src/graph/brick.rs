use crate::catalog::{BrickCategory, CollectionField, OutputField, static_outputs};
use ahash::AHashMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

/// A canvas coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

impl Position {
    pub fn new(x: f64, y: f64) -> Self {
        Position { x, y }
    }
}

/// Derived validity of a brick, refreshed by the validation engine. Never
/// persisted; the issue list returned by `validate` is the source of truth.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BrickValidity {
    pub is_valid: bool,
    pub errors: Vec<String>,
}

/// A single step placed on the playbook canvas.
///
/// The category is fixed at creation; everything else is editable. `config`
/// is an open string-keyed map of category-specific settings
/// (`template_id`, `approver_teams`, `document_id`, ...). Automated
/// processes may only fill config keys that are currently unset — user
/// edits always win and are never overwritten.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Brick {
    pub id: String,
    pub category: BrickCategory,
    pub label: String,
    #[serde(default)]
    pub config: AHashMap<String, Value>,
    #[serde(default)]
    pub position: Position,
    #[serde(skip)]
    pub validity: Option<BrickValidity>,
}

impl Brick {
    /// Creates a brick the way a palette drop does: fresh id, the
    /// category's default label, empty config, position at the drop point.
    pub fn new(category: BrickCategory, position: Position) -> Self {
        Brick {
            id: Uuid::new_v4().to_string(),
            category,
            label: category.default_label().to_string(),
            config: AHashMap::new(),
            position,
            validity: None,
        }
    }

    /// Whether the label still is the category default (auto-configuration
    /// only relabels bricks the user has not renamed).
    pub fn has_default_label(&self) -> bool {
        self.label == self.category.default_label()
    }

    /// Whether a config key holds a real value. Missing keys, JSON `null`
    /// and empty strings all count as unset.
    pub fn is_config_set(&self, key: &str) -> bool {
        match self.config.get(key) {
            None | Some(Value::Null) => false,
            Some(Value::String(s)) => !s.is_empty(),
            Some(_) => true,
        }
    }

    /// Convenience accessor for string-valued config entries.
    pub fn config_str(&self, key: &str) -> Option<&str> {
        self.config.get(key).and_then(Value::as_str)
    }

    /// The user-defined fields of a collection brick. Empty for other
    /// categories; malformed entries are skipped silently.
    pub fn collection_fields(&self) -> Vec<CollectionField> {
        if self.category != BrickCategory::Collection {
            return Vec::new();
        }
        let Some(Value::Array(entries)) = self.config.get("fields") else {
            return Vec::new();
        };
        entries
            .iter()
            .filter_map(|entry| serde_json::from_value(entry.clone()).ok())
            .collect()
    }

    /// Every output field this brick produces: the category's static schema
    /// plus, for collection bricks, one field per complete user-defined
    /// field.
    pub fn output_fields(&self) -> Vec<OutputField> {
        let mut fields: Vec<OutputField> = static_outputs(self.category)
            .iter()
            .map(OutputField::from)
            .collect();
        for field in self.collection_fields() {
            if !field.is_complete() {
                continue;
            }
            fields.push(OutputField {
                name: field.name.clone(),
                field_type: field.field_type.clone().unwrap_or_else(|| "string".to_string()),
                description: format!("Collected field '{}'", field.label),
            });
        }
        fields
    }
}
