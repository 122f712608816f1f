use crate::catalog::BrickCategory;
use crate::error::ConversionError;
use crate::graph::{
    Brick, Condition, Connection, ConnectionKind, HandleSide, PlaybookDefinition, Position,
};
use ahash::AHashMap;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Converts a host-side storage representation into a playbook graph.
///
/// Implement this for whatever row shape the host database hands out; the
/// bundled [`PlaybookRows`] covers the common JSON layout.
pub trait IntoPlaybook {
    fn into_playbook(self) -> Result<PlaybookDefinition, ConversionError>;
}

/// The row layout most hosts persist: one record per brick and one per
/// connection. Aliases accept the camelCase keys older exports used.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PlaybookRows {
    #[serde(default, alias = "nodes")]
    pub bricks: Vec<BrickRow>,
    #[serde(default, alias = "edges")]
    pub connections: Vec<ConnectionRow>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BrickRow {
    pub id: String,
    #[serde(alias = "brickType")]
    pub brick_type: String,
    pub label: String,
    #[serde(default)]
    pub config: Map<String, Value>,
    #[serde(default, alias = "positionX")]
    pub position_x: f64,
    #[serde(default, alias = "positionY")]
    pub position_y: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConnectionRow {
    pub id: String,
    #[serde(alias = "sourceBrickId")]
    pub source_brick_id: String,
    #[serde(alias = "targetBrickId")]
    pub target_brick_id: String,
    #[serde(default = "default_edge_type", alias = "edgeType")]
    pub edge_type: String,
    #[serde(default)]
    pub condition: Option<ConditionRow>,
    #[serde(default)]
    pub label: Option<String>,
    #[serde(default, alias = "sourceHandle")]
    pub source_handle: Option<String>,
    #[serde(default, alias = "targetHandle")]
    pub target_handle: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConditionRow {
    pub field: String,
    pub value: String,
}

fn default_edge_type() -> String {
    "default".to_string()
}

impl IntoPlaybook for PlaybookRows {
    /// Builds the in-memory graph from rows.
    ///
    /// An unknown brick category fails the conversion; there is no safe
    /// default for what a brick does. Everything else degrades gently: an
    /// unknown connection kind becomes `default`, an unknown handle is
    /// dropped, and a condition on a non-conditional connection is
    /// discarded.
    fn into_playbook(self) -> Result<PlaybookDefinition, ConversionError> {
        let mut bricks = Vec::with_capacity(self.bricks.len());
        for row in self.bricks {
            let Some(category) = BrickCategory::from_key(&row.brick_type) else {
                return Err(ConversionError::UnknownCategory {
                    brick_id: row.id,
                    category: row.brick_type,
                });
            };
            let config: AHashMap<String, Value> = row.config.into_iter().collect();
            bricks.push(Brick {
                id: row.id,
                category,
                label: row.label,
                config,
                position: Position::new(row.position_x, row.position_y),
                validity: None,
            });
        }

        let mut connections = Vec::with_capacity(self.connections.len());
        for row in self.connections {
            let kind = ConnectionKind::from_key(&row.edge_type);
            let condition = if kind == ConnectionKind::Conditional {
                row.condition.map(|c| Condition {
                    field: c.field,
                    value: c.value,
                })
            } else {
                None
            };
            connections.push(Connection {
                id: row.id,
                source: row.source_brick_id,
                target: row.target_brick_id,
                kind,
                condition,
                label: row.label,
                source_handle: row.source_handle.as_deref().and_then(HandleSide::from_key),
                target_handle: row.target_handle.as_deref().and_then(HandleSide::from_key),
            });
        }

        Ok(PlaybookDefinition {
            bricks,
            connections,
        })
    }
}

impl PlaybookRows {
    /// Rebuilds rows from a definition for hosts that persist the row
    /// layout rather than the definition itself.
    pub fn from_definition(definition: &PlaybookDefinition) -> Self {
        let bricks = definition
            .bricks
            .iter()
            .map(|brick| BrickRow {
                id: brick.id.clone(),
                brick_type: brick.category.as_key().to_string(),
                label: brick.label.clone(),
                config: brick
                    .config
                    .iter()
                    .map(|(key, value)| (key.clone(), value.clone()))
                    .collect(),
                position_x: brick.position.x,
                position_y: brick.position.y,
            })
            .collect();

        let connections = definition
            .connections
            .iter()
            .map(|connection| ConnectionRow {
                id: connection.id.clone(),
                source_brick_id: connection.source.clone(),
                target_brick_id: connection.target.clone(),
                edge_type: connection.kind.as_key().to_string(),
                condition: connection.condition.as_ref().map(|c| ConditionRow {
                    field: c.field.clone(),
                    value: c.value.clone(),
                }),
                label: connection.label.clone(),
                source_handle: connection.source_handle.map(|h| h.as_key().to_string()),
                target_handle: connection.target_handle.map(|h| h.as_key().to_string()),
            })
            .collect();

        Self {
            bricks,
            connections,
        }
    }
}
