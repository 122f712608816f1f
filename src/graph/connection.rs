use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// How a connection routes between two bricks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConnectionKind {
    /// Unconditional hand-off; what a user-drawn connection starts as.
    Default,
    /// Taken only when the attached condition matches.
    Conditional,
    /// Taken when the source step fails.
    Error,
}

impl ConnectionKind {
    pub fn as_key(&self) -> &'static str {
        match self {
            ConnectionKind::Default => "default",
            ConnectionKind::Conditional => "conditional",
            ConnectionKind::Error => "error",
        }
    }

    /// Parses a storage key; anything unknown falls back to `Default`
    /// (connection metadata is treated leniently on load).
    pub fn from_key(key: &str) -> Self {
        match key {
            "conditional" => ConnectionKind::Conditional,
            "error" => ConnectionKind::Error,
            _ => ConnectionKind::Default,
        }
    }
}

impl fmt::Display for ConnectionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_key())
    }
}

/// Predicate on a conditional connection: the upstream output field to
/// test and the value that activates this path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Condition {
    pub field: String,
    pub value: String,
}

/// One of the four attachment points on a brick. Purely geometric — has no
/// effect on execution semantics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HandleSide {
    Top,
    Right,
    Bottom,
    Left,
}

impl HandleSide {
    pub fn as_key(&self) -> &'static str {
        match self {
            HandleSide::Top => "top",
            HandleSide::Right => "right",
            HandleSide::Bottom => "bottom",
            HandleSide::Left => "left",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "top" => Some(HandleSide::Top),
            "right" => Some(HandleSide::Right),
            "bottom" => Some(HandleSide::Bottom),
            "left" => Some(HandleSide::Left),
            _ => None,
        }
    }
}

/// A directed connection between two bricks.
///
/// `condition` is only ever present when `kind` is
/// [`ConnectionKind::Conditional`]; session updates maintain that
/// invariant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Connection {
    pub id: String,
    pub source: String,
    pub target: String,
    pub kind: ConnectionKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub condition: Option<Condition>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_handle: Option<HandleSide>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_handle: Option<HandleSide>,
}

impl Connection {
    /// Creates the connection a user-drawn edge starts as: fresh id,
    /// default kind, no condition or label.
    pub fn new(source: impl Into<String>, target: impl Into<String>) -> Self {
        Connection {
            id: Uuid::new_v4().to_string(),
            source: source.into(),
            target: target.into(),
            kind: ConnectionKind::Default,
            condition: None,
            label: None,
            source_handle: None,
            target_handle: None,
        }
    }

    /// Whether this connection starts or ends at the given brick.
    pub fn touches(&self, brick_id: &str) -> bool {
        self.source == brick_id || self.target == brick_id
    }
}
