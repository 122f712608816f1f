use super::brick::Brick;
use super::connection::Connection;
use serde::{Deserialize, Serialize};

/// A complete playbook graph, detached from any editing session. This is
/// the shape persistence adapters load and save.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PlaybookDefinition {
    pub bricks: Vec<Brick>,
    pub connections: Vec<Connection>,
}

impl PlaybookDefinition {
    pub fn new(bricks: Vec<Brick>, connections: Vec<Connection>) -> Self {
        PlaybookDefinition {
            bricks,
            connections,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.bricks.is_empty()
    }

    /// Looks a brick up by id.
    pub fn brick(&self, id: &str) -> Option<&Brick> {
        self.bricks.iter().find(|b| b.id == id)
    }
}
