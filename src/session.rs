use crate::analysis::Analyzer;
use crate::autoconfig::{BrickPatch, configure_connection};
use crate::catalog::BrickCategory;
use crate::graph::{
    Brick, BrickValidity, Condition, Connection, ConnectionKind, HandleSide, PlaybookDefinition,
    Position,
};
use crate::layout;
use crate::store::{GraphStore, StoreError};
use crate::template::{TemplateDirectory, VariableCoverage};
use crate::validation::{self, Issue, Severity};
use serde_json::Value;

/// Live editing state for one playbook: the brick and connection
/// collections, the current selection, and an optional template directory
/// for auto-configuration and coverage.
///
/// Single-owner, single-writer. Every mutation runs to completion before
/// the next starts, and every analysis is recomputed from current state on
/// demand rather than incrementally maintained.
pub struct PlaybookSession {
    bricks: Vec<Brick>,
    connections: Vec<Connection>,
    selected_brick: Option<String>,
    selected_connection: Option<String>,
    templates: Option<Box<dyn TemplateDirectory>>,
}

impl PlaybookSession {
    pub fn new() -> Self {
        Self {
            bricks: Vec::new(),
            connections: Vec::new(),
            selected_brick: None,
            selected_connection: None,
            templates: None,
        }
    }

    pub fn with_templates(mut self, templates: impl TemplateDirectory + 'static) -> Self {
        self.templates = Some(Box::new(templates));
        self
    }

    pub fn from_definition(definition: PlaybookDefinition) -> Self {
        Self {
            bricks: definition.bricks,
            connections: definition.connections,
            selected_brick: None,
            selected_connection: None,
            templates: None,
        }
    }

    /// Snapshot of the current graph, suitable for persistence.
    pub fn definition(&self) -> PlaybookDefinition {
        PlaybookDefinition {
            bricks: self.bricks.clone(),
            connections: self.connections.clone(),
        }
    }

    pub fn bricks(&self) -> &[Brick] {
        &self.bricks
    }

    pub fn connections(&self) -> &[Connection] {
        &self.connections
    }

    pub fn brick(&self, brick_id: &str) -> Option<&Brick> {
        self.bricks.iter().find(|b| b.id == brick_id)
    }

    pub fn connection(&self, connection_id: &str) -> Option<&Connection> {
        self.connections.iter().find(|c| c.id == connection_id)
    }

    /// Replaces the brick collection wholesale, e.g. after a host-side
    /// edit. Selections that no longer resolve are cleared.
    pub fn set_bricks(&mut self, bricks: Vec<Brick>) {
        self.bricks = bricks;
        self.prune_selection();
    }

    pub fn set_connections(&mut self, connections: Vec<Connection>) {
        self.connections = connections;
        self.prune_selection();
    }

    /// Adds a fresh brick of `category` at `position` and returns it.
    pub fn add_brick(&mut self, category: BrickCategory, position: Position) -> &Brick {
        let brick = Brick::new(category, position);
        tracing::debug!(brick_id = %brick.id, category = %category, "brick added");
        self.bricks.push(brick);
        &self.bricks[self.bricks.len() - 1]
    }

    /// Removes a brick together with every connection touching it.
    pub fn remove_brick(&mut self, brick_id: &str) -> bool {
        let before = self.bricks.len();
        self.bricks.retain(|b| b.id != brick_id);
        if self.bricks.len() == before {
            return false;
        }
        self.connections.retain(|c| !c.touches(brick_id));
        self.prune_selection();
        true
    }

    /// Creates a user-drawn connection from `source_id` to `target_id`.
    ///
    /// Self connections and repeats of an existing (source, target) pair
    /// are rejected with `None`. On success the new default-kind
    /// connection is returned after auto-configuration has patched the
    /// target brick.
    pub fn connect(&mut self, source_id: &str, target_id: &str) -> Option<&Connection> {
        self.connect_with_handles(source_id, target_id, None, None)
    }

    pub fn connect_with_handles(
        &mut self,
        source_id: &str,
        target_id: &str,
        source_handle: Option<HandleSide>,
        target_handle: Option<HandleSide>,
    ) -> Option<&Connection> {
        if source_id == target_id {
            tracing::warn!(brick_id = source_id, "rejected connection from a brick to itself");
            return None;
        }
        if self
            .connections
            .iter()
            .any(|c| c.source == source_id && c.target == target_id)
        {
            tracing::debug!(
                source = source_id,
                target = target_id,
                "duplicate connection ignored"
            );
            return None;
        }

        let mut connection = Connection::new(source_id, target_id);
        connection.source_handle = source_handle;
        connection.target_handle = target_handle;

        let patch = match (self.brick(source_id), self.brick(target_id)) {
            (Some(source), Some(target)) => {
                configure_connection(source, target, self.templates.as_deref())
            }
            _ => BrickPatch::default(),
        };

        self.connections.push(connection);
        if !patch.is_empty() {
            self.apply_patch(target_id, patch);
        }
        self.connections.last()
    }

    pub fn remove_connection(&mut self, connection_id: &str) -> bool {
        let before = self.connections.len();
        self.connections.retain(|c| c.id != connection_id);
        if self.connections.len() == before {
            return false;
        }
        self.prune_selection();
        true
    }

    pub fn update_brick_label(&mut self, brick_id: &str, label: &str) -> bool {
        match self.bricks.iter_mut().find(|b| b.id == brick_id) {
            Some(brick) => {
                brick.label = label.to_string();
                true
            }
            None => false,
        }
    }

    /// Shallow-merges `entries` into the brick's config: named keys are
    /// written, every other key keeps its prior value. This is what makes
    /// auto-configuration's only-set-if-empty rule meaningful.
    pub fn update_brick_config(
        &mut self,
        brick_id: &str,
        entries: impl IntoIterator<Item = (String, Value)>,
    ) -> bool {
        let Some(brick) = self.bricks.iter_mut().find(|b| b.id == brick_id) else {
            return false;
        };
        for (key, value) in entries {
            brick.config.insert(key, value);
        }
        true
    }

    pub fn update_brick_position(&mut self, brick_id: &str, position: Position) -> bool {
        match self.bricks.iter_mut().find(|b| b.id == brick_id) {
            Some(brick) => {
                brick.position = position;
                true
            }
            None => false,
        }
    }

    /// Changes a connection's kind. Leaving the conditional kind drops the
    /// condition so a stale branch predicate can never linger.
    pub fn set_connection_kind(&mut self, connection_id: &str, kind: ConnectionKind) -> bool {
        let Some(connection) = self.connections.iter_mut().find(|c| c.id == connection_id) else {
            return false;
        };
        connection.kind = kind;
        if kind != ConnectionKind::Conditional {
            connection.condition = None;
        }
        true
    }

    /// Sets the branch predicate of a conditional connection. Ignored for
    /// any other kind.
    pub fn set_connection_condition(
        &mut self,
        connection_id: &str,
        condition: Option<Condition>,
    ) -> bool {
        let Some(connection) = self.connections.iter_mut().find(|c| c.id == connection_id) else {
            return false;
        };
        if connection.kind != ConnectionKind::Conditional {
            tracing::debug!(
                connection_id,
                "condition ignored for a non-conditional connection"
            );
            return false;
        }
        connection.condition = condition;
        true
    }

    pub fn set_connection_label(&mut self, connection_id: &str, label: Option<String>) -> bool {
        match self.connections.iter_mut().find(|c| c.id == connection_id) {
            Some(connection) => {
                connection.label = label;
                true
            }
            None => false,
        }
    }

    /// Selects a brick; any connection selection is dropped. Selection is
    /// mutually exclusive by construction.
    pub fn select_brick(&mut self, brick_id: &str) -> bool {
        if !self.bricks.iter().any(|b| b.id == brick_id) {
            return false;
        }
        self.selected_brick = Some(brick_id.to_string());
        self.selected_connection = None;
        true
    }

    pub fn select_connection(&mut self, connection_id: &str) -> bool {
        if !self.connections.iter().any(|c| c.id == connection_id) {
            return false;
        }
        self.selected_connection = Some(connection_id.to_string());
        self.selected_brick = None;
        true
    }

    pub fn clear_selection(&mut self) {
        self.selected_brick = None;
        self.selected_connection = None;
    }

    pub fn selected_brick_id(&self) -> Option<&str> {
        self.selected_brick.as_deref()
    }

    pub fn selected_connection_id(&self) -> Option<&str> {
        self.selected_connection.as_deref()
    }

    /// Traversal view over the current graph. Build one per use; it
    /// borrows the collections and is never cached across mutations.
    pub fn analyzer(&self) -> Analyzer<'_> {
        Analyzer::new(&self.bricks, &self.connections)
    }

    /// Runs structural validation and refreshes each brick's cached
    /// validity. Only error-severity findings make a brick invalid;
    /// warnings annotate it without blocking anything.
    pub fn validate(&mut self) -> Vec<Issue> {
        let issues = validation::validate(&self.bricks, &self.connections);
        tracing::debug!(issues = issues.len(), "playbook validated");
        for brick in &mut self.bricks {
            let mine: Vec<&Issue> = issues
                .iter()
                .filter(|issue| issue.brick_id.as_deref() == Some(brick.id.as_str()))
                .collect();
            brick.validity = Some(BrickValidity {
                is_valid: !mine.iter().any(|issue| issue.severity == Severity::Error),
                errors: mine.iter().map(|issue| issue.message.clone()).collect(),
            });
        }
        issues
    }

    /// Repositions every brick with the layered auto-layout.
    pub fn auto_layout(&mut self) {
        let positions = layout::layout(&self.bricks, &self.connections);
        for brick in &mut self.bricks {
            if let Some(position) = positions.get(&brick.id) {
                brick.position = *position;
            }
        }
        tracing::debug!(bricks = self.bricks.len(), "auto-layout applied");
    }

    /// Coverage of a template's variables against the data upstream of
    /// `brick_id`. `None` when no directory is attached or the template is
    /// unknown to it.
    pub fn template_coverage(
        &self,
        brick_id: &str,
        template_id: &str,
    ) -> Option<Vec<VariableCoverage>> {
        let directory = self.templates.as_deref()?;
        let text = directory.template_text(template_id)?;
        let upstream = self.analyzer().available_upstream_outputs(brick_id);
        Some(crate::template::template_coverage(&text, &upstream))
    }

    /// Replaces the session contents from the store. `Ok(false)` means the
    /// container has no saved playbook yet; the session is left untouched.
    pub fn load(&mut self, store: &dyn GraphStore, container_id: &str) -> Result<bool, StoreError> {
        match store.load_graph(container_id)? {
            Some(definition) => {
                tracing::debug!(
                    container_id,
                    bricks = definition.bricks.len(),
                    connections = definition.connections.len(),
                    "playbook loaded"
                );
                self.bricks = definition.bricks;
                self.connections = definition.connections;
                self.prune_selection();
                Ok(true)
            }
            None => Ok(false),
        }
    }

    pub fn save(&self, store: &mut dyn GraphStore, container_id: &str) -> Result<(), StoreError> {
        store.save_graph(container_id, &self.definition())
    }

    fn apply_patch(&mut self, brick_id: &str, patch: BrickPatch) {
        if let Some(label) = patch.label {
            self.update_brick_label(brick_id, &label);
        }
        if !patch.config.is_empty() {
            self.update_brick_config(brick_id, patch.config);
        }
    }

    fn prune_selection(&mut self) {
        let brick_gone = self
            .selected_brick
            .as_deref()
            .is_some_and(|id| !self.bricks.iter().any(|b| b.id == id));
        if brick_gone {
            self.selected_brick = None;
        }
        let connection_gone = self
            .selected_connection
            .as_deref()
            .is_some_and(|id| !self.connections.iter().any(|c| c.id == id));
        if connection_gone {
            self.selected_connection = None;
        }
    }
}

impl Default for PlaybookSession {
    fn default() -> Self {
        Self::new()
    }
}
