//! Common test utilities for building playbook graphs.
use brickflow::prelude::*;

/// Creates a brick with a fixed id so tests stay deterministic.
#[allow(dead_code)]
pub fn brick(id: &str, category: BrickCategory, label: &str) -> Brick {
    let mut brick = Brick::new(category, Position::default());
    brick.id = id.to_string();
    brick.label = label.to_string();
    brick
}

/// Creates a collection brick exposing the given (name, label) fields.
#[allow(dead_code)]
pub fn collection_with_fields(id: &str, label: &str, fields: &[(&str, &str)]) -> Brick {
    let mut collection = brick(id, BrickCategory::Collection, label);
    let entries: Vec<serde_json::Value> = fields
        .iter()
        .map(|(name, field_label)| serde_json::json!({ "name": name, "label": field_label }))
        .collect();
    collection
        .config
        .insert("fields".to_string(), serde_json::Value::Array(entries));
    collection
}

/// Creates a default-kind connection with a readable id.
#[allow(dead_code)]
pub fn connect(source: &str, target: &str) -> Connection {
    let mut connection = Connection::new(source, target);
    connection.id = format!("conn-{}-{}", source, target);
    connection
}

/// The standard five-step contract chain used across tests:
/// collect -> generate -> review -> approve -> sign.
#[allow(dead_code)]
pub fn contract_playbook() -> (Vec<Brick>, Vec<Connection>) {
    let bricks = vec![
        collection_with_fields(
            "c1",
            "Collect Deal Facts",
            &[("counterparty", "Counterparty"), ("deal_size", "Deal Size")],
        ),
        brick("d1", BrickCategory::Documentation, "Generate NDA"),
        brick("r1", BrickCategory::Review, "Review NDA"),
        brick("ap1", BrickCategory::Approval, "Request Approval"),
        brick("s1", BrickCategory::Commitment, "Collect Signature"),
    ];
    let connections = vec![
        connect("c1", "d1"),
        connect("d1", "r1"),
        connect("r1", "ap1"),
        connect("ap1", "s1"),
    ];
    (bricks, connections)
}

/// Wraps a graph in an editing session.
#[allow(dead_code)]
pub fn session_from(bricks: Vec<Brick>, connections: Vec<Connection>) -> PlaybookSession {
    PlaybookSession::from_definition(PlaybookDefinition {
        bricks,
        connections,
    })
}

/// A row-layout export with camelCase keys, as older hosts persist it.
#[allow(dead_code)]
pub const ROWS_JSON: &str = r#"{
    "nodes": [
        {
            "id": "c1",
            "brickType": "collection",
            "label": "Collect Deal Facts",
            "config": { "fields": [ { "name": "counterparty", "label": "Counterparty" } ] },
            "positionX": 12.5,
            "positionY": 40
        },
        {
            "id": "r1",
            "brickType": "review",
            "label": "Review NDA"
        }
    ],
    "edges": [
        {
            "id": "e1",
            "sourceBrickId": "c1",
            "targetBrickId": "r1",
            "edgeType": "conditional",
            "condition": { "field": "review_status", "value": "approved" },
            "sourceHandle": "bottom",
            "targetHandle": "top"
        }
    ]
}"#;
