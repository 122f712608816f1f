use thiserror::Error;

/// Errors that can occur when converting an external graph representation
/// into a playbook definition.
#[derive(Error, Debug, Clone)]
pub enum ConversionError {
    #[error("Brick '{brick_id}' has an unknown category: '{category}'")]
    UnknownCategory { brick_id: String, category: String },

    #[error("Invalid playbook data: {0}")]
    Invalid(String),
}

/// Errors that can occur in the persistence layer (stores and snapshots).
#[derive(Error, Debug, Clone)]
pub enum StoreError {
    #[error("Could not read playbook file '{path}': {message}")]
    FileRead { path: String, message: String },

    #[error("Could not write playbook file '{path}': {message}")]
    FileWrite { path: String, message: String },

    #[error("Playbook encoding failed: {0}")]
    Encode(String),

    #[error("Playbook decoding failed: {0}")]
    Decode(String),
}
