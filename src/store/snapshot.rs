use crate::error::StoreError;
use crate::graph::PlaybookDefinition;
use bincode::config::standard;
use bincode::serde::{decode_from_slice, encode_to_vec};
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::{Read, Write};

/// A playbook frozen to disk: the container it belongs to plus the full
/// graph, in a compact binary envelope suitable for export bundles.
///
/// Brick configs hold arbitrary JSON values, which bincode's
/// non-self-describing format cannot decode, so the graph rides inside
/// the envelope as a JSON payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlaybookSnapshot {
    pub container_id: String,
    definition_json: String,
}

impl PlaybookSnapshot {
    pub fn new(
        container_id: impl Into<String>,
        definition: &PlaybookDefinition,
    ) -> Result<Self, StoreError> {
        let definition_json =
            serde_json::to_string(definition).map_err(|e| StoreError::Encode(e.to_string()))?;
        Ok(Self {
            container_id: container_id.into(),
            definition_json,
        })
    }

    /// Unpacks the graph carried by this snapshot.
    pub fn definition(&self) -> Result<PlaybookDefinition, StoreError> {
        serde_json::from_str(&self.definition_json).map_err(|e| StoreError::Decode(e.to_string()))
    }

    /// Saves the snapshot to a file using the bincode format.
    pub fn save(&self, path: &str) -> Result<(), StoreError> {
        let bytes = self.to_bytes()?;
        let mut file = fs::File::create(path).map_err(|e| StoreError::FileWrite {
            path: path.to_string(),
            message: e.to_string(),
        })?;
        file.write_all(&bytes).map_err(|e| StoreError::FileWrite {
            path: path.to_string(),
            message: e.to_string(),
        })?;
        Ok(())
    }

    /// Loads a snapshot from a file.
    pub fn from_file(path: &str) -> Result<Self, StoreError> {
        let mut file = fs::File::open(path).map_err(|e| StoreError::FileRead {
            path: path.to_string(),
            message: e.to_string(),
        })?;
        let mut bytes = Vec::new();
        file.read_to_end(&mut bytes).map_err(|e| StoreError::FileRead {
            path: path.to_string(),
            message: e.to_string(),
        })?;
        Self::from_bytes(&bytes)
    }

    pub fn to_bytes(&self) -> Result<Vec<u8>, StoreError> {
        encode_to_vec(self, standard()).map_err(|e| StoreError::Encode(e.to_string()))
    }

    /// Deserializes a snapshot from a byte slice.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, StoreError> {
        decode_from_slice(bytes, standard())
            .map(|(snapshot, _)| snapshot) // bincode 2 returns a tuple (data, bytes_read)
            .map_err(|e| StoreError::Decode(e.to_string()))
    }
}
