//! Snapshot encodings.
//!
//! Hosts own storage; a codec only turns a `GameSnapshot` into bytes and back.

use super::schema::GameSnapshot;
use crate::error::{QuizError, Result};

/// Converts snapshots to and from an opaque byte blob.
pub trait SnapshotCodec {
    /// File extension for this encoding.
    fn extension(&self) -> &'static str;

    fn encode(&self, snapshot: &GameSnapshot) -> Result<Vec<u8>>;

    /// Decode a blob. Anything that fails to parse is `MalformedSnapshot`.
    fn decode(&self, bytes: &[u8]) -> Result<GameSnapshot>;
}

/// Pretty-printed JSON, the human-editable save format.
#[derive(Clone, Copy, Debug, Default)]
pub struct JsonCodec;

impl SnapshotCodec for JsonCodec {
    fn extension(&self) -> &'static str {
        "json"
    }

    fn encode(&self, snapshot: &GameSnapshot) -> Result<Vec<u8>> {
        serde_json::to_vec_pretty(snapshot).map_err(|e| QuizError::Codec(e.to_string()))
    }

    fn decode(&self, bytes: &[u8]) -> Result<GameSnapshot> {
        serde_json::from_slice(bytes).map_err(|e| QuizError::MalformedSnapshot(e.to_string()))
    }
}

/// Compact binary checkpoint.
#[derive(Clone, Copy, Debug, Default)]
pub struct BincodeCodec;

impl SnapshotCodec for BincodeCodec {
    fn extension(&self) -> &'static str {
        "bin"
    }

    fn encode(&self, snapshot: &GameSnapshot) -> Result<Vec<u8>> {
        bincode::serialize(snapshot).map_err(|e| QuizError::Codec(e.to_string()))
    }

    fn decode(&self, bytes: &[u8]) -> Result<GameSnapshot> {
        bincode::deserialize(bytes).map_err(|e| QuizError::MalformedSnapshot(e.to_string()))
    }
}
