//! Saved-game snapshots and their encodings.

pub mod schema;
pub mod codec;

pub use schema::{GameSnapshot, MediaSet, SnapshotParts};
pub use codec::{BincodeCodec, JsonCodec, SnapshotCodec};
