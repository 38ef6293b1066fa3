use std::io;

use thiserror::Error;

use crate::format::SchemaVersion;

pub type Result<T> = std::result::Result<T, StateError>;

#[derive(Debug, Error)]
pub enum StateError {
    #[error("truncated input at offset {offset}")]
    Truncated { offset: usize },

    #[error("malformed varint at offset {offset} (no terminating byte within 5 bytes)")]
    MalformedVarint { offset: usize },

    #[error("unknown persisted state version {0}")]
    UnknownVersion(SchemaVersion),

    #[error("failed to decode {version} snapshot: {source}")]
    SnapshotDecode {
        version: SchemaVersion,
        #[source]
        source: prost::DecodeError,
    },

    #[error("upgrade produced an invalid state: {0}")]
    UpgradeFailure(&'static str),

    #[error("io error: {0}")]
    Io(#[from] io::Error),
}

impl StateError {
    /// Errors raised while turning bytes into a [`crate::SavedState`].
    ///
    /// These are the ones `load` collapses into the default value; anything else comes from the
    /// storage collaborator and is propagated.
    pub fn is_decode_error(&self) -> bool {
        !matches!(self, StateError::Io(_))
    }
}
