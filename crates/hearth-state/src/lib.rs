//! Persisted application state and its schema migrations.
//!
//! The state file is a single protobuf record. Its schema has changed over time; every
//! historical version is kept as a frozen snapshot type under [`schema`] and upgraded into
//! [`SavedState`] on load:
//!
//! - [`sniff_version`]: reads the leading version varint without decoding the record
//! - [`VersionedSnapshot`]: one variant per historical schema, each with its upgrade
//! - [`load`] / [`save`]: bytes to state (never fails) and state to bytes (current schema)
//! - [`StateStore`]: serializes loads and saves against a [`ByteStorage`]

mod error;
mod format;
mod load;
mod sniff;
mod state;
mod storage;
mod store;
mod upgrade;

pub mod schema;
pub mod wire;

pub use crate::error::{Result, StateError};
pub use crate::format::{reserved_fields, SchemaVersion};
pub use crate::load::{load, load_with_report, save, try_load, LoadReport, LoadSource};
pub use crate::schema::v5::{AuthTokens, GuestSession, ProfileData};
pub use crate::sniff::{sniff_known_version, sniff_version};
pub use crate::state::{ProfileId, SavedState};
pub use crate::storage::{ByteStorage, FileStorage, MemStorage};
pub use crate::store::StateStore;
pub use crate::upgrade::{
    Snapshot, VersionedSnapshot, DEFAULT_GUEST_SERVER, LEGACY_SERVICE_ENDPOINT,
};
