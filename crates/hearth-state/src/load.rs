//! Load/save entry points.
//!
//! Loading never fails: empty input, an unreadable version, a snapshot that does not decode,
//! and an upgrade result that breaks an invariant all yield [`SavedState::default`]. Saving
//! always writes the current schema, so an old file is upgraded the next time it is written.

use crate::error::{Result, StateError};
use crate::format::SchemaVersion;
use crate::sniff::sniff_known_version;
use crate::state::SavedState;
use crate::upgrade::VersionedSnapshot;

/// Where a loaded state came from.
#[derive(Debug)]
pub enum LoadSource {
    /// The input was empty.
    NoData,
    /// The input decoded as a snapshot of `from` and was upgraded.
    Upgraded { from: SchemaVersion },
    /// The input could not be used; the state is the default one.
    Defaulted(StateError),
}

#[derive(Debug)]
pub struct LoadReport {
    pub state: SavedState,
    pub source: LoadSource,
}

impl LoadReport {
    pub fn is_defaulted(&self) -> bool {
        matches!(self.source, LoadSource::Defaulted(_))
    }
}

/// Sniffs, decodes, upgrades and validates a non-empty record.
///
/// Returns the snapshot version the bytes were written with alongside the upgraded state.
pub fn try_load(bytes: &[u8]) -> Result<(SchemaVersion, SavedState)> {
    let version = sniff_known_version(bytes)?;
    let snapshot = VersionedSnapshot::decode(version, bytes)?;
    let state = snapshot.upgrade(SchemaVersion::CURRENT);
    state.validate()?;
    Ok((version, state))
}

pub fn load_with_report(bytes: &[u8]) -> LoadReport {
    if bytes.is_empty() {
        return LoadReport {
            state: SavedState::default(),
            source: LoadSource::NoData,
        };
    }

    match try_load(bytes) {
        Ok((from, state)) => {
            tracing::debug!(
                from = %from,
                profiles = state.profile_data.len(),
                "loaded persisted state"
            );
            LoadReport {
                state,
                source: LoadSource::Upgraded { from },
            }
        }
        Err(err) => {
            tracing::warn!(
                error = %err,
                len = bytes.len(),
                "discarding unreadable persisted state"
            );
            LoadReport {
                state: SavedState::default(),
                source: LoadSource::Defaulted(err),
            }
        }
    }
}

/// Loads persisted bytes of any known schema version into the current state.
pub fn load(bytes: &[u8]) -> SavedState {
    load_with_report(bytes).state
}

/// Encodes `state` in the current schema.
pub fn save(state: &SavedState) -> Vec<u8> {
    state.encode_to_vec()
}
