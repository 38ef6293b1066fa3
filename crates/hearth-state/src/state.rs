use std::collections::BTreeMap;

use prost::Message;

use crate::error::{Result, StateError};
use crate::format::SchemaVersion;
use crate::schema::v5::{ProfileData, SavedStateV5};
use crate::schema::Navigation;

/// Identifier of a signed-in profile.
///
/// Three reserved values denote states without a concrete profile. They may appear as the
/// active profile, but never as a key of [`SavedState::profile_data`].
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ProfileId(String);

impl ProfileId {
    /// Placeholder older builds wrote when the session owner could not be resolved.
    pub const UNKNOWN_AUTHOR: &'static str = "hearth:unknown-author";
    /// Sign-in started but the profile is not known yet.
    pub const PENDING: &'static str = "hearth:pending";
    /// Signed-out browsing.
    pub const GUEST: &'static str = "hearth:guest";

    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn unknown_author() -> Self {
        Self::new(Self::UNKNOWN_AUTHOR)
    }

    pub fn pending() -> Self {
        Self::new(Self::PENDING)
    }

    pub fn guest() -> Self {
        Self::new(Self::GUEST)
    }

    pub fn is_sentinel(&self) -> bool {
        matches!(
            self.0.as_str(),
            Self::UNKNOWN_AUTHOR | Self::PENDING | Self::GUEST
        )
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

}

impl From<String> for ProfileId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl From<&str> for ProfileId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl core::fmt::Display for ProfileId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.0)
    }
}

/// The current persisted application state. This is the only shape the rest of the
/// application sees; older schemas are upgraded into it on load.
#[derive(Debug, Clone, PartialEq)]
pub struct SavedState {
    pub version: SchemaVersion,
    pub navigation: Navigation,
    pub profile_data: BTreeMap<ProfileId, ProfileData>,
    pub active_profile_id: Option<ProfileId>,
}

impl Default for SavedState {
    fn default() -> Self {
        Self {
            version: SchemaVersion::CURRENT,
            navigation: Navigation::root(),
            profile_data: BTreeMap::new(),
            active_profile_id: None,
        }
    }
}

impl SavedState {
    /// Payload of the active profile, if the active id names a stored profile.
    pub fn active_profile(&self) -> Option<&ProfileData> {
        self.profile_data.get(self.active_profile_id.as_ref()?)
    }

    pub fn profile_ids(&self) -> impl Iterator<Item = &ProfileId> {
        self.profile_data.keys()
    }

    /// Checks the invariants every loaded state must satisfy.
    pub fn validate(&self) -> Result<()> {
        if self.version != SchemaVersion::CURRENT {
            return Err(StateError::UpgradeFailure(
                "state is not stamped with the current schema version",
            ));
        }
        if self.profile_data.keys().any(ProfileId::is_sentinel) {
            return Err(StateError::UpgradeFailure(
                "reserved profile id used as a profile key",
            ));
        }
        Ok(())
    }

    /// Encodes in the current schema. The version field is always written as
    /// [`SchemaVersion::CURRENT`], and entries keyed by a reserved id are left out.
    pub fn encode_to_vec(&self) -> Vec<u8> {
        SavedStateV5::from(self).encode_to_vec()
    }
}

impl From<&SavedState> for SavedStateV5 {
    fn from(state: &SavedState) -> Self {
        Self {
            version: SchemaVersion::CURRENT.0,
            navigation: Some(state.navigation.clone()),
            profile_data: state
                .profile_data
                .iter()
                .filter(|(id, _)| !id.is_sentinel())
                .map(|(id, data)| (id.as_str().to_string(), data.clone()))
                .collect(),
            active_profile_id: state
                .active_profile_id
                .as_ref()
                .map(|id| id.as_str().to_string()),
        }
    }
}
