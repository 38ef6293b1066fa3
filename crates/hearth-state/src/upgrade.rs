//! Snapshot decoding and upgrade into [`SavedState`].
//!
//! Each snapshot type declares the version it belongs to and how it becomes the current
//! state. Upgrades are total: every decodable snapshot yields a state, which the loader then
//! validates.
//!
//! Sessions stored globally (legacy, v1 and v2) are redistributed onto the owning profile, the
//! same way for all three versions. The owner becomes the active profile.

use std::collections::BTreeMap;

use prost::Message;

use crate::error::{Result, StateError};
use crate::format::SchemaVersion;
use crate::schema::common::{
    BearerTokens, LegacyAuthTokens, Navigation, Notifications, Preferences,
};
use crate::schema::v0::{ProfileDataV0, SavedStateV0};
use crate::schema::v1::SavedStateV1;
use crate::schema::v2::{auth_tokens_v2, AuthTokensV2, SavedStateV2};
use crate::schema::v3::SavedStateV3;
use crate::schema::v4::SavedStateV4;
use crate::schema::v5::{AuthTokens, ProfileData, SavedStateV5};
use crate::state::{ProfileId, SavedState};

/// Service every flat (pre-v2) session token was issued by.
pub const LEGACY_SERVICE_ENDPOINT: &str = "https://bsky.social";
/// Server assigned to guest sessions that predate recording one.
pub const DEFAULT_GUEST_SERVER: &str = "https://public.api.bsky.app";

pub trait Snapshot: Message + Default {
    const VERSION: SchemaVersion;

    /// Converts this snapshot into the current state, stamped with `target`.
    fn upgrade(self, target: SchemaVersion) -> SavedState;

    fn decode_snapshot(buf: &[u8]) -> Result<Self> {
        Self::decode(buf).map_err(|source| StateError::SnapshotDecode {
            version: Self::VERSION,
            source,
        })
    }
}

/// One decoded snapshot of any known version.
#[derive(Debug, Clone, PartialEq)]
pub enum VersionedSnapshot {
    Legacy(SavedStateV0),
    V1(SavedStateV1),
    V2(SavedStateV2),
    V3(SavedStateV3),
    V4(SavedStateV4),
    V5(SavedStateV5),
}

impl VersionedSnapshot {
    /// Decodes `buf` with the snapshot schema registered for `version`.
    pub fn decode(version: SchemaVersion, buf: &[u8]) -> Result<Self> {
        Ok(match version {
            SchemaVersion::LEGACY => Self::Legacy(SavedStateV0::decode_snapshot(buf)?),
            SchemaVersion::V1 => Self::V1(SavedStateV1::decode_snapshot(buf)?),
            SchemaVersion::V2 => Self::V2(SavedStateV2::decode_snapshot(buf)?),
            SchemaVersion::V3 => Self::V3(SavedStateV3::decode_snapshot(buf)?),
            SchemaVersion::V4 => Self::V4(SavedStateV4::decode_snapshot(buf)?),
            SchemaVersion::V5 => Self::V5(SavedStateV5::decode_snapshot(buf)?),
            other => return Err(StateError::UnknownVersion(other)),
        })
    }

    pub fn version(&self) -> SchemaVersion {
        match self {
            Self::Legacy(_) => SavedStateV0::VERSION,
            Self::V1(_) => SavedStateV1::VERSION,
            Self::V2(_) => SavedStateV2::VERSION,
            Self::V3(_) => SavedStateV3::VERSION,
            Self::V4(_) => SavedStateV4::VERSION,
            Self::V5(_) => SavedStateV5::VERSION,
        }
    }

    pub fn upgrade(self, target: SchemaVersion) -> SavedState {
        match self {
            Self::Legacy(snapshot) => snapshot.upgrade(target),
            Self::V1(snapshot) => snapshot.upgrade(target),
            Self::V2(snapshot) => snapshot.upgrade(target),
            Self::V3(snapshot) => snapshot.upgrade(target),
            Self::V4(snapshot) => snapshot.upgrade(target),
            Self::V5(snapshot) => snapshot.upgrade(target),
        }
    }
}

impl Snapshot for SavedStateV0 {
    const VERSION: SchemaVersion = SchemaVersion::LEGACY;

    fn upgrade(self, target: SchemaVersion) -> SavedState {
        let profiles = untyped_profiles(self.profile_data);
        let global = self.auth.map(GlobalSession::from_flat);
        deglobalize(target, self.navigation, profiles, global)
    }
}

impl Snapshot for SavedStateV1 {
    const VERSION: SchemaVersion = SchemaVersion::V1;

    fn upgrade(self, target: SchemaVersion) -> SavedState {
        let profiles = untyped_profiles(self.profile_data);
        let global = self.auth.map(GlobalSession::from_flat);
        deglobalize(target, self.navigation, profiles, global)
    }
}

impl Snapshot for SavedStateV2 {
    const VERSION: SchemaVersion = SchemaVersion::V2;

    fn upgrade(self, target: SchemaVersion) -> SavedState {
        let profiles = untyped_profiles(self.profile_data);
        let global = self.auth.and_then(GlobalSession::from_union);
        deglobalize(target, self.navigation, profiles, global)
    }
}

impl Snapshot for SavedStateV3 {
    const VERSION: SchemaVersion = SchemaVersion::V3;

    fn upgrade(self, target: SchemaVersion) -> SavedState {
        SavedState {
            version: target,
            navigation: navigation_or_root(self.navigation),
            profile_data: self
                .profile_data
                .into_iter()
                .filter_map(|(id, data)| {
                    let data = ProfileData {
                        auth: data.auth.and_then(retag_auth),
                        preferences: data.preferences,
                        notifications: Some(Notifications::default()),
                    };
                    Some((profile_key(id)?, data))
                })
                .collect(),
            active_profile_id: self.active_profile_id.map(ProfileId::from),
        }
    }
}

impl Snapshot for SavedStateV4 {
    const VERSION: SchemaVersion = SchemaVersion::V4;

    fn upgrade(self, target: SchemaVersion) -> SavedState {
        SavedState {
            version: target,
            navigation: navigation_or_root(self.navigation),
            profile_data: self
                .profile_data
                .into_iter()
                .filter_map(|(id, data)| {
                    let data = ProfileData {
                        auth: data.auth.and_then(retag_auth),
                        preferences: data.preferences,
                        notifications: data.notifications,
                    };
                    Some((profile_key(id)?, data))
                })
                .collect(),
            active_profile_id: self.active_profile_id.map(ProfileId::from),
        }
    }
}

impl Snapshot for SavedStateV5 {
    const VERSION: SchemaVersion = SchemaVersion::V5;

    fn upgrade(self, target: SchemaVersion) -> SavedState {
        SavedState {
            version: target,
            navigation: navigation_or_root(self.navigation),
            profile_data: self
                .profile_data
                .into_iter()
                .filter_map(|(id, data)| Some((profile_key(id)?, data)))
                .collect(),
            active_profile_id: self.active_profile_id.map(ProfileId::from),
        }
    }
}

/// A session stored at the top level rather than on a profile.
enum GlobalSession {
    Owned { owner: ProfileId, tokens: AuthTokens },
    Guest,
}

impl GlobalSession {
    fn from_flat(tokens: LegacyAuthTokens) -> Self {
        let owner = ProfileId::from(tokens.profile_id.clone());
        let tokens = AuthTokens::bearer(BearerTokens {
            profile_id: tokens.profile_id,
            service_endpoint: LEGACY_SERVICE_ENDPOINT.to_string(),
            access_token: tokens.access_jwt,
            refresh_token: tokens.refresh_jwt,
        });
        Self::Owned { owner, tokens }
    }

    /// `None` when the union carries no case at all.
    fn from_union(tokens: AuthTokensV2) -> Option<Self> {
        let tokens = retag_auth(tokens)?;
        let owner = tokens.profile_id().map(ProfileId::new);
        Some(match owner {
            Some(owner) => Self::Owned { owner, tokens },
            None => Self::Guest,
        })
    }
}

/// Moves a global session onto its owner's profile and derives the active profile from it.
///
/// - No session: nobody is active.
/// - Guest session, or a session owned by the unknown-author placeholder (or by nobody): guest
///   is active and no profile receives the tokens.
/// - Session owned by another reserved id: that id stays active, no profile receives the tokens.
/// - Otherwise the owner's profile gets the tokens (created with default payload when missing)
///   and becomes active. Every other profile stays unauthenticated.
fn deglobalize(
    target: SchemaVersion,
    navigation: Option<Navigation>,
    mut profiles: BTreeMap<ProfileId, ProfileData>,
    global: Option<GlobalSession>,
) -> SavedState {
    let active_profile_id = match global {
        None => None,
        Some(GlobalSession::Guest) => Some(ProfileId::guest()),
        Some(GlobalSession::Owned { owner, .. })
            if owner.as_str().is_empty() || owner.as_str() == ProfileId::UNKNOWN_AUTHOR =>
        {
            Some(ProfileId::guest())
        }
        Some(GlobalSession::Owned { owner, .. }) if owner.is_sentinel() => Some(owner),
        Some(GlobalSession::Owned { owner, tokens }) => {
            profiles
                .entry(owner.clone())
                .or_insert_with(|| profile_without_auth(None))
                .auth = Some(tokens);
            Some(owner)
        }
    };

    SavedState {
        version: target,
        navigation: navigation_or_root(navigation),
        profile_data: profiles,
        active_profile_id,
    }
}

/// Wraps raw string keys into profile ids. Payloads from before v3 carry no auth.
fn untyped_profiles(
    profiles: BTreeMap<String, ProfileDataV0>,
) -> BTreeMap<ProfileId, ProfileData> {
    profiles
        .into_iter()
        .filter_map(|(id, data)| Some((profile_key(id)?, profile_without_auth(data.preferences))))
        .collect()
}

/// A stored key as a profile id. Entries keyed by a reserved id never name a real profile and
/// are dropped, so the rest of the record still loads.
fn profile_key(id: String) -> Option<ProfileId> {
    let id = ProfileId::from(id);
    if id.is_sentinel() {
        tracing::debug!(%id, "dropping profile entry keyed by a reserved id");
        return None;
    }
    Some(id)
}

/// Payload for a profile from before v3. Notification state did not exist yet and starts
/// fresh.
fn profile_without_auth(preferences: Option<Preferences>) -> ProfileData {
    ProfileData {
        auth: None,
        preferences,
        notifications: Some(Notifications::default()),
    }
}

/// Maps the v2-v4 session union onto the current one case for case. An empty union means no
/// session.
fn retag_auth(tokens: AuthTokensV2) -> Option<AuthTokens> {
    Some(match tokens.kind? {
        auth_tokens_v2::Kind::Bearer(tokens) => AuthTokens::bearer(tokens),
        auth_tokens_v2::Kind::Dpop(tokens) => AuthTokens::dpop(tokens),
        auth_tokens_v2::Kind::Guest(_) => AuthTokens::guest(DEFAULT_GUEST_SERVER),
    })
}

fn navigation_or_root(navigation: Option<Navigation>) -> Navigation {
    navigation.unwrap_or_else(Navigation::root)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::v2::GuestV2;
    use crate::schema::v3::ProfileDataV3;
    use crate::schema::DpopTokens;

    fn flat(owner: &str) -> LegacyAuthTokens {
        LegacyAuthTokens {
            profile_id: owner.to_string(),
            access_jwt: format!("access-{owner}"),
            refresh_jwt: format!("refresh-{owner}"),
        }
    }

    fn prefs(lang: &str) -> ProfileDataV0 {
        ProfileDataV0 {
            preferences: Some(Preferences {
                content_languages: vec![lang.to_string()],
                ..Default::default()
            }),
        }
    }

    #[test]
    fn flat_token_becomes_bearer_on_legacy_endpoint() {
        let snapshot = SavedStateV0 {
            auth: Some(flat("alice")),
            profile_data: [("alice".to_string(), prefs("en"))].into(),
            navigation: None,
        };
        let state = snapshot.upgrade(SchemaVersion::CURRENT);
        let auth = state.profile_data[&ProfileId::new("alice")]
            .auth
            .clone()
            .unwrap();
        assert_eq!(
            auth,
            AuthTokens::bearer(BearerTokens {
                profile_id: "alice".to_string(),
                service_endpoint: LEGACY_SERVICE_ENDPOINT.to_string(),
                access_token: "access-alice".to_string(),
                refresh_token: "refresh-alice".to_string(),
            })
        );
        assert_eq!(state.navigation, Navigation::root());
    }

    #[test]
    fn missing_owner_profile_is_created() {
        let snapshot = SavedStateV1 {
            version: 1,
            auth: Some(flat("carol")),
            navigation: None,
            profile_data: [("bob".to_string(), prefs("de"))].into(),
        };
        let state = snapshot.upgrade(SchemaVersion::CURRENT);
        assert_eq!(state.active_profile_id, Some(ProfileId::new("carol")));
        let carol = &state.profile_data[&ProfileId::new("carol")];
        assert!(carol.auth.is_some());
        assert!(carol.preferences.is_none());
        assert!(state.profile_data[&ProfileId::new("bob")].auth.is_none());
        state.validate().unwrap();
    }

    #[test]
    fn empty_owner_is_treated_as_unknown_author() {
        let snapshot = SavedStateV0 {
            auth: Some(flat("")),
            ..Default::default()
        };
        let state = snapshot.upgrade(SchemaVersion::CURRENT);
        assert_eq!(state.active_profile_id, Some(ProfileId::guest()));
        assert!(state.profile_data.is_empty());
    }

    #[test]
    fn pending_owner_stays_active_without_a_profile() {
        let snapshot = SavedStateV0 {
            auth: Some(flat(ProfileId::PENDING)),
            ..Default::default()
        };
        let state = snapshot.upgrade(SchemaVersion::CURRENT);
        assert_eq!(state.active_profile_id, Some(ProfileId::pending()));
        assert!(state.profile_data.is_empty());
        state.validate().unwrap();
    }

    #[test]
    fn v2_guest_union_activates_guest() {
        let snapshot = SavedStateV2 {
            version: 2,
            navigation: None,
            profile_data: [("alice".to_string(), prefs("en"))].into(),
            auth: Some(AuthTokensV2 {
                kind: Some(auth_tokens_v2::Kind::Guest(GuestV2 {})),
            }),
        };
        let state = snapshot.upgrade(SchemaVersion::CURRENT);
        assert_eq!(state.active_profile_id, Some(ProfileId::guest()));
        assert!(state.profile_data[&ProfileId::new("alice")].auth.is_none());
    }

    #[test]
    fn v2_empty_union_means_no_session() {
        let snapshot = SavedStateV2 {
            version: 2,
            auth: Some(AuthTokensV2 { kind: None }),
            ..Default::default()
        };
        let state = snapshot.upgrade(SchemaVersion::CURRENT);
        assert_eq!(state.active_profile_id, None);
    }

    #[test]
    fn v3_retags_per_profile_sessions() {
        let dpop = DpopTokens {
            profile_id: "alice".to_string(),
            service_endpoint: "https://pds.example".to_string(),
            access_token: "a".to_string(),
            refresh_token: "r".to_string(),
            key_pair: vec![1, 2, 3],
            nonce: "n".to_string(),
            client_id: "c".to_string(),
        };
        let snapshot = SavedStateV3 {
            version: 3,
            navigation: Some(Navigation::default()),
            profile_data: [
                (
                    "alice".to_string(),
                    ProfileDataV3 {
                        auth: Some(AuthTokensV2 {
                            kind: Some(auth_tokens_v2::Kind::Dpop(dpop.clone())),
                        }),
                        preferences: None,
                    },
                ),
                (
                    "guest-browsing".to_string(),
                    ProfileDataV3 {
                        auth: Some(AuthTokensV2 {
                            kind: Some(auth_tokens_v2::Kind::Guest(GuestV2 {})),
                        }),
                        preferences: None,
                    },
                ),
            ]
            .into(),
            active_profile_id: Some(ProfileId::UNKNOWN_AUTHOR.to_string()),
        };
        let state = snapshot.upgrade(SchemaVersion::CURRENT);

        assert_eq!(
            state.profile_data[&ProfileId::new("alice")].auth,
            Some(AuthTokens::dpop(dpop))
        );
        assert_eq!(
            state.profile_data[&ProfileId::new("guest-browsing")].auth,
            Some(AuthTokens::guest(DEFAULT_GUEST_SERVER))
        );
        // From v3 on the active id is stored explicitly and is not reinterpreted.
        assert_eq!(state.active_profile_id, Some(ProfileId::unknown_author()));
        // An explicitly stored empty navigation is kept, not replaced with the root.
        assert_eq!(state.navigation, Navigation::default());
    }

    #[test]
    fn upgrade_stamps_the_requested_target() {
        let state = SavedStateV4::default().upgrade(SchemaVersion::V5);
        assert_eq!(state.version, SchemaVersion::V5);
    }

    #[test]
    fn versioned_snapshot_reports_its_version() {
        for version in SchemaVersion::ALL {
            // An empty buffer decodes as the all-defaults message of every schema.
            let snapshot = VersionedSnapshot::decode(version, &[]).unwrap();
            assert_eq!(snapshot.version(), version);
        }
        assert!(matches!(
            VersionedSnapshot::decode(SchemaVersion(0), &[]),
            Err(StateError::UnknownVersion(SchemaVersion(0)))
        ));
    }
}
