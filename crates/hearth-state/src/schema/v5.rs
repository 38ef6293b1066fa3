//! Wire image of the current schema. [`crate::SavedState`] encodes through these types.

use std::collections::BTreeMap;

use super::common::{BearerTokens, DpopTokens, Navigation, Notifications, Preferences};

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct SavedStateV5 {
    #[prost(uint32, tag = "1")]
    pub version: u32,
    #[prost(message, optional, tag = "3")]
    pub navigation: Option<Navigation>,
    #[prost(btree_map = "string, message", tag = "4")]
    pub profile_data: BTreeMap<String, ProfileData>,
    #[prost(string, optional, tag = "6")]
    pub active_profile_id: Option<String>,
}

/// Everything persisted for one profile.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ProfileData {
    #[prost(message, optional, tag = "1")]
    pub auth: Option<AuthTokens>,
    #[prost(message, optional, tag = "2")]
    pub preferences: Option<Preferences>,
    #[prost(message, optional, tag = "3")]
    pub notifications: Option<Notifications>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct AuthTokens {
    #[prost(oneof = "auth_tokens::Kind", tags = "1, 2, 3")]
    pub kind: Option<auth_tokens::Kind>,
}

pub mod auth_tokens {
    use super::{BearerTokens, DpopTokens, GuestSession};

    #[derive(Clone, PartialEq, ::prost::Oneof)]
    pub enum Kind {
        #[prost(message, tag = "1")]
        Bearer(BearerTokens),
        #[prost(message, tag = "2")]
        Dpop(DpopTokens),
        #[prost(message, tag = "3")]
        Guest(GuestSession),
    }
}

/// Signed-out browsing against a public server.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct GuestSession {
    #[prost(string, tag = "1")]
    pub server: String,
}

impl AuthTokens {
    pub fn bearer(tokens: BearerTokens) -> Self {
        Self {
            kind: Some(auth_tokens::Kind::Bearer(tokens)),
        }
    }

    pub fn dpop(tokens: DpopTokens) -> Self {
        Self {
            kind: Some(auth_tokens::Kind::Dpop(tokens)),
        }
    }

    pub fn guest(server: impl Into<String>) -> Self {
        Self {
            kind: Some(auth_tokens::Kind::Guest(GuestSession {
                server: server.into(),
            })),
        }
    }

    /// Short name of the session kind, safe to log.
    pub fn kind_name(&self) -> Option<&'static str> {
        match self.kind.as_ref()? {
            auth_tokens::Kind::Bearer(_) => Some("bearer"),
            auth_tokens::Kind::Dpop(_) => Some("dpop"),
            auth_tokens::Kind::Guest(_) => Some("guest"),
        }
    }

    /// Profile the session was issued to. Guest sessions have none.
    pub fn profile_id(&self) -> Option<&str> {
        match self.kind.as_ref()? {
            auth_tokens::Kind::Bearer(tokens) => Some(&tokens.profile_id),
            auth_tokens::Kind::Dpop(tokens) => Some(&tokens.profile_id),
            auth_tokens::Kind::Guest(_) => None,
        }
    }
}
