use std::collections::BTreeMap;

use super::common::{BearerTokens, DpopTokens, Navigation};
use super::v0::ProfileDataV0;

/// Field 2 (flat global auth) is retired.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct SavedStateV2 {
    #[prost(uint32, tag = "1")]
    pub version: u32,
    #[prost(message, optional, tag = "3")]
    pub navigation: Option<Navigation>,
    /// Keyed by profile id.
    #[prost(btree_map = "string, message", tag = "4")]
    pub profile_data: BTreeMap<String, ProfileDataV0>,
    /// Global session, now a tagged union.
    #[prost(message, optional, tag = "5")]
    pub auth: Option<AuthTokensV2>,
}

/// Session union used from v2 through v4.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct AuthTokensV2 {
    #[prost(oneof = "auth_tokens_v2::Kind", tags = "1, 2, 3")]
    pub kind: Option<auth_tokens_v2::Kind>,
}

pub mod auth_tokens_v2 {
    use super::{BearerTokens, DpopTokens, GuestV2};

    #[derive(Clone, PartialEq, ::prost::Oneof)]
    pub enum Kind {
        #[prost(message, tag = "1")]
        Bearer(BearerTokens),
        #[prost(message, tag = "2")]
        Dpop(DpopTokens),
        #[prost(message, tag = "3")]
        Guest(GuestV2),
    }
}

/// Unauthenticated guest marker; it had no fields before v5.
#[derive(Clone, Copy, PartialEq, ::prost::Message)]
pub struct GuestV2 {}
