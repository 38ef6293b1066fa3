//! The original schema. There is no version field: field 1 is the optional global session, and
//! nothing in this message uses the varint wire type at the top level.

use std::collections::BTreeMap;

use super::common::{LegacyAuthTokens, Navigation, Preferences};

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct SavedStateV0 {
    #[prost(message, optional, tag = "1")]
    pub auth: Option<LegacyAuthTokens>,
    /// Keyed by raw, untyped profile identifiers.
    #[prost(btree_map = "string, message", tag = "2")]
    pub profile_data: BTreeMap<String, ProfileDataV0>,
    #[prost(message, optional, tag = "3")]
    pub navigation: Option<Navigation>,
}

/// Profile payload shared by v0, v1 and v2. It carries no auth.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ProfileDataV0 {
    #[prost(message, optional, tag = "1")]
    pub preferences: Option<Preferences>,
}
