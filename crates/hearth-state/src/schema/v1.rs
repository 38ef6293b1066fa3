use std::collections::BTreeMap;

use super::common::{LegacyAuthTokens, Navigation};
use super::v0::ProfileDataV0;

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct SavedStateV1 {
    #[prost(uint32, tag = "1")]
    pub version: u32,
    #[prost(message, optional, tag = "2")]
    pub auth: Option<LegacyAuthTokens>,
    #[prost(message, optional, tag = "3")]
    pub navigation: Option<Navigation>,
    /// Still keyed by raw, untyped profile identifiers.
    #[prost(btree_map = "string, message", tag = "4")]
    pub profile_data: BTreeMap<String, ProfileDataV0>,
}
