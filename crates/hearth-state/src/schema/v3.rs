use std::collections::BTreeMap;

use super::common::{Navigation, Preferences};
use super::v2::AuthTokensV2;

/// Fields 2 and 5 (both shapes of global auth) are retired.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct SavedStateV3 {
    #[prost(uint32, tag = "1")]
    pub version: u32,
    #[prost(message, optional, tag = "3")]
    pub navigation: Option<Navigation>,
    #[prost(btree_map = "string, message", tag = "4")]
    pub profile_data: BTreeMap<String, ProfileDataV3>,
    #[prost(string, optional, tag = "6")]
    pub active_profile_id: Option<String>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ProfileDataV3 {
    #[prost(message, optional, tag = "1")]
    pub auth: Option<AuthTokensV2>,
    #[prost(message, optional, tag = "2")]
    pub preferences: Option<Preferences>,
}
