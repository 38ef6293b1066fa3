use std::collections::BTreeMap;

use super::common::{Navigation, Notifications, Preferences};
use super::v2::AuthTokensV2;

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct SavedStateV4 {
    #[prost(uint32, tag = "1")]
    pub version: u32,
    #[prost(message, optional, tag = "3")]
    pub navigation: Option<Navigation>,
    #[prost(btree_map = "string, message", tag = "4")]
    pub profile_data: BTreeMap<String, ProfileDataV4>,
    #[prost(string, optional, tag = "6")]
    pub active_profile_id: Option<String>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ProfileDataV4 {
    #[prost(message, optional, tag = "1")]
    pub auth: Option<AuthTokensV2>,
    #[prost(message, optional, tag = "2")]
    pub preferences: Option<Preferences>,
    #[prost(message, optional, tag = "3")]
    pub notifications: Option<Notifications>,
}
