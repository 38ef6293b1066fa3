//! Messages whose wire shape is identical at every version they appear in.

/// Navigation position. The migration engine never looks inside it.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct Navigation {
    #[prost(message, repeated, tag = "1")]
    pub stacks: Vec<NavigationStack>,
    #[prost(uint32, tag = "2")]
    pub current_stack: u32,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct NavigationStack {
    #[prost(string, repeated, tag = "1")]
    pub routes: Vec<String>,
}

/// Route every fresh navigation root starts on.
pub const ROOT_ROUTE: &str = "/home";

impl Navigation {
    /// A single stack sitting on [`ROOT_ROUTE`].
    pub fn root() -> Self {
        Self {
            stacks: vec![NavigationStack {
                routes: vec![ROOT_ROUTE.to_string()],
            }],
            current_stack: 0,
        }
    }
}

/// Per-profile preferences, copied verbatim across every upgrade.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct Preferences {
    #[prost(string, repeated, tag = "1")]
    pub content_languages: Vec<String>,
    #[prost(bool, tag = "2")]
    pub adult_content_enabled: bool,
    #[prost(string, repeated, tag = "3")]
    pub muted_words: Vec<String>,
    #[prost(string, repeated, tag = "4")]
    pub pinned_timelines: Vec<String>,
}

/// Per-profile notification bookkeeping (v4+).
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct Notifications {
    #[prost(int64, tag = "1")]
    pub last_seen_unix_ms: i64,
}

/// Flat session token used by the legacy and v1 schemas.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct LegacyAuthTokens {
    #[prost(string, tag = "1")]
    pub profile_id: String,
    #[prost(string, tag = "2")]
    pub access_jwt: String,
    #[prost(string, tag = "3")]
    pub refresh_jwt: String,
}

/// Bearer-token session (v2+).
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct BearerTokens {
    #[prost(string, tag = "1")]
    pub profile_id: String,
    #[prost(string, tag = "2")]
    pub service_endpoint: String,
    #[prost(string, tag = "3")]
    pub access_token: String,
    #[prost(string, tag = "4")]
    pub refresh_token: String,
}

/// Proof-of-possession session (v2+). `key_pair` is the serialized signing key bound to the
/// tokens.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct DpopTokens {
    #[prost(string, tag = "1")]
    pub profile_id: String,
    #[prost(string, tag = "2")]
    pub service_endpoint: String,
    #[prost(string, tag = "3")]
    pub access_token: String,
    #[prost(string, tag = "4")]
    pub refresh_token: String,
    #[prost(bytes = "vec", tag = "5")]
    pub key_pair: Vec<u8>,
    #[prost(string, tag = "6")]
    pub nonce: String,
    #[prost(string, tag = "7")]
    pub client_id: String,
}
