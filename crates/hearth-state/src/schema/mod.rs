//! Wire schemas for every persisted state version.
//!
//! Each `vN` module is frozen: once a version ships, its structs never change again. A schema
//! change adds a new module and bumps [`crate::SchemaVersion::CURRENT`]. Retired field numbers are
//! listed by [`crate::reserved_fields`] and are simply absent from the structs, so `prost` skips
//! any bytes still found there.

pub mod common;
pub mod v0;
pub mod v1;
pub mod v2;
pub mod v3;
pub mod v4;
pub mod v5;

pub use common::{
    BearerTokens, DpopTokens, LegacyAuthTokens, Navigation, NavigationStack, Notifications,
    Preferences,
};
