#![cfg(not(target_arch = "wasm32"))]

use hearth_state::schema::common::{
    BearerTokens, DpopTokens, Navigation, NavigationStack, Notifications, Preferences,
};
use hearth_state::{load, save, AuthTokens, ProfileData, ProfileId, SavedState, SchemaVersion};
use proptest::prelude::*;

fn profile_key() -> impl Strategy<Value = String> {
    "did:plc:[a-z2-7]{1,24}"
}

fn auth() -> impl Strategy<Value = Option<AuthTokens>> {
    prop_oneof![
        Just(None),
        "https://[a-z]{1,12}\\.example".prop_map(|server| Some(AuthTokens::guest(server))),
        (profile_key(), "[A-Za-z0-9._-]{0,64}").prop_map(|(profile_id, token)| {
            Some(AuthTokens::bearer(BearerTokens {
                profile_id,
                service_endpoint: "https://pds.example".to_string(),
                access_token: token.clone(),
                refresh_token: token,
            }))
        }),
        (profile_key(), proptest::collection::vec(any::<u8>(), 0..64)).prop_map(
            |(profile_id, key_pair)| {
                Some(AuthTokens::dpop(DpopTokens {
                    profile_id,
                    key_pair,
                    ..Default::default()
                }))
            }
        ),
    ]
}

fn profile_data() -> impl Strategy<Value = ProfileData> {
    (
        auth(),
        proptest::option::of(
            (
                proptest::collection::vec("[a-z]{2}", 0..3),
                any::<bool>(),
                proptest::collection::vec(".{0,16}", 0..3),
            )
                .prop_map(|(content_languages, adult_content_enabled, muted_words)| {
                    Preferences {
                        content_languages,
                        adult_content_enabled,
                        muted_words,
                        pinned_timelines: Vec::new(),
                    }
                }),
        ),
        proptest::option::of(any::<i64>().prop_map(|last_seen_unix_ms| Notifications {
            last_seen_unix_ms,
        })),
    )
        .prop_map(|(auth, preferences, notifications)| ProfileData {
            auth,
            preferences,
            notifications,
        })
}

fn navigation() -> impl Strategy<Value = Navigation> {
    (
        proptest::collection::vec(proptest::collection::vec("/[a-z/]{0,24}", 0..4), 0..3),
        0u32..3,
    )
        .prop_map(|(stacks, current_stack)| Navigation {
            stacks: stacks
                .into_iter()
                .map(|routes| NavigationStack { routes })
                .collect(),
            current_stack,
        })
}

fn saved_state() -> impl Strategy<Value = SavedState> {
    (
        navigation(),
        proptest::collection::btree_map(profile_key(), profile_data(), 0..4),
        proptest::option::of(prop_oneof![
            profile_key(),
            Just(ProfileId::GUEST.to_string()),
            Just(ProfileId::PENDING.to_string()),
        ]),
    )
        .prop_map(|(navigation, profiles, active)| SavedState {
            version: SchemaVersion::CURRENT,
            navigation,
            profile_data: profiles
                .into_iter()
                .map(|(id, data)| (ProfileId::from(id), data))
                .collect(),
            active_profile_id: active.map(ProfileId::from),
        })
}

proptest! {
    #[test]
    fn current_schema_round_trips(state in saved_state()) {
        let bytes = save(&state);
        prop_assert_eq!(load(&bytes), state);
    }

    #[test]
    fn truncated_records_never_panic(state in saved_state(), cut in any::<prop::sample::Index>()) {
        let bytes = save(&state);
        let cut = cut.index(bytes.len());
        let loaded = load(&bytes[..cut]);
        prop_assert_eq!(loaded.version, SchemaVersion::CURRENT);
    }
}
