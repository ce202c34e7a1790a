//! Property-based tests for registry persistence
//!
//! Saving and reloading any profile list returns it field-for-field in the
//! same order.

use proptest::prelude::*;
use ssh_manager_core::models::ConnectionProfile;
use ssh_manager_core::storage::{EncryptionKey, KEY_LEN, RegistryStore};
use tempfile::TempDir;

// Strategy for generating valid profile names
fn arb_name() -> impl Strategy<Value = String> {
    "[a-zA-Z][a-zA-Z0-9_-]{0,31}".prop_map(|s| s)
}

// Strategy for generating valid hostnames
fn arb_host() -> impl Strategy<Value = String> {
    "[a-z0-9]([a-z0-9-]{0,15}[a-z0-9])?(\\.[a-z0-9]([a-z0-9-]{0,15}[a-z0-9])?)*".prop_map(|s| s)
}

// Strategy for generating optional group paths
fn arb_group() -> impl Strategy<Value = Option<String>> {
    prop_oneof![
        Just(None),
        prop::collection::vec("[a-z][a-z0-9 ]{0,7}", 1..4).prop_map(|parts| Some(parts.join("/"))),
    ]
}

// Strategy for generating a complete profile
fn arb_profile() -> impl Strategy<Value = ConnectionProfile> {
    (
        arb_name(),
        arb_host(),
        1u16..=65535u16,
        "[a-z_][a-z0-9_-]{0,15}",
        prop::option::of("[ -~]{1,32}"),
        prop::option::of("(~/)?[a-zA-Z0-9_./-]{1,32}"),
        arb_group(),
    )
        .prop_map(|(name, host, port, username, password, key_path, group)| {
            let mut profile = ConnectionProfile::new(name, host, username).with_port(port);
            if let Some(password) = password {
                profile = profile.with_password(password);
            }
            if let Some(key_path) = key_path {
                profile = profile.with_key_path(key_path);
            }
            if let Some(group) = group {
                profile = profile.with_group(group);
            }
            profile
        })
}

fn arb_key() -> impl Strategy<Value = EncryptionKey> {
    prop::array::uniform32(any::<u8>()).prop_map(EncryptionKey::from_bytes)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// Saving then loading yields the same list in the same order
    #[test]
    fn save_load_roundtrip(
        key in arb_key(),
        profiles in prop::collection::vec(arb_profile(), 0..8),
    ) {
        let temp = TempDir::new().unwrap();
        let store = RegistryStore::new(temp.path().join("config.json"), key);

        store.save(&profiles).unwrap();
        let loaded = store.load().unwrap();

        prop_assert_eq!(loaded, profiles);
    }

    /// A second save fully replaces the first
    #[test]
    fn save_replaces_previous_contents(
        first in prop::collection::vec(arb_profile(), 0..5),
        second in prop::collection::vec(arb_profile(), 0..5),
    ) {
        let temp = TempDir::new().unwrap();
        let store = RegistryStore::new(
            temp.path().join("config.json"),
            EncryptionKey::from_bytes([7u8; KEY_LEN]),
        );

        store.save(&first).unwrap();
        store.save(&second).unwrap();

        prop_assert_eq!(store.load().unwrap(), second);
    }
}
