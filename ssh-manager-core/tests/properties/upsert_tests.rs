//! Property-based tests for registry upsert semantics

use proptest::prelude::*;
use ssh_manager_core::RegistryService;
use ssh_manager_core::config::ConfigPaths;
use ssh_manager_core::models::ConnectionProfile;
use tempfile::TempDir;

fn arb_profile() -> impl Strategy<Value = ConnectionProfile> {
    ("[a-d]", "[a-z]{1,8}", 1u16..=65535u16)
        .prop_map(|(name, host, port)| ConnectionProfile::new(name, host, "u").with_port(port))
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(50))]

    /// Upserting the same profile twice is the same as once
    #[test]
    fn upsert_is_idempotent(profile in arb_profile()) {
        let temp = TempDir::new().unwrap();
        let mut service = RegistryService::open(&ConfigPaths::with_config_dir(temp.path())).unwrap();

        service.add_or_replace(profile.clone()).unwrap();
        let once = service.list_all().to_vec();
        service.add_or_replace(profile).unwrap();

        prop_assert_eq!(service.list_all(), once.as_slice());
    }

    /// Names stay unique and the last write for each name wins
    #[test]
    fn names_stay_unique(profiles in prop::collection::vec(arb_profile(), 0..12)) {
        let temp = TempDir::new().unwrap();
        let mut service = RegistryService::open(&ConfigPaths::with_config_dir(temp.path())).unwrap();

        for profile in &profiles {
            service.add_or_replace(profile.clone()).unwrap();
        }

        let mut names: Vec<_> = service.list_all().iter().map(|p| p.name.clone()).collect();
        let total = names.len();
        names.sort();
        names.dedup();
        prop_assert_eq!(names.len(), total);

        for stored in service.list_all() {
            let last = profiles.iter().rev().find(|p| p.name == stored.name).unwrap();
            prop_assert_eq!(stored, last);
        }
    }
}
