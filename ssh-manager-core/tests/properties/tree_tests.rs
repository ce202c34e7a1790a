//! Property-based tests for the derived group tree

use std::collections::BTreeSet;

use proptest::prelude::*;
use ssh_manager_core::connection::tree;
use ssh_manager_core::models::ConnectionProfile;

// Strategy for generating valid group paths
fn arb_group_path() -> impl Strategy<Value = String> {
    prop::collection::vec("[a-c]{1,2}", 1..4).prop_map(|parts| parts.join("/"))
}

fn arb_profiles() -> impl Strategy<Value = Vec<ConnectionProfile>> {
    prop::collection::vec(prop::option::of(arb_group_path()), 0..10).prop_map(|groups| {
        groups
            .into_iter()
            .enumerate()
            .map(|(i, group)| {
                let profile = ConnectionProfile::new(format!("p{i}"), "h", "u");
                match group {
                    Some(group) => profile.with_group(group),
                    None => profile,
                }
            })
            .collect()
    })
}

#[test]
fn derivation_example() {
    let profiles = vec![
        ConnectionProfile::new("ab", "h", "u").with_group("a/b"),
        ConnectionProfile::new("ac", "h", "u").with_group("a/c"),
        ConnectionProfile::new("root", "h", "u"),
    ];

    let groups: Vec<_> = tree::groups_of(&profiles).into_iter().collect();
    assert_eq!(groups, vec!["a", "a/b", "a/c"]);

    let root_children: Vec<_> = tree::children(&profiles, "").into_iter().collect();
    assert_eq!(root_children, vec!["a"]);

    let root_profiles: Vec<_> = tree::profiles_in(&profiles, "")
        .into_iter()
        .map(|p| p.name.as_str())
        .collect();
    assert_eq!(root_profiles, vec!["root"]);
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// Every group is either a profile's group or an ancestor of one
    #[test]
    fn groups_are_exactly_prefixes(profiles in arb_profiles()) {
        let mut expected = BTreeSet::new();
        for profile in &profiles {
            let parts = profile.group_parts();
            for len in 1..=parts.len() {
                expected.insert(tree::join_path(&parts[..len]));
            }
        }
        prop_assert_eq!(tree::groups_of(&profiles), expected);
    }

    /// Every non-root group has a live parent
    #[test]
    fn groups_are_prefix_closed(profiles in arb_profiles()) {
        for group in tree::groups_of(&profiles) {
            let parent = tree::parent_of(&group).unwrap();
            prop_assert!(tree::exists(&profiles, parent));
        }
    }

    /// Every profile is listed under exactly one node
    #[test]
    fn profiles_partition_over_nodes(profiles in arb_profiles()) {
        let mut nodes: Vec<String> = tree::groups_of(&profiles).into_iter().collect();
        nodes.push(String::new());

        let listed: usize = nodes
            .iter()
            .map(|node| tree::profiles_in(&profiles, node).len())
            .sum();
        prop_assert_eq!(listed, profiles.len());
    }

    /// Removing a profile drops only groups nobody else still needs
    #[test]
    fn removal_prunes_unused_groups(profiles in arb_profiles(), pick in any::<prop::sample::Index>()) {
        prop_assume!(!profiles.is_empty());
        let idx = pick.index(profiles.len());
        let mut remaining = profiles.clone();
        remaining.remove(idx);

        let before = tree::groups_of(&profiles);
        let after = tree::groups_of(&remaining);
        prop_assert!(after.is_subset(&before));
        for group in before.difference(&after) {
            let group_fully_removed = remaining.iter().all(|p| {
                let path = p.group_path();
                path != group && !path.starts_with(&format!("{group}/"))
            });
            prop_assert!(group_fully_removed);
        }
    }
}
