//! Group tree derived from profile group paths
//!
//! Groups have no storage of their own. A group exists exactly while some
//! profile's `group` equals its path or lies below it, so every query here
//! is a pure function over the live profile slice.

use std::collections::BTreeSet;

use crate::error::ValidationError;
use crate::models::ConnectionProfile;

/// Separator between group path segments
pub const SEPARATOR: char = '/';

/// Splits a group path into segments; the root path `""` has none
pub fn split_path(path: &str) -> Vec<&str> {
    if path.is_empty() {
        Vec::new()
    } else {
        path.split(SEPARATOR).collect()
    }
}

/// Joins segments into a group path
pub fn join_path<S: AsRef<str>>(segments: &[S]) -> String {
    segments
        .iter()
        .map(AsRef::as_ref)
        .collect::<Vec<_>>()
        .join("/")
}

/// Parent of a group path; `None` for the root itself
pub fn parent_of(path: &str) -> Option<&str> {
    if path.is_empty() {
        return None;
    }
    Some(path.rfind(SEPARATOR).map_or("", |idx| &path[..idx]))
}

/// Last segment of a group path
pub fn leaf_name(path: &str) -> &str {
    path.rsplit(SEPARATOR).next().unwrap_or(path)
}

/// Rejects group paths with empty segments (`""`, `"a//b"`, `"/a"`, `"a/"`)
///
/// # Errors
///
/// Returns a [`ValidationError`] for the `group` field.
pub fn validate_group_path(path: &str) -> Result<(), ValidationError> {
    if path.split(SEPARATOR).any(str::is_empty) {
        return Err(ValidationError::new(
            "group",
            "group path must not contain empty segments",
        ));
    }
    Ok(())
}

/// Every group path in use, including all ancestors of each profile's group
///
/// `"a/b/c"` contributes `"a"`, `"a/b"` and `"a/b/c"`.
pub fn groups_of(profiles: &[ConnectionProfile]) -> BTreeSet<String> {
    let mut groups = BTreeSet::new();
    for group in profiles.iter().map(ConnectionProfile::group_path) {
        if group.is_empty() {
            continue;
        }
        for (idx, ch) in group.char_indices() {
            if ch == SEPARATOR {
                groups.insert(group[..idx].to_string());
            }
        }
        groups.insert(group.to_string());
    }
    groups
}

/// Direct child groups one segment below `path` (`""` is the root)
pub fn children(profiles: &[ConnectionProfile], path: &str) -> BTreeSet<String> {
    groups_of(profiles)
        .into_iter()
        .filter(|group| parent_of(group) == Some(path))
        .collect()
}

/// Profiles whose group is exactly `path`; `""` selects ungrouped profiles
pub fn profiles_in<'a>(profiles: &'a [ConnectionProfile], path: &str) -> Vec<&'a ConnectionProfile> {
    profiles.iter().filter(|p| p.group_path() == path).collect()
}

/// Number of entries shown when listing `path`: its profiles plus child groups
pub fn item_count(profiles: &[ConnectionProfile], path: &str) -> usize {
    profiles_in(profiles, path).len() + children(profiles, path).len()
}

/// Whether `path` is currently a node of the tree; the root always is
pub fn exists(profiles: &[ConnectionProfile], path: &str) -> bool {
    path.is_empty() || groups_of(profiles).contains(path)
}
