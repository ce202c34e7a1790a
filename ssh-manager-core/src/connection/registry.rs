//! Registry service for CRUD operations
//!
//! Every mutation builds the next profile list, saves it, and only then
//! swaps it in. A failed save therefore leaves memory and disk in agreement.

use std::collections::BTreeSet;

use crate::config::ConfigPaths;
use crate::connection::tree;
use crate::error::{Result, StoreResult};
use crate::models::ConnectionProfile;
use crate::storage::{KeyStore, RegistryStore};

/// Owner of the in-memory profile list and its encrypted store
///
/// Holds the key (inside the store) for the lifetime of the process; there
/// is no global key state.
#[derive(Debug)]
pub struct RegistryService {
    store: RegistryStore,
    profiles: Vec<ConnectionProfile>,
}

impl RegistryService {
    /// Opens the registry under `paths`: loads or creates the key, then
    /// decrypts the registry
    ///
    /// # Errors
    ///
    /// Returns key or store errors. Callers must treat these as fatal rather
    /// than continuing with an empty registry.
    pub fn open(paths: &ConfigPaths) -> Result<Self> {
        let key = KeyStore::new(paths.key_file()).get_or_create_key()?;
        let store = RegistryStore::new(paths.registry_file(), key);
        Ok(Self::load(store)?)
    }

    /// Loads the registry through an existing store
    ///
    /// # Errors
    ///
    /// Returns the store's load error.
    pub fn load(store: RegistryStore) -> StoreResult<Self> {
        let profiles = store.load()?;
        tracing::info!(count = profiles.len(), "Registry opened");
        Ok(Self { store, profiles })
    }

    /// Inserts `profile`, replacing any profile with the same name
    ///
    /// The profile is appended at the end of the storage order.
    ///
    /// # Errors
    ///
    /// Returns a validation error for an invalid profile, or the store's
    /// save error. The registry is unchanged on error.
    pub fn add_or_replace(&mut self, profile: ConnectionProfile) -> Result<()> {
        profile.validate()?;
        if self.find(&profile.name).is_some() {
            tracing::warn!(profile = %profile.name, "Replacing existing profile with the same name");
        }

        let mut next: Vec<ConnectionProfile> = self
            .profiles
            .iter()
            .filter(|p| p.name != profile.name)
            .cloned()
            .collect();
        let name = profile.name.clone();
        next.push(profile);
        self.commit(next)?;

        tracing::info!(profile = %name, "Profile saved");
        Ok(())
    }

    /// Replaces the profile named `original_name` with `profile`
    ///
    /// Used when an edit renames a profile: the old entry is dropped and the
    /// new one upserted, with a single save.
    ///
    /// # Errors
    ///
    /// Same as [`Self::add_or_replace`].
    pub fn replace(&mut self, original_name: &str, profile: ConnectionProfile) -> Result<()> {
        profile.validate()?;
        if profile.name != original_name && self.find(&profile.name).is_some() {
            tracing::warn!(
                from = %original_name,
                to = %profile.name,
                "Rename overwrites an existing profile"
            );
        }

        let mut next: Vec<ConnectionProfile> = self
            .profiles
            .iter()
            .filter(|p| p.name != original_name && p.name != profile.name)
            .cloned()
            .collect();
        let name = profile.name.clone();
        next.push(profile);
        self.commit(next)?;

        tracing::info!(from = %original_name, profile = %name, "Profile updated");
        Ok(())
    }

    /// Removes the profile named `name`
    ///
    /// Returns whether a profile was removed; an unknown name is a no-op and
    /// does not touch the file.
    ///
    /// # Errors
    ///
    /// Returns the store's save error. The registry is unchanged on error.
    pub fn remove(&mut self, name: &str) -> Result<bool> {
        if self.find(name).is_none() {
            return Ok(false);
        }

        let next: Vec<ConnectionProfile> = self
            .profiles
            .iter()
            .filter(|p| p.name != name)
            .cloned()
            .collect();
        self.commit(next)?;

        tracing::info!(profile = %name, "Profile removed");
        Ok(true)
    }

    /// Looks up a profile by name
    pub fn find(&self, name: &str) -> Option<&ConnectionProfile> {
        self.profiles.iter().find(|p| p.name == name)
    }

    /// All profiles in storage order
    pub fn list_all(&self) -> &[ConnectionProfile] {
        &self.profiles
    }

    /// Number of profiles
    pub fn len(&self) -> usize {
        self.profiles.len()
    }

    /// Whether the registry is empty
    pub fn is_empty(&self) -> bool {
        self.profiles.is_empty()
    }

    // ========== Group Tree Queries ==========

    /// Every group path currently in use
    pub fn groups(&self) -> BTreeSet<String> {
        tree::groups_of(&self.profiles)
    }

    /// Direct child groups of `path`
    pub fn child_groups(&self, path: &str) -> BTreeSet<String> {
        tree::children(&self.profiles, path)
    }

    /// Profiles directly in `path`
    pub fn profiles_in(&self, path: &str) -> Vec<&ConnectionProfile> {
        tree::profiles_in(&self.profiles, path)
    }

    /// Display item count of `path`
    pub fn item_count(&self, path: &str) -> usize {
        tree::item_count(&self.profiles, path)
    }

    /// Whether `path` is a live node of the tree
    pub fn group_exists(&self, path: &str) -> bool {
        tree::exists(&self.profiles, path)
    }

    // ========== Persistence ==========

    fn commit(&mut self, next: Vec<ConnectionProfile>) -> StoreResult<()> {
        self.store.save(&next)?;
        self.profiles = next;
        Ok(())
    }
}
