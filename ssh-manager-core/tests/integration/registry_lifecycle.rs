//! Registry lifecycle integration tests
//!
//! Open, mutate, and reopen the registry from disk, including the failure
//! paths that must abort startup.

use secrecy::ExposeSecret;
use ssh_manager_core::config::ConfigPaths;
use ssh_manager_core::error::{KeyError, SshManagerError, StoreError};
use ssh_manager_core::models::ConnectionProfile;
use ssh_manager_core::storage::{ENCRYPTED_MAGIC, KeyStore, RegistryStore};
use ssh_manager_core::RegistryService;
use tempfile::TempDir;

fn paths(temp: &TempDir) -> ConfigPaths {
    ConfigPaths::with_config_dir(temp.path())
}

#[test]
fn registry_survives_restart() {
    let temp = TempDir::new().unwrap();
    {
        let mut service = RegistryService::open(&paths(&temp)).unwrap();
        service
            .add_or_replace(
                ConnectionProfile::new("db1", "10.0.0.5", "admin")
                    .with_port(2222)
                    .with_password("s3cr3t")
                    .with_group("infra/db"),
            )
            .unwrap();
        service
            .add_or_replace(
                ConnectionProfile::new("web", "example.com", "deploy").with_key_path("~/.ssh/id"),
            )
            .unwrap();
    }

    let service = RegistryService::open(&paths(&temp)).unwrap();
    assert_eq!(service.len(), 2);

    let db1 = service.find("db1").unwrap();
    assert_eq!(db1.port, 2222);
    assert_eq!(db1.group.as_deref(), Some("infra/db"));
    assert_eq!(db1.password.as_ref().unwrap().expose_secret(), "s3cr3t");

    let web = service.find("web").unwrap();
    assert_eq!(web.key_path.as_deref(), Some("~/.ssh/id"));
    assert!(web.password.is_none());
}

#[test]
fn registry_file_is_encrypted() {
    let temp = TempDir::new().unwrap();
    let mut service = RegistryService::open(&paths(&temp)).unwrap();
    service
        .add_or_replace(ConnectionProfile::new("db1", "10.0.0.5", "admin").with_password("s3cr3t"))
        .unwrap();

    let raw = std::fs::read(temp.path().join("config.json")).unwrap();
    assert!(raw.starts_with(ENCRYPTED_MAGIC));
    let text = String::from_utf8_lossy(&raw);
    assert!(!text.contains("s3cr3t"));
    assert!(!text.contains("10.0.0.5"));
}

#[test]
fn replacing_the_key_makes_startup_fail() {
    let temp = TempDir::new().unwrap();
    {
        let mut service = RegistryService::open(&paths(&temp)).unwrap();
        service
            .add_or_replace(ConnectionProfile::new("web", "example.com", "deploy"))
            .unwrap();
    }

    std::fs::remove_file(temp.path().join(".key")).unwrap();
    let err = RegistryService::open(&paths(&temp)).unwrap_err();
    assert!(matches!(
        err,
        SshManagerError::Store(StoreError::Decryption(_))
    ));

    // The unreadable registry must not have been overwritten.
    let raw = std::fs::read(temp.path().join("config.json")).unwrap();
    assert!(raw.starts_with(ENCRYPTED_MAGIC));
}

#[test]
fn corrupt_key_file_is_a_key_error() {
    let temp = TempDir::new().unwrap();
    std::fs::write(temp.path().join(".key"), "not a key\n").unwrap();

    let err = RegistryService::open(&paths(&temp)).unwrap_err();
    assert!(matches!(err, SshManagerError::Key(KeyError::Invalid { .. })));
}

#[test]
fn foreign_key_store_reads_same_registry() {
    let temp = TempDir::new().unwrap();
    {
        let mut service = RegistryService::open(&paths(&temp)).unwrap();
        service
            .add_or_replace(ConnectionProfile::new("web", "example.com", "deploy"))
            .unwrap();
    }

    let key = KeyStore::new(temp.path().join(".key"))
        .get_or_create_key()
        .unwrap();
    let store = RegistryStore::new(temp.path().join("config.json"), key);
    let profiles = store.load().unwrap();
    assert_eq!(profiles.len(), 1);
    assert_eq!(profiles[0].name, "web");
}

#[test]
fn failed_save_keeps_previous_registry_on_disk() {
    let temp = TempDir::new().unwrap();
    let mut service = RegistryService::open(&paths(&temp)).unwrap();
    service
        .add_or_replace(ConnectionProfile::new("keep", "h", "u"))
        .unwrap();

    std::fs::create_dir(temp.path().join("config.json.tmp")).unwrap();
    assert!(service.remove("keep").is_err());
    assert!(service.find("keep").is_some());

    std::fs::remove_dir(temp.path().join("config.json.tmp")).unwrap();
    let reopened = RegistryService::open(&paths(&temp)).unwrap();
    assert!(reopened.find("keep").is_some());
}

#[test]
fn group_tree_prunes_after_removal() {
    let temp = TempDir::new().unwrap();
    let mut service = RegistryService::open(&paths(&temp)).unwrap();
    service
        .add_or_replace(ConnectionProfile::new("ab", "h", "u").with_group("a/b"))
        .unwrap();
    service
        .add_or_replace(ConnectionProfile::new("ac", "h", "u").with_group("a/c"))
        .unwrap();

    service.remove("ab").unwrap();
    assert!(!service.group_exists("a/b"));
    assert!(service.group_exists("a"));

    service.remove("ac").unwrap();
    assert!(!service.group_exists("a"));
    assert!(service.groups().is_empty());
}
