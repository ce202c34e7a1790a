//! Print the decrypted registry with secrets masked.

use ssh_manager_core::config::ConfigPaths;
use ssh_manager_core::error::SshManagerError;
use ssh_manager_core::models::ConnectionProfile;
use ssh_manager_core::{KeyStore, RegistryService, RegistryStore};

use crate::error::CliError;

/// Show-config command handler
///
/// The key is loaded (or created) before anything else, so a broken key
/// file fails even when no registry exists yet.
pub fn cmd_show_config(paths: &ConfigPaths) -> Result<(), CliError> {
    let key = KeyStore::new(paths.key_file())
        .get_or_create_key()
        .map_err(SshManagerError::from)?;

    if !paths.registry_file().exists() {
        println!("No config file found.");
        return Ok(());
    }

    let service = RegistryService::load(RegistryStore::new(paths.registry_file(), key))
        .map_err(SshManagerError::from)?;
    if service.is_empty() {
        println!("No connections configured.");
    } else {
        println!("{}", format_profiles(service.list_all()));
    }
    Ok(())
}

/// One block per profile, blank line between blocks.
fn format_profiles(profiles: &[ConnectionProfile]) -> String {
    profiles
        .iter()
        .map(format_profile)
        .collect::<Vec<_>>()
        .join("\n\n")
}

fn format_profile(profile: &ConnectionProfile) -> String {
    let mut lines = vec![
        format!("Name: {}", profile.name),
        format!("Host: {}", profile.host),
        format!("Port: {}", profile.port),
        format!("Username: {}", profile.username),
    ];
    if profile.has_password() {
        lines.push("Password: [encrypted]".to_string());
    }
    if let Some(ref key_path) = profile.key_path {
        lines.push(format!("Key Path: {key_path}"));
    }
    if let Some(ref group) = profile.group {
        lines.push(format!("Group: {group}"));
    }
    lines.join("\n")
}
