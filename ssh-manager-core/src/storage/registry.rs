//! Encrypted registry file
//!
//! The whole profile list is serialized to JSON, sealed with AES-256-GCM and
//! written in one piece. Layout: magic + nonce + ciphertext (tag appended).
//! The magic header is also bound as associated data.

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use ring::aead::{AES_256_GCM, Aad, LessSafeKey, NONCE_LEN, Nonce, UnboundKey};
use ring::rand::{SecureRandom, SystemRandom};
use zeroize::Zeroizing;

use super::EncryptionKey;
use crate::error::{StoreError, StoreResult};
use crate::models::ConnectionProfile;
use crate::tracing::span_names;

/// Magic bytes identifying an encrypted registry
pub const ENCRYPTED_MAGIC: &[u8] = b"SSHM_ENC";

fn sealing_key(key: &EncryptionKey) -> StoreResult<LessSafeKey> {
    let unbound = UnboundKey::new(&AES_256_GCM, key.as_bytes())
        .map_err(|_| StoreError::Serialize("Failed to create cipher key".to_string()))?;
    Ok(LessSafeKey::new(unbound))
}

/// Encrypts `plaintext` under `key` with a fresh random nonce
///
/// # Errors
///
/// Returns [`StoreError::Serialize`] if the RNG or cipher fails.
pub fn encrypt(key: &EncryptionKey, plaintext: &[u8]) -> StoreResult<Vec<u8>> {
    let mut nonce_bytes = [0u8; NONCE_LEN];
    SystemRandom::new()
        .fill(&mut nonce_bytes)
        .map_err(|_| StoreError::Serialize("Failed to generate nonce".to_string()))?;

    let mut ciphertext = plaintext.to_vec();
    sealing_key(key)?
        .seal_in_place_append_tag(
            Nonce::assume_unique_for_key(nonce_bytes),
            Aad::from(ENCRYPTED_MAGIC),
            &mut ciphertext,
        )
        .map_err(|_| StoreError::Serialize("Encryption failed".to_string()))?;

    let mut output = Vec::with_capacity(ENCRYPTED_MAGIC.len() + NONCE_LEN + ciphertext.len());
    output.extend_from_slice(ENCRYPTED_MAGIC);
    output.extend_from_slice(&nonce_bytes);
    output.extend_from_slice(&ciphertext);
    Ok(output)
}

/// Decrypts a blob produced by [`encrypt`]
///
/// Any structural problem with the blob is reported as a decryption failure:
/// a wrong magic header or a truncated file is indistinguishable from
/// tampering.
///
/// # Errors
///
/// Returns [`StoreError::Decryption`] on authentication failure.
pub fn decrypt(key: &EncryptionKey, blob: &[u8]) -> StoreResult<Vec<u8>> {
    let header_len = ENCRYPTED_MAGIC.len();
    if !blob.starts_with(ENCRYPTED_MAGIC) {
        return Err(StoreError::Decryption(
            "missing registry header".to_string(),
        ));
    }
    if blob.len() < header_len + NONCE_LEN + AES_256_GCM.tag_len() {
        return Err(StoreError::Decryption("registry is truncated".to_string()));
    }

    let mut nonce_bytes = [0u8; NONCE_LEN];
    nonce_bytes.copy_from_slice(&blob[header_len..header_len + NONCE_LEN]);
    let mut buffer = blob[header_len + NONCE_LEN..].to_vec();

    let plaintext_len = sealing_key(key)
        .map_err(|e| StoreError::Decryption(e.to_string()))?
        .open_in_place(
            Nonce::assume_unique_for_key(nonce_bytes),
            Aad::from(ENCRYPTED_MAGIC),
            &mut buffer,
        )
        .map_err(|_| {
            StoreError::Decryption("authentication failed (wrong key or corrupted data)".to_string())
        })?
        .len();
    buffer.truncate(plaintext_len);
    Ok(buffer)
}

/// Loads and saves the profile list as a single encrypted file
#[derive(Debug, Clone)]
pub struct RegistryStore {
    path: PathBuf,
    key: EncryptionKey,
}

impl RegistryStore {
    /// Creates a store for `path` sealed with `key`
    pub fn new(path: impl Into<PathBuf>, key: EncryptionKey) -> Self {
        Self {
            path: path.into(),
            key,
        }
    }

    /// Location of the registry file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads, decrypts and parses the registry
    ///
    /// A missing file is a first run and yields an empty list.
    ///
    /// # Errors
    ///
    /// - [`StoreError::Read`] if the file exists but cannot be read
    /// - [`StoreError::Decryption`] if authentication fails
    /// - [`StoreError::Format`] if the plaintext is not a profile list
    pub fn load(&self) -> StoreResult<Vec<ConnectionProfile>> {
        let _span = tracing::debug_span!(span_names::CONFIG_LOAD, path = %self.path.display())
            .entered();

        let blob = match fs::read(&self.path) {
            Ok(blob) => blob,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                tracing::info!("No registry file yet, starting empty");
                return Ok(Vec::new());
            }
            Err(e) => return Err(StoreError::Read(e.to_string())),
        };

        let plaintext = Zeroizing::new(decrypt(&self.key, &blob)?);
        let profiles: Vec<ConnectionProfile> = serde_json::from_slice(&plaintext)
            .map_err(|e| StoreError::Format(e.to_string()))?;

        tracing::debug!(count = profiles.len(), "Registry loaded");
        Ok(profiles)
    }

    /// Serializes, encrypts and atomically replaces the registry file
    ///
    /// The blob is written to a sibling temporary file, synced, then renamed
    /// over the registry. On failure the temporary file is removed and the
    /// previous registry is untouched.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Serialize`] if encoding fails and
    /// [`StoreError::Persistence`] if writing fails.
    pub fn save(&self, profiles: &[ConnectionProfile]) -> StoreResult<()> {
        let _span = tracing::debug_span!(
            span_names::CONFIG_SAVE,
            path = %self.path.display(),
            count = profiles.len()
        )
        .entered();

        let plaintext = Zeroizing::new(
            serde_json::to_vec(profiles).map_err(|e| StoreError::Serialize(e.to_string()))?,
        );
        let blob = encrypt(&self.key, &plaintext)?;

        if let Some(parent) = self.path.parent() {
            super::ensure_private_dir(parent)
                .map_err(|e| StoreError::Persistence(e.to_string()))?;
        }

        let temp_path = self.temp_path();
        if let Err(e) = write_and_replace(&temp_path, &self.path, &blob) {
            let _ = fs::remove_file(&temp_path);
            tracing::error!(error = %e, "Failed to persist registry");
            return Err(StoreError::Persistence(e.to_string()));
        }

        tracing::debug!("Registry saved");
        Ok(())
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(std::ffi::OsStr::to_os_string)
            .unwrap_or_default();
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

fn write_and_replace(temp_path: &Path, path: &Path, data: &[u8]) -> io::Result<()> {
    let mut file = super::open_private(temp_path, false)?;
    file.write_all(data)?;
    file.sync_all()?;
    drop(file);
    fs::rename(temp_path, path)
}
