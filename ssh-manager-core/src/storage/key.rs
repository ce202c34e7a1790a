//! Symmetric key lifecycle
//!
//! The key is generated once, written hex-encoded to its own file, and read
//! back on every start. Losing the file makes the registry unrecoverable;
//! there is no rotation.

use std::fmt;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use ring::rand::{SecureRandom, SystemRandom};
use zeroize::Zeroizing;

use crate::error::{KeyError, KeyResult};

/// Key length in bytes (AES-256)
pub const KEY_LEN: usize = 32;

/// Registry encryption key, wiped from memory on drop
#[derive(Clone, PartialEq, Eq)]
pub struct EncryptionKey(Zeroizing<[u8; KEY_LEN]>);

impl EncryptionKey {
    /// Wraps raw key bytes
    #[must_use]
    pub fn from_bytes(bytes: [u8; KEY_LEN]) -> Self {
        Self(Zeroizing::new(bytes))
    }

    /// Generates a fresh random key
    ///
    /// # Errors
    ///
    /// Returns [`KeyError::Generate`] if the system RNG fails.
    pub fn generate() -> KeyResult<Self> {
        let mut bytes = Zeroizing::new([0u8; KEY_LEN]);
        SystemRandom::new()
            .fill(&mut bytes[..])
            .map_err(|_| KeyError::Generate)?;
        Ok(Self(bytes))
    }

    /// Raw key bytes
    pub fn as_bytes(&self) -> &[u8; KEY_LEN] {
        &self.0
    }

    fn to_hex(&self) -> Zeroizing<String> {
        Zeroizing::new(hex::encode(&self.0[..]))
    }
}

impl fmt::Debug for EncryptionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("EncryptionKey([REDACTED])")
    }
}

/// Reads or lazily creates the key file
#[derive(Debug, Clone)]
pub struct KeyStore {
    path: PathBuf,
}

impl KeyStore {
    /// Creates a key store backed by `path`
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Location of the key file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Returns the stored key, generating and persisting one on first use
    ///
    /// # Errors
    ///
    /// Returns a [`KeyError`] if the file cannot be read or written, or holds
    /// something other than a hex-encoded 32-byte key.
    pub fn get_or_create_key(&self) -> KeyResult<EncryptionKey> {
        match fs::read_to_string(&self.path) {
            Ok(content) => self.decode(&Zeroizing::new(content)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => self.create(),
            Err(source) => Err(KeyError::Read {
                path: self.path.clone(),
                source,
            }),
        }
    }

    fn decode(&self, content: &str) -> KeyResult<EncryptionKey> {
        let invalid = |reason: String| KeyError::Invalid {
            path: self.path.clone(),
            reason,
        };
        let bytes = Zeroizing::new(hex::decode(content.trim()).map_err(|e| invalid(e.to_string()))?);
        let array: [u8; KEY_LEN] = bytes.as_slice().try_into().map_err(|_| {
            invalid(format!("expected {KEY_LEN} bytes, found {}", bytes.len()))
        })?;
        tracing::debug!(path = %self.path.display(), "Loaded encryption key");
        Ok(EncryptionKey::from_bytes(array))
    }

    fn create(&self) -> KeyResult<EncryptionKey> {
        let key = EncryptionKey::generate()?;
        let write_err = |source| KeyError::Write {
            path: self.path.clone(),
            source,
        };

        if let Some(parent) = self.path.parent() {
            super::ensure_private_dir(parent).map_err(write_err)?;
        }
        let mut file = super::open_private(&self.path, true).map_err(write_err)?;
        let encoded = key.to_hex();
        file.write_all(encoded.as_bytes())
            .and_then(|()| file.write_all(b"\n"))
            .and_then(|()| file.sync_all())
            .map_err(write_err)?;

        tracing::info!(path = %self.path.display(), "Generated new encryption key");
        Ok(key)
    }
}
