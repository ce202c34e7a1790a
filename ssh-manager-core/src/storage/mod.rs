//! Encrypted-at-rest persistence
//!
//! - [`KeyStore`] owns the symmetric key file
//! - [`RegistryStore`] encrypts and atomically writes the whole profile list

mod key;
mod registry;

use std::fs::{DirBuilder, File, OpenOptions};
use std::io;
use std::path::Path;

pub use key::{EncryptionKey, KEY_LEN, KeyStore};
pub use registry::{ENCRYPTED_MAGIC, RegistryStore, decrypt, encrypt};

/// Creates `dir` (and missing parents) as owner-only on Unix
///
/// An existing directory is left untouched, permissions included.
pub(crate) fn ensure_private_dir(dir: &Path) -> io::Result<()> {
    if dir.is_dir() {
        return Ok(());
    }
    let mut builder = DirBuilder::new();
    builder.recursive(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::DirBuilderExt;
        builder.mode(0o700);
    }
    builder.create(dir)
}

/// Opens `path` for writing with owner-only permissions on Unix
pub(crate) fn open_private(path: &Path, create_new: bool) -> io::Result<File> {
    let mut options = OpenOptions::new();
    options.write(true);
    if create_new {
        options.create_new(true);
    } else {
        options.create(true).truncate(true);
    }
    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(0o600);
    }
    options.open(path)
}
