//! Property-based tests for tamper detection
//!
//! Any single-byte change to an encrypted registry must be rejected as a
//! decryption failure, never surfaced as different data.

use proptest::prelude::*;
use ssh_manager_core::error::StoreError;
use ssh_manager_core::models::ConnectionProfile;
use ssh_manager_core::storage::{EncryptionKey, KEY_LEN, decrypt, encrypt};

fn sample_plaintext() -> Vec<u8> {
    let profiles = vec![
        ConnectionProfile::new("db1", "10.0.0.5", "admin")
            .with_port(2222)
            .with_password("s3cr3t")
            .with_group("infra/db"),
        ConnectionProfile::new("web", "example.com", "deploy"),
    ];
    serde_json::to_vec(&profiles).unwrap()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// Flipping bits in any byte makes decryption fail
    #[test]
    fn flipped_byte_is_detected(position in any::<prop::sample::Index>(), mask in 1u8..=255u8) {
        let key = EncryptionKey::from_bytes([3u8; KEY_LEN]);
        let mut blob = encrypt(&key, &sample_plaintext()).unwrap();

        let idx = position.index(blob.len());
        blob[idx] ^= mask;

        let result = decrypt(&key, &blob);
        prop_assert!(matches!(result, Err(StoreError::Decryption(_))));
    }

    /// Truncating the blob at any point makes decryption fail
    #[test]
    fn truncated_blob_is_detected(position in any::<prop::sample::Index>()) {
        let key = EncryptionKey::from_bytes([3u8; KEY_LEN]);
        let blob = encrypt(&key, &sample_plaintext()).unwrap();

        let cut = position.index(blob.len());
        let result = decrypt(&key, &blob[..cut]);
        prop_assert!(matches!(result, Err(StoreError::Decryption(_))));
    }

    /// A different key never decrypts
    #[test]
    fn wrong_key_is_detected(
        a in prop::array::uniform32(any::<u8>()),
        b in prop::array::uniform32(any::<u8>()),
    ) {
        prop_assume!(a != b);
        let blob = encrypt(&EncryptionKey::from_bytes(a), b"[]").unwrap();
        let result = decrypt(&EncryptionKey::from_bytes(b), &blob);
        prop_assert!(matches!(result, Err(StoreError::Decryption(_))));
    }
}
