//! Cryptographically secure random generation.
//!
//! All randomness comes from the operating system CSPRNG. There is no
//! retry policy: if the entropy source fails, the process aborts, since a
//! broken randomness source invalidates every downstream guarantee.

use rand::{rngs::OsRng, RngCore};
use zeroize::Zeroizing;

use crate::keys::{KEY_LENGTH, NONCE_LENGTH};

/// Generate `len` cryptographically secure random bytes.
pub fn random_bytes(len: usize) -> Vec<u8> {
    let mut bytes = vec![0u8; len];
    OsRng.fill_bytes(&mut bytes);
    bytes
}

/// Generate a random 256-bit key.
///
/// The key is wrapped in `Zeroizing` so it is cleared from memory when
/// dropped.
pub fn random_key() -> Zeroizing<[u8; KEY_LENGTH]> {
    let mut key = Zeroizing::new([0u8; KEY_LENGTH]);
    OsRng.fill_bytes(&mut *key);
    key
}

/// Generate a random nonce of the required length.
///
/// A fresh random nonce is safe for XChaCha20-Poly1305: the 24-byte nonce
/// space makes collisions negligible. The caller must still use each nonce
/// for at most one message under a given key.
pub fn random_nonce() -> [u8; NONCE_LENGTH] {
    let mut nonce = [0u8; NONCE_LENGTH];
    OsRng.fill_bytes(&mut nonce);
    nonce
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_random_bytes_length() {
        for len in [0, 1, 16, 24, 32, 64, 1024] {
            assert_eq!(random_bytes(len).len(), len);
        }
    }

    #[test]
    fn test_random_key_unique() {
        let key1 = random_key();
        let key2 = random_key();
        assert_ne!(*key1, *key2);
    }

    #[test]
    fn test_random_nonce_length_and_uniqueness() {
        let mut seen = HashSet::new();
        for _ in 0..100 {
            let nonce = random_nonce();
            assert_eq!(nonce.len(), NONCE_LENGTH);
            assert!(seen.insert(nonce.to_vec()), "duplicate nonce generated");
        }
    }
}
