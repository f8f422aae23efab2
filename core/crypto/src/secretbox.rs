//! Symmetric authenticated encryption using XChaCha20-Poly1305.
//!
//! A [`SecretBox`] binds one shared key and one nonce at construction;
//! the pair is the unit of a single-nonce session. Encrypting two
//! different messages through the same instance reuses the nonce, which
//! breaks confidentiality and authenticity. Rotate nonces by constructing
//! a new instance per message.

use chacha20poly1305::{
    aead::{generic_array::GenericArray, Aead, KeyInit},
    XChaCha20Poly1305,
};
use zeroize::Zeroizing;

use cloakbox_common::{Error, Result};

use crate::keys::{KEY_LENGTH, NONCE_LENGTH};
use crate::random;

/// Symmetric authenticated encryption under one (key, nonce) pair.
///
/// Immutable after construction.
#[derive(Debug)]
pub struct SecretBox {
    key: Zeroizing<[u8; KEY_LENGTH]>,
    nonce: [u8; NONCE_LENGTH],
}

impl SecretBox {
    /// Create a secret box bound to `key` and `nonce`.
    ///
    /// # Errors
    /// - Returns `InvalidKeyLength` if `key` is not exactly KEY_LENGTH bytes
    /// - Returns `InvalidNonceLength` if `nonce` is not exactly
    ///   NONCE_LENGTH bytes
    pub fn new(key: &[u8], nonce: &[u8]) -> Result<Self> {
        let key: [u8; KEY_LENGTH] =
            key.try_into().map_err(|_| Error::InvalidKeyLength {
                expected: KEY_LENGTH,
                got: key.len(),
            })?;
        let nonce: [u8; NONCE_LENGTH] =
            nonce.try_into().map_err(|_| Error::InvalidNonceLength {
                expected: NONCE_LENGTH,
                got: nonce.len(),
            })?;
        Ok(Self {
            key: Zeroizing::new(key),
            nonce,
        })
    }

    /// Encrypt `message` under the bound key and nonce.
    ///
    /// Returns ciphertext followed by the authentication tag. The nonce is
    /// not included in the output; the caller already owns it.
    ///
    /// # Errors
    /// - Returns `Crypto` if the provider rejects the operation
    pub fn encrypt(&self, message: &[u8]) -> Result<Vec<u8>> {
        let cipher = XChaCha20Poly1305::new(GenericArray::from_slice(&*self.key));
        cipher
            .encrypt(GenericArray::from_slice(&self.nonce), message)
            .map_err(|_| Error::Crypto("secretbox encryption failed".to_string()))
    }

    /// Decrypt and authenticate `ciphertext` under the bound key and nonce.
    ///
    /// Returns `None` when authentication fails: a forged, tampered or
    /// truncated ciphertext is an expected outcome, not an error.
    pub fn decrypt(&self, ciphertext: &[u8]) -> Option<Vec<u8>> {
        let cipher = XChaCha20Poly1305::new(GenericArray::from_slice(&*self.key));
        cipher
            .decrypt(GenericArray::from_slice(&self.nonce), ciphertext)
            .ok()
    }

    /// Generate a random key of the required length.
    pub fn random_key() -> Zeroizing<[u8; KEY_LENGTH]> {
        random::random_key()
    }

    /// Generate a random nonce of the required length.
    pub fn random_nonce() -> [u8; NONCE_LENGTH] {
        random::random_nonce()
    }
}
