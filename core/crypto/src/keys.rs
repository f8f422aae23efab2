//! Key material types with secure memory handling.
//!
//! Secret keys automatically zeroize their memory on drop to prevent
//! sensitive data from persisting after use. Public keys carry no
//! confidentiality requirement and behave like plain values.

use std::fmt;

use rand::rngs::OsRng;
use x25519_dalek::{PublicKey as X25519PublicKey, StaticSecret};
use zeroize::{Zeroize, ZeroizeOnDrop};

use cloakbox_common::{Error, Result};

/// Length of keys in bytes (256-bit).
pub const KEY_LENGTH: usize = 32;

/// Nonce length in bytes for box and secretbox encryption.
pub const NONCE_LENGTH: usize = 24;

/// Authentication tag length in bytes.
pub const TAG_LENGTH: usize = 16;

/// Combined length of a box key pair blob: secret key followed by
/// public key.
pub const KEYPAIR_LENGTH: usize = KEY_LENGTH * 2;

/// An X25519 secret key.
///
/// # Security
/// - Zeroized on drop
/// - Never printed: `Debug` output is redacted
/// - Must not be compared with non-constant-time equality
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct SecretKey {
    key: [u8; KEY_LENGTH],
}

impl SecretKey {
    /// Create a secret key from raw bytes.
    pub fn from_bytes(key: [u8; KEY_LENGTH]) -> Self {
        Self { key }
    }

    /// Create a secret key from a slice.
    ///
    /// # Errors
    /// - Returns `InvalidKeyLength` if the slice is not KEY_LENGTH bytes
    pub fn from_slice(bytes: &[u8]) -> Result<Self> {
        let key: [u8; KEY_LENGTH] =
            bytes.try_into().map_err(|_| Error::InvalidKeyLength {
                expected: KEY_LENGTH,
                got: bytes.len(),
            })?;
        Ok(Self { key })
    }

    /// Get the key bytes.
    ///
    /// # Security
    /// The returned slice should be used immediately and not stored.
    pub fn as_bytes(&self) -> &[u8; KEY_LENGTH] {
        &self.key
    }
}

impl fmt::Debug for SecretKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SecretKey([REDACTED])")
    }
}

/// An X25519 public key.
#[derive(Clone, PartialEq, Eq)]
pub struct PublicKey {
    key: [u8; KEY_LENGTH],
}

impl PublicKey {
    /// Create a public key from raw bytes.
    pub fn from_bytes(key: [u8; KEY_LENGTH]) -> Self {
        Self { key }
    }

    /// Create a public key from a slice.
    ///
    /// # Errors
    /// - Returns `InvalidKeyLength` if the slice is not KEY_LENGTH bytes
    pub fn from_slice(bytes: &[u8]) -> Result<Self> {
        let key: [u8; KEY_LENGTH] =
            bytes.try_into().map_err(|_| Error::InvalidKeyLength {
                expected: KEY_LENGTH,
                got: bytes.len(),
            })?;
        Ok(Self { key })
    }

    /// Get the key bytes.
    pub fn as_bytes(&self) -> &[u8; KEY_LENGTH] {
        &self.key
    }
}

impl fmt::Debug for PublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PublicKey({})", crate::encoding::bin2hex(&self.key))
    }
}

/// An X25519 key pair for box encryption.
///
/// The serialized form is an opaque blob of [`KEYPAIR_LENGTH`] bytes,
/// secret key first. Callers must decompose it only through
/// [`secret_key`](Self::secret_key) and [`public_key`](Self::public_key),
/// never by slicing the blob themselves.
pub struct BoxKeyPair {
    secret: SecretKey,
    public: PublicKey,
}

impl BoxKeyPair {
    /// Generate a fresh random key pair.
    pub fn generate() -> Self {
        let secret = StaticSecret::random_from_rng(OsRng);
        let public = X25519PublicKey::from(&secret);
        Self {
            secret: SecretKey::from_bytes(secret.to_bytes()),
            public: PublicKey::from_bytes(public.to_bytes()),
        }
    }

    /// Assemble a key pair from its two halves.
    ///
    /// The halves are not checked for consistency; supplying a public key
    /// that does not match the secret key produces a pair that cannot
    /// decrypt anything.
    pub fn from_parts(secret: SecretKey, public: PublicKey) -> Self {
        Self { secret, public }
    }

    /// Parse a key pair from its serialized blob.
    ///
    /// # Errors
    /// - Returns `InvalidKeyLength` if the blob is not KEYPAIR_LENGTH bytes
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        if bytes.len() != KEYPAIR_LENGTH {
            return Err(Error::InvalidKeyLength {
                expected: KEYPAIR_LENGTH,
                got: bytes.len(),
            });
        }
        let (secret, public) = bytes.split_at(KEY_LENGTH);
        Ok(Self {
            secret: SecretKey::from_slice(secret)?,
            public: PublicKey::from_slice(public)?,
        })
    }

    /// Serialize the key pair: secret key followed by public key.
    ///
    /// # Security
    /// The output contains the secret key. Zeroize it after use.
    pub fn to_bytes(&self) -> [u8; KEYPAIR_LENGTH] {
        let mut out = [0u8; KEYPAIR_LENGTH];
        out[..KEY_LENGTH].copy_from_slice(self.secret.as_bytes());
        out[KEY_LENGTH..].copy_from_slice(self.public.as_bytes());
        out
    }

    /// The secret half of the pair.
    pub fn secret_key(&self) -> &SecretKey {
        &self.secret
    }

    /// The public half of the pair.
    pub fn public_key(&self) -> &PublicKey {
        &self.public
    }
}

impl fmt::Debug for BoxKeyPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BoxKeyPair")
            .field("secret", &self.secret)
            .field("public", &self.public)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_unique() {
        let pair1 = BoxKeyPair::generate();
        let pair2 = BoxKeyPair::generate();

        assert_ne!(pair1.secret_key().as_bytes(), pair2.secret_key().as_bytes());
        assert_ne!(pair1.public_key().as_bytes(), pair2.public_key().as_bytes());
    }

    #[test]
    fn test_accessors_idempotent() {
        let pair = BoxKeyPair::generate();

        // Repeated extraction must always yield the same halves
        let secret1 = pair.secret_key().as_bytes().to_vec();
        let secret2 = pair.secret_key().as_bytes().to_vec();
        let public1 = pair.public_key().as_bytes().to_vec();
        let public2 = pair.public_key().as_bytes().to_vec();

        assert_eq!(secret1, secret2);
        assert_eq!(public1, public2);
    }

    #[test]
    fn test_blob_roundtrip() {
        let pair = BoxKeyPair::generate();
        let blob = pair.to_bytes();

        let restored = BoxKeyPair::from_bytes(&blob).unwrap();
        assert_eq!(restored.secret_key().as_bytes(), pair.secret_key().as_bytes());
        assert_eq!(restored.public_key().as_bytes(), pair.public_key().as_bytes());
    }

    #[test]
    fn test_blob_wrong_length() {
        let result = BoxKeyPair::from_bytes(&[0u8; 63]);
        assert_eq!(
            result.unwrap_err(),
            Error::InvalidKeyLength {
                expected: KEYPAIR_LENGTH,
                got: 63
            }
        );
    }

    #[test]
    fn test_secret_key_from_slice_wrong_length() {
        assert!(SecretKey::from_slice(&[0u8; 31]).is_err());
        assert!(SecretKey::from_slice(&[0u8; 33]).is_err());
        assert!(SecretKey::from_slice(&[0u8; 32]).is_ok());
    }

    #[test]
    fn test_secret_key_debug_redacted() {
        let key = SecretKey::from_bytes([7u8; KEY_LENGTH]);
        let output = format!("{:?}", key);

        assert!(output.contains("REDACTED"));
        assert!(!output.contains("7"));
    }
}
