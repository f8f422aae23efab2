//! Generic keyed hashing for message authentication.
//!
//! Despite the signature/verify naming (kept from the source domain),
//! this is a symmetric MAC built on keyed BLAKE2b, not an asymmetric
//! signature scheme: anyone holding the key can produce valid
//! "signatures".

use blake2::digest::Mac;
use blake2::Blake2bMac512;
use subtle::ConstantTimeEq;
use zeroize::Zeroizing;

use cloakbox_common::{Error, Result};

use crate::encoding;
use crate::keys::KEY_LENGTH;
use crate::random;

/// Minimum accepted key length in bytes.
pub const KEY_LENGTH_MIN: usize = 16;

/// Maximum accepted key length in bytes.
pub const KEY_LENGTH_MAX: usize = 64;

/// Minimum hash output length in bytes.
pub const HASH_LENGTH_MIN: usize = 16;

/// Maximum hash output length in bytes.
pub const HASH_LENGTH_MAX: usize = 64;

/// Default hash output length in bytes.
pub const HASH_LENGTH: usize = 32;

/// Keyed hash with a bounded key and configurable output length.
///
/// Stateless across calls beyond the key and the default output length
/// fixed at construction.
#[derive(Debug)]
pub struct GenericHash {
    key: Zeroizing<Vec<u8>>,
    hash_length: usize,
}

impl GenericHash {
    /// Create a keyed hasher.
    ///
    /// # Errors
    /// - Returns `KeyLengthOutOfRange` unless the key length is within
    ///   `[KEY_LENGTH_MIN, KEY_LENGTH_MAX]` (inclusive)
    /// - Returns `HashLengthOutOfRange` unless `hash_length` is within
    ///   `[HASH_LENGTH_MIN, HASH_LENGTH_MAX]` (inclusive); `None` selects
    ///   the default of HASH_LENGTH bytes
    pub fn new(key: &[u8], hash_length: Option<usize>) -> Result<Self> {
        validate_key(key)?;
        let hash_length = hash_length.unwrap_or(HASH_LENGTH);
        validate_hash_length(hash_length)?;
        Ok(Self {
            key: Zeroizing::new(key.to_vec()),
            hash_length,
        })
    }

    /// Compute the keyed hash of `message`.
    ///
    /// A per-call `length` override is re-validated against the same
    /// inclusive bounds; an out-of-range request is always rejected, never
    /// truncated.
    ///
    /// # Errors
    /// - Returns `HashLengthOutOfRange` for an out-of-range override
    pub fn hash(&self, message: &[u8], length: Option<usize>) -> Result<Vec<u8>> {
        let length = match length {
            Some(length) => {
                validate_hash_length(length)?;
                length
            }
            None => self.hash_length,
        };

        let mut mac = Blake2bMac512::new_from_slice(&self.key)
            .map_err(|_| Error::Crypto("keyed hash initialization failed".to_string()))?;
        mac.update(message);
        let digest = mac.finalize().into_bytes();
        Ok(digest[..length].to_vec())
    }

    /// Compute the keyed hash of `message` and encode it as unpadded
    /// base64.
    ///
    /// This is a MAC usable as a transportable message signature by
    /// parties sharing the key.
    pub fn signature(&self, message: &[u8], length: Option<usize>) -> Result<String> {
        Ok(encoding::bin2base64_nopad(&self.hash(message, length)?))
    }

    /// Verify a base64 signature produced by [`signature`](Self::signature)
    /// with identical parameters.
    ///
    /// Comparison is constant-time. A mismatch is `Ok(false)`; only
    /// malformed base64 input or an out-of-range length is an error.
    pub fn verify(&self, message: &[u8], signature: &str, length: Option<usize>) -> Result<bool> {
        let expected = self.hash(message, length)?;
        let given = encoding::base642bin_nopad(signature)?;
        Ok(expected.ct_eq(&given).into())
    }

    /// Generate a random key of the default length.
    pub fn make_key() -> Zeroizing<[u8; KEY_LENGTH]> {
        random::random_key()
    }
}

fn validate_key(key: &[u8]) -> Result<()> {
    if key.len() < KEY_LENGTH_MIN || key.len() > KEY_LENGTH_MAX {
        return Err(Error::KeyLengthOutOfRange {
            min: KEY_LENGTH_MIN,
            max: KEY_LENGTH_MAX,
            got: key.len(),
        });
    }
    Ok(())
}

fn validate_hash_length(length: usize) -> Result<()> {
    if length < HASH_LENGTH_MIN || length > HASH_LENGTH_MAX {
        return Err(Error::HashLengthOutOfRange {
            min: HASH_LENGTH_MIN,
            max: HASH_LENGTH_MAX,
            got: length,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hasher() -> GenericHash {
        GenericHash::new(&*GenericHash::make_key(), None).unwrap()
    }

    #[test]
    fn test_key_length_bounds() {
        // Inclusive bounds: 16 and 64 succeed, 15 and 65 fail
        assert!(GenericHash::new(&[0u8; 15], None).is_err());
        assert!(GenericHash::new(&[0u8; 16], None).is_ok());
        assert!(GenericHash::new(&[0u8; 64], None).is_ok());
        assert!(GenericHash::new(&[0u8; 65], None).is_err());

        assert_eq!(
            GenericHash::new(&[0u8; 15], None).unwrap_err(),
            Error::KeyLengthOutOfRange {
                min: KEY_LENGTH_MIN,
                max: KEY_LENGTH_MAX,
                got: 15
            }
        );
    }

    #[test]
    fn test_hash_length_bounds() {
        let key = [0u8; 32];
        assert!(GenericHash::new(&key, Some(15)).is_err());
        assert!(GenericHash::new(&key, Some(16)).is_ok());
        assert!(GenericHash::new(&key, Some(64)).is_ok());
        assert!(GenericHash::new(&key, Some(65)).is_err());
    }

    #[test]
    fn test_hash_default_length() {
        let hash = hasher().hash(b"message", None).unwrap();
        assert_eq!(hash.len(), HASH_LENGTH);
    }

    #[test]
    fn test_hash_length_override() {
        let hasher = hasher();

        assert_eq!(hasher.hash(b"m", Some(16)).unwrap().len(), 16);
        assert_eq!(hasher.hash(b"m", Some(64)).unwrap().len(), 64);
        assert!(hasher.hash(b"m", Some(65)).is_err());
        assert!(hasher.hash(b"m", Some(0)).is_err());
    }

    #[test]
    fn test_hash_deterministic_per_key() {
        let key = [9u8; 32];
        let h1 = GenericHash::new(&key, None).unwrap();
        let h2 = GenericHash::new(&key, None).unwrap();

        assert_eq!(h1.hash(b"m", None).unwrap(), h2.hash(b"m", None).unwrap());

        let other = GenericHash::new(&[10u8; 32], None).unwrap();
        assert_ne!(
            h1.hash(b"m", None).unwrap(),
            other.hash(b"m", None).unwrap()
        );
    }

    #[test]
    fn test_signature_verify_roundtrip() {
        let hasher = hasher();
        let message = b"authenticated message";

        let signature = hasher.signature(message, None).unwrap();
        assert!(hasher.verify(message, &signature, None).unwrap());
    }

    #[test]
    fn test_verify_rejects_modified_message() {
        let hasher = hasher();

        let signature = hasher.signature(b"message", None).unwrap();
        assert!(!hasher.verify(b"message!", &signature, None).unwrap());
    }

    #[test]
    fn test_verify_rejects_wrong_length_signature() {
        let hasher = hasher();

        let signature = hasher.signature(b"message", Some(16)).unwrap();
        assert!(!hasher.verify(b"message", &signature, Some(32)).unwrap());
    }

    #[test]
    fn test_verify_malformed_base64_is_error() {
        let result = hasher().verify(b"message", "not *** base64", None);
        assert!(matches!(result.unwrap_err(), Error::Decode(_)));
    }

    #[test]
    fn test_signature_is_unpadded_base64() {
        let signature = hasher().signature(b"message", None).unwrap();
        assert!(!signature.contains('='));
    }
}
