//! Detached Ed25519 signatures.
//!
//! Signatures are fixed-length blobs stored separately from the message.
//! A well-formed but wrong signature is an expected verification outcome
//! (`Ok(false)`); only malformed inputs of the wrong shape are errors.

use ed25519_dalek::{
    Signature, Signer, SigningKey, Verifier, VerifyingKey, PUBLIC_KEY_LENGTH, SECRET_KEY_LENGTH,
};
use rand::rngs::OsRng;
use std::fmt;

use cloakbox_common::{Error, Result};

/// Length of a detached signature in bytes.
pub const SIGNATURE_LENGTH: usize = 64;

/// Combined length of a signing key pair blob: secret key followed by
/// public key.
pub const KEYPAIR_LENGTH: usize = SECRET_KEY_LENGTH + PUBLIC_KEY_LENGTH;

/// An Ed25519 signing key pair.
///
/// The serialized blob is secret key first, then public key; decompose it
/// only through [`secret_key`](Self::secret_key) and
/// [`public_key`](Self::public_key).
pub struct SignKeyPair {
    signing: SigningKey,
}

impl SignKeyPair {
    /// Generate a fresh signing key pair.
    pub fn generate() -> Self {
        Self {
            signing: SigningKey::generate(&mut OsRng),
        }
    }

    /// Parse a key pair from its serialized blob.
    ///
    /// # Errors
    /// - Returns `InvalidKeyLength` if the blob is not KEYPAIR_LENGTH bytes
    /// - Returns `Crypto` if the halves are inconsistent
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let blob: [u8; KEYPAIR_LENGTH] =
            bytes.try_into().map_err(|_| Error::InvalidKeyLength {
                expected: KEYPAIR_LENGTH,
                got: bytes.len(),
            })?;
        let signing = SigningKey::from_keypair_bytes(&blob)
            .map_err(|_| Error::Crypto("inconsistent signing key pair".to_string()))?;
        Ok(Self { signing })
    }

    /// Serialize the key pair: secret key followed by public key.
    ///
    /// # Security
    /// The output contains the secret key. Zeroize it after use.
    pub fn to_bytes(&self) -> [u8; KEYPAIR_LENGTH] {
        self.signing.to_keypair_bytes()
    }

    /// The secret half of the pair.
    pub fn secret_key(&self) -> [u8; SECRET_KEY_LENGTH] {
        self.signing.to_bytes()
    }

    /// The public half of the pair.
    pub fn public_key(&self) -> [u8; PUBLIC_KEY_LENGTH] {
        self.signing.verifying_key().to_bytes()
    }
}

impl fmt::Debug for SignKeyPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "SignKeyPair(public: {})",
            crate::encoding::bin2hex(&self.public_key())
        )
    }
}

/// Produce a detached signature over `message` with `secret_key`.
///
/// # Errors
/// - Returns `InvalidKeyLength` if `secret_key` is not SECRET_KEY_LENGTH
///   bytes
pub fn signature(message: &[u8], secret_key: &[u8]) -> Result<[u8; SIGNATURE_LENGTH]> {
    let secret: [u8; SECRET_KEY_LENGTH] =
        secret_key.try_into().map_err(|_| Error::InvalidKeyLength {
            expected: SECRET_KEY_LENGTH,
            got: secret_key.len(),
        })?;
    let signing = SigningKey::from_bytes(&secret);
    Ok(signing.sign(message).to_bytes())
}

/// Verify a detached signature over `message` against `public_key`.
///
/// Returns `Ok(false)` for a well-formed signature that does not match.
///
/// # Errors
/// - Returns `InvalidSignatureLength` / `InvalidKeyLength` for
///   wrong-length inputs
/// - Returns `Crypto` if `public_key` is not a valid curve point
pub fn verify(message: &[u8], signature: &[u8], public_key: &[u8]) -> Result<bool> {
    let signature: [u8; SIGNATURE_LENGTH] =
        signature
            .try_into()
            .map_err(|_| Error::InvalidSignatureLength {
                expected: SIGNATURE_LENGTH,
                got: signature.len(),
            })?;
    let public: [u8; PUBLIC_KEY_LENGTH] =
        public_key.try_into().map_err(|_| Error::InvalidKeyLength {
            expected: PUBLIC_KEY_LENGTH,
            got: public_key.len(),
        })?;
    let verifying = VerifyingKey::from_bytes(&public)
        .map_err(|_| Error::Crypto("invalid public key".to_string()))?;

    Ok(verifying
        .verify(message, &Signature::from_bytes(&signature))
        .is_ok())
}
