//! Anonymous sealed encryption to a public key.
//!
//! A sealed message can only be opened by the holder of the matching
//! secret key and carries no sender identity: a fresh ephemeral key pair
//! is generated per message and its secret half is discarded after use.
//!
//! Wire shape: ephemeral public key followed by the authenticated
//! ciphertext. The nonce is derived from the two public keys, so it never
//! travels on the wire and is unique per ephemeral key.

use blake2::digest::consts::U24;
use blake2::{Blake2b, Digest};
use chacha20poly1305::{
    aead::{generic_array::GenericArray, Aead, KeyInit},
    XChaCha20Poly1305,
};
use rand::rngs::OsRng;
use x25519_dalek::{PublicKey as X25519PublicKey, StaticSecret};

use cloakbox_common::{Error, Result};

use crate::boxes::session_key;
use crate::keys::{BoxKeyPair, PublicKey, KEY_LENGTH, NONCE_LENGTH, TAG_LENGTH};

/// Bytes a sealed ciphertext adds on top of the plaintext length:
/// ephemeral public key plus authentication tag.
pub const OVERHEAD: usize = KEY_LENGTH + TAG_LENGTH;

/// Derive the sealing nonce from the ephemeral and receiver public keys.
fn seal_nonce(
    ephemeral: &[u8; KEY_LENGTH],
    receiver: &[u8; KEY_LENGTH],
) -> [u8; NONCE_LENGTH] {
    let mut hasher = Blake2b::<U24>::new();
    hasher.update(ephemeral);
    hasher.update(receiver);

    let mut nonce = [0u8; NONCE_LENGTH];
    nonce.copy_from_slice(&hasher.finalize());
    nonce
}

/// Seal `message` to the holder of `public_key`.
///
/// # Errors
/// - Returns `InvalidKeyLength` if `public_key` is not KEY_LENGTH bytes
/// - Returns `Crypto` if the provider rejects the operation
pub fn encrypt(message: &[u8], public_key: &[u8]) -> Result<Vec<u8>> {
    let receiver = PublicKey::from_slice(public_key)?;

    let ephemeral_secret = StaticSecret::random_from_rng(OsRng);
    let ephemeral_public = X25519PublicKey::from(&ephemeral_secret).to_bytes();

    let nonce = seal_nonce(&ephemeral_public, receiver.as_bytes());
    let key = session_key(&ephemeral_secret.to_bytes(), receiver.as_bytes());

    let cipher = XChaCha20Poly1305::new(GenericArray::from_slice(&*key));
    let ciphertext = cipher
        .encrypt(GenericArray::from_slice(&nonce), message)
        .map_err(|_| Error::Crypto("sealed box encryption failed".to_string()))?;

    let mut sealed = Vec::with_capacity(KEY_LENGTH + ciphertext.len());
    sealed.extend_from_slice(&ephemeral_public);
    sealed.extend_from_slice(&ciphertext);
    Ok(sealed)
}

/// Open a sealed ciphertext with the receiver's key pair.
///
/// Returns `None` for anything that does not authenticate: a tampered
/// ciphertext, the wrong key pair, or input shorter than [`OVERHEAD`].
/// All of these are attacker-controlled conditions, not caller errors.
pub fn decrypt(ciphertext: &[u8], keypair: &BoxKeyPair) -> Option<Vec<u8>> {
    if ciphertext.len() < OVERHEAD {
        return None;
    }
    let (ephemeral_public, sealed) = ciphertext.split_at(KEY_LENGTH);
    let ephemeral_public: [u8; KEY_LENGTH] = ephemeral_public.try_into().ok()?;

    let nonce = seal_nonce(&ephemeral_public, keypair.public_key().as_bytes());
    let key = session_key(keypair.secret_key().as_bytes(), &ephemeral_public);

    let cipher = XChaCha20Poly1305::new(GenericArray::from_slice(&*key));
    cipher
        .decrypt(GenericArray::from_slice(&nonce), sealed)
        .ok()
}

/// Generate a fresh key pair for receiving sealed messages.
pub fn generate_keypair() -> BoxKeyPair {
    BoxKeyPair::generate()
}
