//! Public-key authenticated encryption between two key pairs.
//!
//! A [`CryptoBox`] holds a sender secret key, a receiver public key and an
//! optional bound nonce. The session key is derived from an X25519 shared
//! secret on every call and never cached, so the combined secret exists in
//! memory only for the duration of one operation.

use blake2::digest::consts::U32;
use blake2::{Blake2b, Digest};
use chacha20poly1305::{
    aead::{generic_array::GenericArray, Aead, KeyInit},
    XChaCha20Poly1305,
};
use x25519_dalek::{PublicKey as X25519PublicKey, StaticSecret};
use zeroize::Zeroizing;

use cloakbox_common::{Error, Result};

use crate::keys::{BoxKeyPair, PublicKey, SecretKey, KEY_LENGTH, NONCE_LENGTH};
use crate::random;

/// Domain separator for box session key derivation.
const SESSION_CONTEXT: &[u8] = b"cloakbox-box-v1";

/// Derive the symmetric session key shared by both sides of a box.
///
/// Computes the X25519 shared secret and hashes it with a domain
/// separator. The Diffie-Hellman exchange is symmetric, so both peers
/// derive the same key from their own secret and the other's public key.
pub(crate) fn session_key(
    secret: &[u8; KEY_LENGTH],
    public: &[u8; KEY_LENGTH],
) -> Zeroizing<[u8; KEY_LENGTH]> {
    let secret = StaticSecret::from(*secret);
    let shared = secret.diffie_hellman(&X25519PublicKey::from(*public));

    let mut hasher = Blake2b::<U32>::new();
    hasher.update(shared.as_bytes());
    hasher.update(SESSION_CONTEXT);

    let mut key = Zeroizing::new([0u8; KEY_LENGTH]);
    key.copy_from_slice(&hasher.finalize());
    key
}

/// Pairwise authenticated encryption bound to one secret/public key pair.
///
/// Immutable after construction. When a nonce is bound at construction,
/// every call without an explicit override reuses it; that is the
/// single-nonce session model, and rotating nonces between messages is a
/// caller obligation (pass a fresh nonce per call or build a new box).
#[derive(Debug)]
pub struct CryptoBox {
    secret: SecretKey,
    public: PublicKey,
    nonce: Option<[u8; NONCE_LENGTH]>,
}

impl CryptoBox {
    /// Create a box from a sender secret key, a receiver public key and an
    /// optional bound nonce.
    ///
    /// # Errors
    /// - Returns `InvalidKeyLength` if either key is not KEY_LENGTH bytes
    /// - Returns `InvalidNonceLength` if a nonce is supplied with the
    ///   wrong length
    pub fn new(secret_key: &[u8], public_key: &[u8], nonce: Option<&[u8]>) -> Result<Self> {
        let nonce = match nonce {
            Some(bytes) => Some(validate_nonce(bytes)?),
            None => None,
        };
        Ok(Self {
            secret: SecretKey::from_slice(secret_key)?,
            public: PublicKey::from_slice(public_key)?,
            nonce,
        })
    }

    /// Resolve the effective nonce: an explicit override wins, else the
    /// bound nonce.
    ///
    /// # Errors
    /// - Returns `InvalidNonceLength` for a wrong-length override
    /// - Returns `NonceUnset` when neither an override nor a bound nonce
    ///   exists
    fn resolve_nonce(&self, nonce: Option<&[u8]>) -> Result<[u8; NONCE_LENGTH]> {
        match nonce {
            Some(bytes) => validate_nonce(bytes),
            None => self.nonce.ok_or(Error::NonceUnset),
        }
    }

    /// Encrypt `message` for the receiver.
    ///
    /// Returns ciphertext followed by the authentication tag; the nonce is
    /// not included in the output.
    ///
    /// # Security
    /// The nonce must be unique per message under this key pair. Only its
    /// length is enforced here.
    ///
    /// # Errors
    /// - Returns `NonceUnset` / `InvalidNonceLength` from nonce resolution
    /// - Returns `Crypto` if the provider rejects the operation
    pub fn encrypt(&self, message: &[u8], nonce: Option<&[u8]>) -> Result<Vec<u8>> {
        let nonce = self.resolve_nonce(nonce)?;
        let key = session_key(self.secret.as_bytes(), self.public.as_bytes());

        let cipher = XChaCha20Poly1305::new(GenericArray::from_slice(&*key));
        cipher
            .encrypt(GenericArray::from_slice(&nonce), message)
            .map_err(|_| Error::Crypto("box encryption failed".to_string()))
    }

    /// Decrypt and authenticate `ciphertext` from the peer.
    ///
    /// Returns `Ok(None)` when authentication fails: forged or corrupted
    /// ciphertexts are an expected outcome the caller must branch on, not
    /// an error.
    ///
    /// # Errors
    /// - Returns `NonceUnset` / `InvalidNonceLength` from nonce resolution
    pub fn decrypt(&self, ciphertext: &[u8], nonce: Option<&[u8]>) -> Result<Option<Vec<u8>>> {
        let nonce = self.resolve_nonce(nonce)?;
        let key = session_key(self.secret.as_bytes(), self.public.as_bytes());

        let cipher = XChaCha20Poly1305::new(GenericArray::from_slice(&*key));
        Ok(cipher
            .decrypt(GenericArray::from_slice(&nonce), ciphertext)
            .ok())
    }

    /// Generate a fresh key pair.
    pub fn generate_keypair() -> BoxKeyPair {
        BoxKeyPair::generate()
    }

    /// Generate a random nonce of the required length.
    pub fn random_nonce() -> [u8; NONCE_LENGTH] {
        random::random_nonce()
    }
}

fn validate_nonce(bytes: &[u8]) -> Result<[u8; NONCE_LENGTH]> {
    bytes.try_into().map_err(|_| Error::InvalidNonceLength {
        expected: NONCE_LENGTH,
        got: bytes.len(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Box from Alice to Bob and its counterpart from Bob to Alice.
    fn pair_of_boxes(nonce: Option<&[u8]>) -> (CryptoBox, CryptoBox) {
        let alice = BoxKeyPair::generate();
        let bob = BoxKeyPair::generate();

        let alice_box = CryptoBox::new(
            alice.secret_key().as_bytes(),
            bob.public_key().as_bytes(),
            nonce,
        )
        .unwrap();
        let bob_box = CryptoBox::new(
            bob.secret_key().as_bytes(),
            alice.public_key().as_bytes(),
            nonce,
        )
        .unwrap();
        (alice_box, bob_box)
    }

    #[test]
    fn test_encrypt_decrypt_roundtrip() {
        let nonce = CryptoBox::random_nonce();
        let (alice_box, bob_box) = pair_of_boxes(Some(&nonce));
        let plaintext = b"Hello, Bob!";

        let ciphertext = alice_box.encrypt(plaintext, None).unwrap();
        let decrypted = bob_box.decrypt(&ciphertext, None).unwrap().unwrap();

        assert_eq!(decrypted, plaintext);
    }

    #[test]
    fn test_explicit_nonce_overrides_bound() {
        let bound = CryptoBox::random_nonce();
        let explicit = CryptoBox::random_nonce();
        let (alice_box, bob_box) = pair_of_boxes(Some(&bound));

        let ciphertext = alice_box.encrypt(b"message", Some(&explicit)).unwrap();

        // Decrypting with the bound nonce must fail, with the explicit one
        // it must succeed
        assert!(bob_box.decrypt(&ciphertext, None).unwrap().is_none());
        assert_eq!(
            bob_box.decrypt(&ciphertext, Some(&explicit)).unwrap().unwrap(),
            b"message"
        );
    }

    #[test]
    fn test_nonce_unset() {
        let (alice_box, _) = pair_of_boxes(None);

        assert_eq!(
            alice_box.encrypt(b"message", None).unwrap_err(),
            Error::NonceUnset
        );
        assert_eq!(
            alice_box.decrypt(b"ciphertext", None).unwrap_err(),
            Error::NonceUnset
        );
    }

    #[test]
    fn test_invalid_nonce_length() {
        let pair = BoxKeyPair::generate();
        let result = CryptoBox::new(
            pair.secret_key().as_bytes(),
            pair.public_key().as_bytes(),
            Some(&[0u8; 12]),
        );
        assert_eq!(
            result.unwrap_err(),
            Error::InvalidNonceLength {
                expected: NONCE_LENGTH,
                got: 12
            }
        );

        let (alice_box, _) = pair_of_boxes(None);
        assert!(alice_box.encrypt(b"m", Some(&[0u8; 23])).is_err());
    }

    #[test]
    fn test_invalid_key_length() {
        let pair = BoxKeyPair::generate();
        let result = CryptoBox::new(&[0u8; 31], pair.public_key().as_bytes(), None);
        assert!(matches!(
            result.unwrap_err(),
            Error::InvalidKeyLength { got: 31, .. }
        ));
    }

    #[test]
    fn test_tampered_ciphertext_rejected() {
        let nonce = CryptoBox::random_nonce();
        let (alice_box, bob_box) = pair_of_boxes(Some(&nonce));

        let mut ciphertext = alice_box.encrypt(b"authentic", None).unwrap();
        ciphertext[3] ^= 0x01;

        assert!(bob_box.decrypt(&ciphertext, None).unwrap().is_none());
    }

    #[test]
    fn test_wrong_peer_rejected() {
        let nonce = CryptoBox::random_nonce();
        let (alice_box, _) = pair_of_boxes(Some(&nonce));

        let eve = BoxKeyPair::generate();
        let carol = BoxKeyPair::generate();
        let eve_box = CryptoBox::new(
            eve.secret_key().as_bytes(),
            carol.public_key().as_bytes(),
            Some(&nonce),
        )
        .unwrap();

        let ciphertext = alice_box.encrypt(b"for bob only", None).unwrap();
        assert!(eve_box.decrypt(&ciphertext, None).unwrap().is_none());
    }

    #[test]
    fn test_different_messages_differ() {
        let nonce = CryptoBox::random_nonce();
        let (alice_box, _) = pair_of_boxes(Some(&nonce));

        let ct1 = alice_box.encrypt(b"message one", None).unwrap();
        let ct2 = alice_box.encrypt(b"message two", None).unwrap();

        assert_ne!(ct1, ct2);
    }

    #[test]
    fn test_session_key_symmetric() {
        let alice = BoxKeyPair::generate();
        let bob = BoxKeyPair::generate();

        let k1 = session_key(alice.secret_key().as_bytes(), bob.public_key().as_bytes());
        let k2 = session_key(bob.secret_key().as_bytes(), alice.public_key().as_bytes());

        assert_eq!(*k1, *k2);
    }
}
