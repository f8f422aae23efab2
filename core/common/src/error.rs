//! Common error types for Cloakbox.
//!
//! Two kinds of failure exist in this library and they are kept apart
//! deliberately:
//!
//! - **Errors** (this type): caller misuse (wrong lengths, missing nonce,
//!   malformed encodings) or a broken primitive provider. Always raised
//!   before any cryptographic operation runs where possible.
//! - **Cryptographic rejection**: a forged or tampered ciphertext, a wrong
//!   password, a bad signature. These are expected outcomes the caller must
//!   branch on, so the APIs return `Option` / `bool` for them instead of
//!   an error.
//!
//! Error messages include the offending length or value to aid debugging,
//! but never any secret material.

use thiserror::Error;

/// Top-level error type for Cloakbox operations.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum Error {
    /// A key did not have the exact required length.
    #[error("invalid key length: expected {expected} bytes, got {got}")]
    InvalidKeyLength { expected: usize, got: usize },

    /// A nonce did not have the exact required length.
    #[error("invalid nonce length: expected {expected} bytes, got {got}")]
    InvalidNonceLength { expected: usize, got: usize },

    /// A keyed-hash key fell outside the allowed range.
    #[error("key length must be between {min} and {max} bytes, got {got}")]
    KeyLengthOutOfRange { min: usize, max: usize, got: usize },

    /// A requested hash output length fell outside the allowed range.
    #[error("hash length must be between {min} and {max} bytes, got {got}")]
    HashLengthOutOfRange { min: usize, max: usize, got: usize },

    /// A detached signature did not have the exact required length.
    #[error("invalid signature length: expected {expected} bytes, got {got}")]
    InvalidSignatureLength { expected: usize, got: usize },

    /// An operation required a nonce but none was supplied or bound.
    #[error("nonce was not set")]
    NonceUnset,

    /// A textual encoding (hex, base64) could not be decoded.
    #[error("decode error: {0}")]
    Decode(String),

    /// A password hash string could not be parsed.
    #[error("malformed password hash: {0}")]
    MalformedHash(String),

    /// The underlying primitive provider failed. Not recoverable: a broken
    /// primitive or randomness source invalidates all downstream guarantees.
    #[error("cryptographic error: {0}")]
    Crypto(String),
}

/// Result type alias using the common Error.
pub type Result<T> = std::result::Result<T, Error>;
