//! Validated cryptographic wrappers for Cloakbox.
//!
//! This crate wraps a small set of authenticated-encryption, hashing,
//! signing and password-hashing primitives behind validated entry points:
//! - Public-key authenticated encryption ([`boxes::CryptoBox`])
//! - Anonymous sealed encryption ([`seal`])
//! - Symmetric authenticated encryption ([`secretbox::SecretBox`])
//! - Keyed hashing / MACs ([`hash::GenericHash`])
//! - Detached signatures ([`sign`])
//! - Adaptive password hashing ([`password::Password`])
//! - A zeroizing secret string holder ([`hidden::HiddenString`])
//!
//! # Security Guarantees
//! - Key and nonce lengths are validated before any primitive runs
//! - All secret material is zeroized on drop
//! - Sensitive comparisons are constant-time
//! - Authentication failures are explicit values (`None` / `false`),
//!   never errors, so forged inputs cannot be confused with API misuse
//!
//! Nonce *uniqueness* is a caller obligation: only nonce length is
//! enforced here, and reusing a nonce under the same key destroys both
//! confidentiality and authenticity.

pub mod boxes;
pub mod encoding;
pub mod hash;
pub mod hidden;
pub mod keys;
pub mod password;
pub mod random;
pub mod seal;
pub mod secretbox;
pub mod sign;

pub use boxes::CryptoBox;
pub use hash::GenericHash;
pub use hidden::HiddenString;
pub use keys::{BoxKeyPair, PublicKey, SecretKey, KEY_LENGTH, NONCE_LENGTH, TAG_LENGTH};
pub use password::{CostTier, Password};
pub use secretbox::SecretBox;
pub use sign::SignKeyPair;

pub use cloakbox_common::{Error, Result};
