//! Hex and base64 conversions for binary secrets.
//!
//! Used wherever a binary value needs a textual representation, e.g.
//! base64-encoded MAC signatures. Decoding failures are caller errors
//! (`Error::Decode`), never silent truncation.

use base64::engine::general_purpose::{STANDARD, STANDARD_NO_PAD};
use base64::Engine as _;

use cloakbox_common::{Error, Result};

/// Encode bytes as lowercase hexadecimal.
pub fn bin2hex(bin: &[u8]) -> String {
    hex::encode(bin)
}

/// Decode a hexadecimal string.
///
/// # Errors
/// - Returns `Decode` if the input contains non-hex characters or has an
///   odd length
pub fn hex2bin(string: &str) -> Result<Vec<u8>> {
    hex::decode(string).map_err(|e| Error::Decode(format!("invalid hex: {}", e)))
}

/// Encode bytes as standard base64 with padding.
pub fn bin2base64(bin: &[u8]) -> String {
    STANDARD.encode(bin)
}

/// Decode a standard padded base64 string.
///
/// # Errors
/// - Returns `Decode` if the input is not valid base64
pub fn base642bin(string: &str) -> Result<Vec<u8>> {
    STANDARD
        .decode(string)
        .map_err(|e| Error::Decode(format!("invalid base64: {}", e)))
}

/// Encode bytes as standard base64 without padding.
pub fn bin2base64_nopad(bin: &[u8]) -> String {
    STANDARD_NO_PAD.encode(bin)
}

/// Decode a standard unpadded base64 string.
///
/// # Errors
/// - Returns `Decode` if the input is not valid unpadded base64
pub fn base642bin_nopad(string: &str) -> Result<Vec<u8>> {
    STANDARD_NO_PAD
        .decode(string)
        .map_err(|e| Error::Decode(format!("invalid base64: {}", e)))
}
