//! A secret string holder with zeroization on drop.
//!
//! [`HiddenString`] keeps a defensively copied secret and guarantees the
//! buffer is overwritten with zeros before release, on every exit path
//! including unwinding. The copy is assembled chunk by chunk so no single
//! operation snapshots the whole secret contiguously; this defends
//! against a one-shot copy of the full value at construction time, not
//! against memory inspection over time.

use std::fmt;

use subtle::ConstantTimeEq;
use zeroize::{Zeroize, ZeroizeOnDrop};

/// A secret string that zeroizes its memory on drop.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct HiddenString {
    string: String,
}

impl HiddenString {
    /// Store a defensively reconstructed copy of `value`.
    ///
    /// The internal buffer never aliases the caller's string.
    pub fn new(value: &str) -> Self {
        Self {
            string: chunked_copy(value),
        }
    }

    /// Return a fresh copy of the secret, built by the same chunked
    /// reconstruction. The internal buffer is never handed out.
    pub fn read(&self) -> String {
        chunked_copy(&self.string)
    }
}

/// Copy a string in chunks of half its length (at least one byte),
/// keeping chunk boundaries on UTF-8 character boundaries.
fn chunked_copy(source: &str) -> String {
    let len = source.len();
    let chunk = (len >> 1).max(1);

    let mut result = String::with_capacity(len);
    let mut start = 0;
    while start < len {
        let mut end = (start + chunk).min(len);
        while end < len && !source.is_char_boundary(end) {
            end += 1;
        }
        result.push_str(&source[start..end]);
        start = end;
    }
    result
}

impl PartialEq for HiddenString {
    /// Constant-time comparison of the two secrets.
    fn eq(&self, other: &Self) -> bool {
        self.string.as_bytes().ct_eq(other.string.as_bytes()).into()
    }
}

impl Eq for HiddenString {}

impl fmt::Debug for HiddenString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "HiddenString([REDACTED])")
    }
}
