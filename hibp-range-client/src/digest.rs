//! SHA-1 digest computation and the prefix/suffix split used by range queries.
//!
//! Only the [`Prefix`] ever leaves the process. The [`Suffix`] stays in memory
//! for local comparison and its buffer is wiped when dropped.

use std::fmt;

use sha1::{Digest, Sha1};
use zeroize::{Zeroize, Zeroizing};

/// The length of a SHA-1 hash prefix sent to the range API (5 hex characters).
pub const PREFIX_LEN: usize = 5;

/// The length of the SHA-1 suffix kept locally (35 hex characters).
pub const SUFFIX_LEN: usize = 35;

/// The length of a full SHA-1 digest rendered as hex.
pub const DIGEST_HEX_LEN: usize = PREFIX_LEN + SUFFIX_LEN;

/// Hex lookup table for digest rendering.
pub const HEX_CHARS: &[u8; 16] = b"0123456789ABCDEF";

/// The public part of a digest: 5 uppercase hex characters.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Prefix([u8; PREFIX_LEN]);

impl Prefix {
    #[inline]
    pub fn as_str(&self) -> &str {
        // SAFETY: the buffer only ever holds bytes from HEX_CHARS
        unsafe { std::str::from_utf8_unchecked(&self.0) }
    }
}

impl fmt::Display for Prefix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Debug for Prefix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Prefix").field(&self.as_str()).finish()
    }
}

/// The secret part of a digest: 35 uppercase hex characters.
///
/// `Debug` output is redacted and the buffer is zeroized on drop.
#[derive(Clone, PartialEq, Eq)]
pub struct Suffix([u8; SUFFIX_LEN]);

impl Suffix {
    #[inline]
    pub fn as_str(&self) -> &str {
        // SAFETY: the buffer only ever holds bytes from HEX_CHARS
        unsafe { std::str::from_utf8_unchecked(&self.0) }
    }

    /// Compares against a candidate suffix from a range response, ignoring case.
    #[inline]
    pub fn matches(&self, candidate: &str) -> bool {
        self.0.eq_ignore_ascii_case(candidate.as_bytes())
    }
}

impl fmt::Debug for Suffix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Suffix(<redacted>)")
    }
}

impl Drop for Suffix {
    fn drop(&mut self) {
        self.0.zeroize();
    }
}

/// Hashes the password's UTF-8 bytes and splits the digest into prefix and suffix.
///
/// The empty password is valid and yields the digest of the empty byte sequence.
pub fn split(password: &str) -> (Prefix, Suffix) {
    split_bytes(password.as_bytes())
}

/// Same as [`split`] for passwords that are not valid UTF-8.
pub fn split_bytes(password: &[u8]) -> (Prefix, Suffix) {
    let hash = sha1(password);
    split_hash(&hash)
}

/// Splits a precomputed SHA-1 given as 40 hex characters in any case.
///
/// Returns `None` when the input is not exactly 40 hex digits.
pub fn split_hex(hex: &str) -> Option<(Prefix, Suffix)> {
    let bytes = hex.as_bytes();
    if bytes.len() != DIGEST_HEX_LEN || !bytes.iter().all(u8::is_ascii_hexdigit) {
        return None;
    }

    let mut prefix = [0u8; PREFIX_LEN];
    let mut suffix = Suffix([0u8; SUFFIX_LEN]);
    for (out, c) in prefix.iter_mut().zip(&bytes[..PREFIX_LEN]) {
        *out = c.to_ascii_uppercase();
    }
    for (out, c) in suffix.0.iter_mut().zip(&bytes[PREFIX_LEN..]) {
        *out = c.to_ascii_uppercase();
    }

    Some((Prefix(prefix), suffix))
}

#[inline]
fn sha1(password: &[u8]) -> Zeroizing<[u8; 20]> {
    let mut hasher = Sha1::new();
    hasher.update(password);
    Zeroizing::new(hasher.finalize().into())
}

/// Returns hex digit `i` (0..40) of the hash, high nibble first.
#[inline(always)]
fn hex_digit(hash: &[u8; 20], i: usize) -> u8 {
    let byte = hash[i / 2];
    let nibble = if i.is_multiple_of(2) { byte >> 4 } else { byte & 0x0f };
    HEX_CHARS[nibble as usize]
}

fn split_hash(hash: &[u8; 20]) -> (Prefix, Suffix) {
    let mut prefix = [0u8; PREFIX_LEN];
    let mut suffix = Suffix([0u8; SUFFIX_LEN]);

    for (i, out) in prefix.iter_mut().enumerate() {
        *out = hex_digit(hash, i);
    }
    for (i, out) in suffix.0.iter_mut().enumerate() {
        *out = hex_digit(hash, PREFIX_LEN + i);
    }

    (Prefix(prefix), suffix)
}
