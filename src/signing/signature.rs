//! Signature derivation.
//!
//! The signed payload is the raw query string, followed by the values of the
//! configured headers in configured order, followed by the secret key. Pieces
//! are joined with no separator, so `("a=1", "2")` and `("a=12", "")` produce
//! the same payload. Existing verifiers depend on this exact layout.

use std::fmt;

use axum::http::{HeaderMap, HeaderValue};
use sha2::{Digest, Sha256};

/// Header the derived signature is written to.
pub const SIGNATURE_HEADER: &str = "x-signature";

/// Build the exact byte sequence that gets hashed.
///
/// Header lookup is case-insensitive and uses the first value when a header
/// repeats. Absent and empty headers contribute nothing. Names that are not
/// valid header names can never be present and are skipped.
pub fn signing_payload(
    query: &str,
    headers: &HeaderMap,
    header_names: &[String],
    secret: &str,
) -> Vec<u8> {
    let mut data = Vec::with_capacity(query.len() + secret.len() + 64);
    data.extend_from_slice(query.as_bytes());
    for name in header_names {
        if let Some(value) = headers.get(name.as_str()) {
            data.extend_from_slice(value.as_bytes());
        }
    }
    data.extend_from_slice(secret.as_bytes());
    data
}

/// Lowercase hex SHA-256 digest of a signing payload.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Signature(String);

impl Signature {
    /// Hash a payload produced by [`signing_payload`].
    pub fn compute(payload: &[u8]) -> Self {
        let mut hasher = Sha256::new();
        hasher.update(payload);
        Self(hex::encode(hasher.finalize()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Header value for `X-Signature`.
    ///
    /// Returns `None` only if the hex encoding produced a byte that is not a
    /// visible ASCII character, which `hex::encode` never does.
    pub fn to_header_value(&self) -> Option<HeaderValue> {
        HeaderValue::from_str(&self.0).ok()
    }
}

impl fmt::Display for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Signature {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
