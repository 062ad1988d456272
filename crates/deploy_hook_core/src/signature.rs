//! Webhook signature verification.
//!
//! GitHub signs the request body it sends: HMAC-SHA256 over the raw JSON
//! bytes, delivered as `sha256=<lowercase-hex>` in `X-Hub-Signature-256`. By
//! the time this handler runs, the hosting platform has parsed that body and
//! injected transport metadata under `__`-prefixed top-level keys, so the
//! signed byte sequence has to be reconstructed: drop the injected keys,
//! re-serialize the remaining fields in their original order with compact
//! separators.
//!
//! Comparison happens in constant time via [`hmac::Mac::verify_slice`].

use hmac::{Hmac, Mac};
use serde_json::{Map, Value};
use sha2::Sha256;

use crate::errors::{Error, Result};

#[cfg(test)]
#[path = "signature_tests.rs"]
mod tests;

type HmacSha256 = Hmac<Sha256>;

/// Prefix of every GitHub SHA-256 signature header.
const SIGNATURE_PREFIX: &str = "sha256=";

/// Reserved prefix marking transport-injected top-level keys.
const METADATA_PREFIX: &str = "__";

/// Reconstruct the byte sequence the sender signed.
///
/// A pure transformation: every top-level key that does not start with the
/// reserved `__` prefix is copied into a fresh map, preserving the original
/// key order. Serialization uses compact separators, matching the JSON bodies
/// GitHub emits. The input is never mutated.
pub fn canonical_bytes(fields: &Map<String, Value>) -> Vec<u8> {
    let canonical: Map<String, Value> = fields
        .iter()
        .filter(|(key, _)| !key.starts_with(METADATA_PREFIX))
        .map(|(key, value)| (key.clone(), value.clone()))
        .collect();

    serde_json::to_vec(&canonical).expect("a JSON object map always serializes")
}

/// Compute the signature header value for a payload.
///
/// Produces `sha256=<lowercase-hex-digest>` over [`canonical_bytes`]. This is
/// what a legitimate sender would have put in `X-Hub-Signature-256`.
pub fn sign(fields: &Map<String, Value>, secret: &[u8]) -> String {
    let mut mac = HmacSha256::new_from_slice(secret).expect("HMAC accepts any key length");
    mac.update(&canonical_bytes(fields));
    let digest = mac.finalize().into_bytes();
    format!("{SIGNATURE_PREFIX}{}", hex::encode(digest))
}

/// Verify a sender-supplied signature against the canonical payload.
///
/// # Errors
///
/// Returns [`Error::SignatureMismatch`] for a malformed header, bad hex, or a
/// digest mismatch alike. The error carries no further detail: the computed
/// digest must never reach the caller.
pub fn verify(fields: &Map<String, Value>, secret: &[u8], signature_header: &str) -> Result<()> {
    let Some(hex_part) = signature_header.strip_prefix(SIGNATURE_PREFIX) else {
        return Err(Error::SignatureMismatch);
    };

    let Ok(received) = hex::decode(hex_part) else {
        return Err(Error::SignatureMismatch);
    };

    let mut mac = HmacSha256::new_from_slice(secret).expect("HMAC accepts any key length");
    mac.update(&canonical_bytes(fields));

    // Constant-time comparison.
    mac.verify_slice(&received)
        .map_err(|_| Error::SignatureMismatch)
}
