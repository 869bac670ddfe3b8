//! Body hash computation and verification.
//!
//! Validation only checks that a `body_hash` is well formed. Comparing it against the
//! actual bytes of a fetched assertion is a separate, explicit step.

use backpack_crypto::CryptoProvider;

use super::error::BadgeError;
use crate::field_validator::{is_hash_digest, HashAlgorithm};

/// Computes `<algorithm>$<hex digest>` of `raw`.
pub fn compute_body_hash(
    raw: &[u8],
    algorithm: HashAlgorithm,
    crypto: &dyn CryptoProvider,
) -> Result<String, BadgeError> {
    let hasher = crypto.get_hasher(&algorithm.to_string())?;
    let digest = hasher.hash_hex(raw)?;

    Ok(format!("{algorithm}${digest}"))
}

/// Returns whether `body_hash` is the digest of `raw`.
pub fn verify_body_hash(
    raw: &[u8],
    body_hash: &str,
    crypto: &dyn CryptoProvider,
) -> Result<bool, BadgeError> {
    if !is_hash_digest(body_hash) {
        return Err(BadgeError::MalformedBodyHash(body_hash.to_owned()));
    }

    let algorithm = body_hash
        .split_once('$')
        .and_then(|(algorithm, _)| algorithm.parse::<HashAlgorithm>().ok())
        .ok_or_else(|| BadgeError::MalformedBodyHash(body_hash.to_owned()))?;

    Ok(compute_body_hash(raw, algorithm, crypto)? == body_hash)
}
