//! Hashing of raw bytes.
//!
//! This module provides the digest primitives used to fingerprint hosted badge
//! assertions. It has been separated into its own crate so the hashing code can be
//! audited and replaced independently of the validation and storage providers.

use std::sync::Arc;

use thiserror::Error;

pub mod imp;

#[derive(Debug, PartialEq, Eq, Error)]
pub enum CryptoProviderError {
    #[error("Missing hasher: `{0}`")]
    MissingHasher(String),
}

#[derive(Debug, PartialEq, Eq, Error)]
pub enum HasherError {
    #[error("Could not hash")]
    CouldNotHash,
    #[error("Crypto provider error: `{0}`")]
    CryptoError(#[from] CryptoProviderError),
}

/// Provides hashing.
#[cfg_attr(any(test, feature = "mock"), mockall::automock)]
pub trait Hasher: Send + Sync {
    /// Digest encoded as base64url without padding.
    fn hash_base64(&self, input: &[u8]) -> Result<String, HasherError>;

    /// Digest encoded as lowercase hex.
    fn hash_hex(&self, input: &[u8]) -> Result<String, HasherError>;

    /// Raw digest bytes.
    fn hash(&self, input: &[u8]) -> Result<Vec<u8>, HasherError>;
}

/// Return hasher instances by algorithm name (e.g. `sha256`).
#[cfg_attr(any(test, feature = "mock"), mockall::automock)]
pub trait CryptoProvider: Send + Sync {
    /// Returns hasher instance.
    fn get_hasher(&self, hasher: &str) -> Result<Arc<dyn Hasher>, CryptoProviderError>;
}
