//! Enumerates errors for badge records.

use backpack_crypto::{CryptoProviderError, HasherError};
use thiserror::Error;

use crate::assertion::ValidationError;
use crate::badge_storage::error::BadgeStorageError;
use crate::common_models::badge::BadgeId;

#[derive(Debug, PartialEq, Eq, Error)]
pub enum BadgeError {
    #[error("Badge already saved with id `{0}`")]
    AlreadySaved(BadgeId),
    #[error("Serialization error: `{0}`")]
    Serialization(String),
    #[error("Malformed body hash: `{0}`")]
    MalformedBodyHash(String),
    #[error("Hasher error: `{0}`")]
    HasherError(#[from] HasherError),
    #[error("Crypto provider error: `{0}`")]
    CryptoProviderError(#[from] CryptoProviderError),
}

#[derive(Debug, Error)]
pub enum SaveError {
    #[error("Badge already saved with id `{0}`")]
    AlreadySaved(BadgeId),
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("Persistence error: `{0}`")]
    Persistence(#[from] BadgeStorageError),
    #[error("Serialization error: `{0}`")]
    Serialization(String),
}

#[derive(Debug, PartialEq, Eq, Error)]
pub enum JwtError {
    #[error("Missing token part")]
    MissingPart,
    #[error("Could not decode token part: `{0}`")]
    Decoding(String),
    #[error("JSON mapping error: `{0}`")]
    JsonMapping(String),
}
