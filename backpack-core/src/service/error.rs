use backpack_crypto::CryptoProviderError;
use backpack_providers::{
    badge::error::{BadgeError, SaveError},
    badge_storage::error::BadgeStorageError,
};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum BadgeServiceError {
    #[error("Missing hasher `{0}`")]
    MissingHasher(String),
    #[error("Body hash mismatch: `{0}`")]
    BodyHashMismatch(String),
    #[error("Serialization error: `{0}`")]
    Serialization(String),
    #[error("Save error: `{0}`")]
    SaveError(#[from] SaveError),
    #[error("Badge error: `{0}`")]
    BadgeError(BadgeError),
    #[error("Badge storage error: `{0}`")]
    BadgeStorageError(#[from] BadgeStorageError),
}

impl From<BadgeError> for BadgeServiceError {
    fn from(error: BadgeError) -> Self {
        match error {
            BadgeError::CryptoProviderError(CryptoProviderError::MissingHasher(name)) => {
                Self::MissingHasher(name)
            }
            error => Self::BadgeError(error),
        }
    }
}
