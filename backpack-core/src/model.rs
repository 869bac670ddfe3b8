use backpack_providers::field_validator::HashAlgorithm;
use strum_macros::{Display, EnumString};

#[derive(Debug, Copy, Clone, Display, EnumString, PartialEq, Eq, PartialOrd, Ord)]
pub enum HashAlgorithmType {
    #[strum(serialize = "sha256")]
    Sha256,
    #[strum(serialize = "sha512")]
    Sha512,
}

impl From<HashAlgorithmType> for HashAlgorithm {
    fn from(value: HashAlgorithmType) -> Self {
        match value {
            HashAlgorithmType::Sha256 => HashAlgorithm::Sha256,
            HashAlgorithmType::Sha512 => HashAlgorithm::Sha512,
        }
    }
}
