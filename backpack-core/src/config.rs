use crate::model::HashAlgorithmType;

#[derive(Clone, Debug)]
pub struct BackpackConfig {
    pub body_hash_config: BodyHashConfig,
}

#[derive(Clone, Debug)]
pub struct BodyHashConfig {
    /// Algorithm used when the backpack computes a body hash itself.
    pub algorithm: HashAlgorithmType,
    /// Compare `body_hash` against the serialized body before saving.
    pub verify_on_create: bool,
}

impl Default for BackpackConfig {
    fn default() -> Self {
        Self {
            body_hash_config: BodyHashConfig {
                algorithm: HashAlgorithmType::Sha256,
                verify_on_create: false,
            },
        }
    }
}
