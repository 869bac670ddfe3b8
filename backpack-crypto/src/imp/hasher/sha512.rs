use ct_codecs::{Base64UrlSafeNoPadding, Encoder};
use sha2::{Digest, Sha512};

use crate::{Hasher, HasherError};

pub struct SHA512 {}

impl Hasher for SHA512 {
    fn hash_base64(&self, input: &[u8]) -> Result<String, HasherError> {
        Base64UrlSafeNoPadding::encode_to_string(self.hash(input)?)
            .map_err(|_| HasherError::CouldNotHash)
    }

    fn hash_hex(&self, input: &[u8]) -> Result<String, HasherError> {
        Ok(hex::encode(self.hash(input)?))
    }

    fn hash(&self, input: &[u8]) -> Result<Vec<u8>, HasherError> {
        Ok(Sha512::digest(input).to_vec())
    }
}
