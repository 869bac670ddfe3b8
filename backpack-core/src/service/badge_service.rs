use std::sync::Arc;

use backpack_crypto::CryptoProvider;
use backpack_providers::{
    assertion::{self, ValidationError},
    badge::{hash, Badge, BadgeData},
    badge_storage::{BadgeStorage, StoredBadge},
    common_models::badge::BadgeId,
    field_validator::is_hash_digest,
};
use serde_json::Value;
use tracing::instrument;

use super::error::BadgeServiceError;
use crate::config::BodyHashConfig;

pub struct BadgeService {
    crypto: Arc<dyn CryptoProvider>,
    storage: Arc<dyn BadgeStorage>,
    config: BodyHashConfig,
}

impl BadgeService {
    pub fn new(
        crypto: Arc<dyn CryptoProvider>,
        storage: Arc<dyn BadgeStorage>,
        config: BodyHashConfig,
    ) -> Self {
        Self {
            crypto,
            storage,
            config,
        }
    }

    /// Checks an assertion document, reporting every offending field.
    pub fn validate_body(&self, body: &Value) -> Result<(), ValidationError> {
        assertion::validate_body(body)
    }

    /// Validates and saves `data`, returning the badge with its assigned id.
    #[instrument(level = "debug", skip(self, data), err)]
    pub async fn create_badge(&self, data: BadgeData) -> Result<Badge, BadgeServiceError> {
        if self.config.verify_on_create {
            self.verify_declared_body_hash(&data)?;
        }

        let mut badge = Badge::new(data);
        let id = badge.save(self.storage.as_ref()).await?;
        tracing::debug!(%id, "badge created");

        Ok(badge)
    }

    /// Saves a hosted badge whose `body_hash` is computed from `body` with the configured
    /// algorithm.
    #[instrument(level = "debug", skip(self, body), err)]
    pub async fn create_hosted_badge(
        &self,
        endpoint: String,
        image_path: String,
        body: Value,
    ) -> Result<Badge, BadgeServiceError> {
        let body_hash = self.compute_body_hash(&serialize(&body)?)?;

        let mut badge = Badge::hosted(endpoint, image_path, body, body_hash);
        let id = badge.save(self.storage.as_ref()).await?;
        tracing::debug!(%id, "hosted badge created");

        Ok(badge)
    }

    pub fn compute_body_hash(&self, raw: &[u8]) -> Result<String, BadgeServiceError> {
        Ok(hash::compute_body_hash(
            raw,
            self.config.algorithm.into(),
            self.crypto.as_ref(),
        )?)
    }

    /// Fails with [`BadgeServiceError::BodyHashMismatch`] unless `body_hash` is the digest
    /// of `raw`.
    pub fn verify_body_hash(&self, raw: &[u8], body_hash: &str) -> Result<(), BadgeServiceError> {
        if hash::verify_body_hash(raw, body_hash, self.crypto.as_ref())? {
            Ok(())
        } else {
            Err(BadgeServiceError::BodyHashMismatch(body_hash.to_owned()))
        }
    }

    #[instrument(level = "debug", skip(self), err)]
    pub async fn get_badge(&self, id: BadgeId) -> Result<Option<StoredBadge>, BadgeServiceError> {
        Ok(self.storage.get(id).await?)
    }

    /// Malformed or absent hashes are left to record validation. Well-formed hashes of an
    /// algorithm without a registered hasher are accepted unverified.
    fn verify_declared_body_hash(&self, data: &BadgeData) -> Result<(), BadgeServiceError> {
        let (Some(body @ Value::Object(_)), Some(body_hash)) = (&data.body, &data.body_hash) else {
            return Ok(());
        };
        if !is_hash_digest(body_hash) {
            return Ok(());
        }

        match self.verify_body_hash(&serialize(body)?, body_hash) {
            Err(BadgeServiceError::MissingHasher(algorithm)) => {
                tracing::warn!(%algorithm, "no hasher registered, body hash not verified");
                Ok(())
            }
            result => {
                result.inspect_err(|error| tracing::warn!(%error, "declared body hash rejected"))
            }
        }
    }
}

fn serialize(body: &Value) -> Result<Vec<u8>, BadgeServiceError> {
    serde_json::to_vec(body).map_err(|e| BadgeServiceError::Serialization(e.to_string()))
}
