//! The **Badge Backpack** core: a service layer over the badge providers.
//!
//! The providers crate validates assertion documents and badge records and defines
//! the storage contract; the crypto crate computes body hashes. The core wires both
//! together behind [`service::badge_service::BadgeService`].
//!
//! ```ignore rust
//! /// `None` initializes the backpack with the default configuration
//! let backpack = Backpack::new(None, Arc::new(InMemoryBadgeStorage::new()));
//!
//! let badge = backpack
//!     .badge_service
//!     .create_hosted_badge(endpoint, image_path, body)
//!     .await?;
//! ```
//!
//! No tracing subscriber is installed here; operations emit `tracing` events and spans
//! for the embedding application to collect.

use std::{collections::HashMap, sync::Arc};

use backpack_crypto::imp::{
    hasher::{sha256::SHA256, sha512::SHA512},
    CryptoProviderImpl,
};
use backpack_providers::badge_storage::{in_memory::InMemoryBadgeStorage, BadgeStorage};

use config::BackpackConfig;
use model::HashAlgorithmType;
use service::badge_service::BadgeService;

pub mod config;
pub mod model;
pub mod service;

pub struct Backpack {
    pub badge_service: BadgeService,
}

impl Default for Backpack {
    fn default() -> Self {
        Self::new(None, Arc::new(InMemoryBadgeStorage::new()))
    }
}

impl Backpack {
    pub fn new(config: Option<BackpackConfig>, storage: Arc<dyn BadgeStorage>) -> Self {
        let config = config.unwrap_or_default();

        // initialize crypto provider
        let crypto_provider = Arc::new(CryptoProviderImpl::new(HashMap::from_iter(vec![
            (HashAlgorithmType::Sha256.to_string(), Arc::new(SHA256 {}) as _),
            (HashAlgorithmType::Sha512.to_string(), Arc::new(SHA512 {}) as _),
        ])));

        let badge_service = BadgeService::new(crypto_provider, storage, config.body_hash_config);

        Self { badge_service }
    }
}
