//! Row store contract for saved badges.
//!
//! The store owns identity generation: every inserted row receives a new positive id.
//! Implementations do not re-validate rows and report their own failures, such as
//! uniqueness constraint violations, as [`BadgeStorageError`].

use time::OffsetDateTime;

use crate::common_models::badge::{BadgeId, BadgeType};
use error::BadgeStorageError;

pub mod error;
pub mod in_memory;


#[cfg_attr(any(test, feature = "mock"), mockall::automock)]
#[async_trait::async_trait]
pub trait BadgeStorage: Send + Sync {
    /// Inserts one row and returns the generated identity.
    async fn insert(&self, row: BadgeRow) -> Result<BadgeId, BadgeStorageError>;

    async fn get(&self, id: BadgeId) -> Result<Option<StoredBadge>, BadgeStorageError>;

    async fn get_by_body_hash(
        &self,
        body_hash: &str,
    ) -> Result<Option<StoredBadge>, BadgeStorageError>;
}

/// Serialized fields of a validated badge.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct BadgeRow {
    pub badge_type: BadgeType,
    pub endpoint: Option<String>,
    pub image_path: String,
    pub jwt: Option<String>,
    /// Assertion document serialized as JSON.
    pub body: Option<String>,
    pub body_hash: Option<String>,
    pub created_date: OffsetDateTime,
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct StoredBadge {
    pub id: BadgeId,
    pub row: BadgeRow,
}
