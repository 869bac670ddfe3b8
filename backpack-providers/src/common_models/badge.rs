use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

use crate::common_models::macros::{impl_display, impl_from, impl_into};

/// Store-generated identity of a saved badge. Always positive.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
#[repr(transparent)]
pub struct BadgeId(u64);
impl_display!(BadgeId);
impl_from!(BadgeId; u64);
impl_into!(BadgeId; u64);

impl BadgeId {
    pub fn as_u64(&self) -> u64 {
        self.0
    }
}

/// How the assertion of a badge is delivered.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, Serialize, Deserialize, Display, EnumString)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum BadgeType {
    /// Assertion fetched from `endpoint`, fingerprinted by `body_hash`.
    Hosted,
    /// Assertion embedded in a signed token (`jwt`).
    Signed,
}
