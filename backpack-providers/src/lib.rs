//! Validation and persistence providers for badge credentials.
//!
//! Assertion documents and badge records are validated here, and a [`badge_storage::BadgeStorage`]
//! contract abstracts over the store that assigns badge identities.

pub mod assertion;
pub mod badge;
pub mod badge_storage;
pub mod common_models;
pub mod field_validator;

#[cfg(any(test, feature = "mock"))]
pub mod test_fixture;
