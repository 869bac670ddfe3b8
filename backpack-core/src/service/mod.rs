//! Services for working with badges.

pub mod badge_service;
pub mod error;
