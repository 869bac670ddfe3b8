//! Enumerates errors for assertion and badge validation.

use indexmap::IndexMap;
use itertools::Itertools;
use thiserror::Error;

/// Every offending field of a validated document, in field declaration order.
///
/// Messages always contain the field name and either `missing` or `invalid`.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("Validation failed: `{}`", display_fields(.fields))]
pub struct ValidationError {
    fields: IndexMap<String, String>,
}

fn display_fields(fields: &IndexMap<String, String>) -> String {
    fields.values().join("; ")
}

impl ValidationError {
    pub(crate) fn new(fields: IndexMap<String, String>) -> Self {
        Self { fields }
    }

    /// Field name to message mapping.
    pub fn fields(&self) -> &IndexMap<String, String> {
        &self.fields
    }

    pub fn field(&self, name: &str) -> Option<&str> {
        self.fields.get(name).map(String::as_str)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.fields.contains_key(name)
    }

    /// Offending field names, in the order they were reported.
    pub fn field_names(&self) -> Vec<&str> {
        self.fields.keys().map(String::as_str).collect()
    }
}
