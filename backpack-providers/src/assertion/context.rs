use std::fmt::Display;

use indexmap::IndexMap;
use serde_json::{Map, Value};

use super::error::ValidationError;

/// Presence of a single field: an absent key and a JSON `null` are both `Missing`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Field<T> {
    Missing,
    Present(T),
}

impl<'a> Field<&'a Value> {
    pub fn lookup(object: &'a Map<String, Value>, key: &str) -> Self {
        Self::from_json(object.get(key))
    }

    pub fn from_json(value: Option<&'a Value>) -> Self {
        match value {
            None | Some(Value::Null) => Field::Missing,
            Some(value) => Field::Present(value),
        }
    }
}

impl<T> From<Option<T>> for Field<T> {
    fn from(value: Option<T>) -> Self {
        match value {
            None => Field::Missing,
            Some(value) => Field::Present(value),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Presence {
    Required,
    Optional,
}

/// Collects `(field, message)` pairs across all checks of one document.
///
/// The first message recorded for a field wins, so keys never repeat and keep the
/// order in which the checks ran.
#[derive(Debug, Default)]
pub struct ValidationContext {
    fields: IndexMap<String, String>,
}

impl ValidationContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn missing(&mut self, field: &str) {
        self.record(field, format!("{field} is missing"));
    }

    pub fn invalid(&mut self, field: &str) {
        self.record(field, format!("{field} is invalid"));
    }

    pub fn invalid_because(&mut self, field: &str, reason: impl Display) {
        self.record(field, format!("{field} is invalid: {reason}"));
    }

    fn record(&mut self, field: &str, message: String) {
        self.fields.entry(field.to_owned()).or_insert(message);
    }

    pub fn has_errors(&self) -> bool {
        !self.fields.is_empty()
    }

    /// Field names recorded so far.
    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    pub fn finish(self) -> Result<(), ValidationError> {
        self.finish_with(())
    }

    /// Returns `value` when no error was recorded.
    pub fn finish_with<T>(self, value: T) -> Result<T, ValidationError> {
        if self.fields.is_empty() {
            Ok(value)
        } else {
            Err(ValidationError::new(self.fields))
        }
    }

    /// Converts the recorded fields into an error; callers check [`Self::has_errors`] first.
    pub fn into_error(self) -> ValidationError {
        ValidationError::new(self.fields)
    }

    fn check_presence<T>(&mut self, field: &str, value: Field<T>, presence: Presence) -> Option<T> {
        match value {
            Field::Present(value) => Some(value),
            Field::Missing => {
                if presence == Presence::Required {
                    self.missing(field);
                }
                None
            }
        }
    }

    /// Checks a plain string field.
    pub fn check_str<'a>(
        &mut self,
        field: &str,
        value: Field<&'a str>,
        presence: Presence,
        is_valid: impl Fn(&str) -> bool,
    ) -> Option<&'a str> {
        let value = self.check_presence(field, value, presence)?;
        if is_valid(value) {
            Some(value)
        } else {
            self.invalid(field);
            None
        }
    }

    /// Checks a JSON field that must hold a string.
    pub fn check_text<'a>(
        &mut self,
        field: &str,
        value: Field<&'a Value>,
        presence: Presence,
        is_valid: impl Fn(&str) -> bool,
    ) -> Option<&'a str> {
        match self.check_presence(field, value, presence)? {
            Value::String(text) => {
                self.check_str(field, Field::Present(text.as_str()), presence, is_valid)
            }
            _ => {
                self.invalid(field);
                None
            }
        }
    }

    /// Checks a JSON field of any shape.
    pub fn check_value<'a>(
        &mut self,
        field: &str,
        value: Field<&'a Value>,
        presence: Presence,
        is_valid: impl Fn(&Value) -> bool,
    ) -> Option<&'a Value> {
        let value = self.check_presence(field, value, presence)?;
        if is_valid(value) {
            Some(value)
        } else {
            self.invalid(field);
            None
        }
    }

    /// Checks a JSON field that must hold an object.
    pub fn check_object<'a>(
        &mut self,
        field: &str,
        value: Field<&'a Value>,
        presence: Presence,
    ) -> Option<&'a Map<String, Value>> {
        match self.check_presence(field, value, presence)? {
            Value::Object(object) => Some(object),
            _ => {
                self.invalid(field);
                None
            }
        }
    }
}
