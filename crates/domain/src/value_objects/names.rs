//! Validated text newtypes for address fields
//!
//! These newtypes ensure that text is valid by construction:
//! - Non-empty after trimming
//! - Within length limits (name only)
//! - Trimmed of leading/trailing whitespace

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::ValidationError;

/// Maximum length for an address name, in characters.
pub const MAX_ADDRESS_NAME_LENGTH: usize = 255;

// ============================================================================
// AddressName
// ============================================================================

/// A validated address name (non-empty, <=255 chars, trimmed)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct AddressName(String);

impl AddressName {
    /// Create a new validated address name.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` if:
    /// - The name is empty after trimming
    /// - The name exceeds 255 characters after trimming
    pub fn new(name: impl Into<String>) -> Result<Self, ValidationError> {
        let name = name.into();
        let trimmed = name.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::Empty { field: "name" });
        }
        if trimmed.chars().count() > MAX_ADDRESS_NAME_LENGTH {
            return Err(ValidationError::TooLong {
                field: "name",
                max: MAX_ADDRESS_NAME_LENGTH,
            });
        }
        Ok(Self(trimmed.to_string()))
    }

    /// Returns the name as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AddressName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<String> for AddressName {
    type Error = ValidationError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::new(s)
    }
}

impl From<AddressName> for String {
    fn from(name: AddressName) -> String {
        name.0
    }
}

// ============================================================================
// AddressLine
// ============================================================================

/// A validated, required line of an address (street, city, state, country).
///
/// Carries no length limit beyond being non-empty after trimming. The field
/// name is supplied at construction so failures identify the offending field.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AddressLine(String);

impl AddressLine {
    pub fn new(value: impl Into<String>, field: &'static str) -> Result<Self, ValidationError> {
        let value = value.into();
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::Empty { field });
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AddressLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
