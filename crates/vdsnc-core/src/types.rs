//! Validated newtype wrappers for core domain primitives.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error returned when a domain value fails validation.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    /// The hex string is not the expected length.
    #[error("expected 64 hex characters, got {0}")]
    InvalidHexLength(usize),
    /// The hex string contains non-hex characters.
    #[error("value contains non-hex characters")]
    InvalidHex,
}

/// A validated SHA-256 hex digest (exactly 64 hex characters, stored
/// lower-case).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Sha256Digest(String);

impl Sha256Digest {
    /// Parse a `Sha256Digest` from a hex string.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError`] if the string is not exactly 64 hex
    /// characters.
    pub fn from_hex(hex: &str) -> Result<Self, ValidationError> {
        if hex.len() != 64 {
            return Err(ValidationError::InvalidHexLength(hex.len()));
        }
        if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(ValidationError::InvalidHex);
        }
        Ok(Self(hex.to_ascii_lowercase()))
    }

    /// Return the hex string representation.
    #[must_use]
    pub fn as_hex(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Sha256Digest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
