//! Error types for canonicalisation.

use thiserror::Error;

/// Errors raised while producing the canonical byte form.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CanonicalizeError {
    /// The input text is not valid JSON (this includes lone surrogates in
    /// string escapes, which must never reach the canonical form).
    #[error("input is not valid JSON: {0}")]
    InvalidJson(String),
    /// A number is NaN or infinite and has no canonical representation.
    #[error("non-finite numbers cannot be canonicalised")]
    InvalidNumber,
}
