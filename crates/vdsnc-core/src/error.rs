//! Error types for envelope decoding.

use thiserror::Error;

/// Errors that can occur while decoding a VDS envelope.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum VdsDecodeError {
    /// The input is not a structurally valid VDS JSON envelope: a missing
    /// required field, a wrong type, an unknown signature algorithm, or
    /// text that is not JSON at all.
    #[error("VDS JSON decoding failed: {0}")]
    JsonDecoding(String),
}
