//! Error types for DER decoding.

use thiserror::Error;

/// Errors that can occur while decoding a DER byte stream.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum DerError {
    /// The input ended before a complete tag, length, or body was read.
    #[error("input truncated at offset {0}")]
    Truncated(usize),
    /// A long-form length does not fit in `usize`.
    #[error("length overflow at offset {0}")]
    LengthOverflow(usize),
    /// A primitive node declared an indefinite length.
    #[error("indefinite length on a primitive node at offset {0}")]
    IndefinitePrimitive(usize),
    /// The nesting depth exceeded the decoder's hard cap.
    #[error("nesting exceeds {0} levels")]
    TooDeep(usize),
    /// A primitive body is not a valid encoding for its universal tag.
    #[error("malformed {what} at offset {offset}")]
    Malformed {
        /// Which construct was malformed (e.g. `"OBJECT IDENTIFIER"`).
        what: &'static str,
        /// Byte offset of the malformed node's header.
        offset: usize,
    },
}
