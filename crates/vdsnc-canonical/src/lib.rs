//! Deterministic JSON canonicalisation.
//!
//! Produces a single byte representation of a JSON value: object keys
//! sorted by UTF-16 code units, no inter-token whitespace, JSON string
//! escapes only where required, and numbers rendered the way ECMAScript's
//! `Number::toString` renders them. The output is the byte string signed
//! by a seal issuer, so byte identity across runs and platforms is the
//! whole point.
#![deny(warnings, clippy::all, clippy::pedantic)]
#![warn(missing_docs)]

pub mod error;
pub mod number;
pub mod serializer;

pub use error::CanonicalizeError;
pub use serializer::{canonicalize, canonicalize_value};
