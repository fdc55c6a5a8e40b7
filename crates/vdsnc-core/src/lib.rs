//! Core domain types for VDS-NC verification.
#![deny(warnings, clippy::all, clippy::pedantic)]
#![warn(missing_docs)]

pub mod base64url;
pub mod error;
pub mod types;
pub mod vds;

pub use error::VdsDecodeError;
pub use types::Sha256Digest;
pub use vds::{decode_vds, Header, Message, SignatureAlgorithmId, Vds, VdsData, VdsSignature};
