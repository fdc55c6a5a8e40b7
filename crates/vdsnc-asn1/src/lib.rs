//! Arena-based DER/ASN.1 decoder.
//!
//! Parses a DER byte stream into a forest of tagged nodes stored in an
//! [`Arena`]. Every node records the exact byte range of its encoding so
//! callers can recover `tbsCertificate` / `tbsCertList` bytes verbatim for
//! signature checks.
#![deny(warnings, clippy::all, clippy::pedantic)]
#![warn(missing_docs)]

pub mod arena;
pub mod error;
pub mod tag;
pub mod value;

pub use arena::{Arena, NodeId};
pub use error::DerError;
pub use tag::{Class, Tag};
pub use value::Value;
