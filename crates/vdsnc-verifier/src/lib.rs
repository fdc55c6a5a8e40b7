//! The VDS-NC verification pipeline.
//!
//! [`verify`] runs the ordered security checks over a decoded seal and a
//! [`vdsnc_trust::TrustStore`]: CSCA integrity, CRL signature, BSC
//! revocation, BSC↔CSCA linkage, and finally the seal signature over the
//! canonical payload. The first failing check decides the returned error.
#![deny(warnings, clippy::all, clippy::pedantic)]
#![warn(missing_docs)]

pub mod error;
pub mod verifier;

pub use error::VdsVerifyError;
pub use verifier::verify;
