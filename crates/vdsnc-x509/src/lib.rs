//! Typed views over X.509 certificates and CRLs.
//!
//! A [`Certificate`] or [`CertificateList`] owns a parsed DER arena and
//! resolves the RFC 5280 fields by walking the `tbsCertificate` /
//! `tbsCertList` SEQUENCEs by type, so the OPTIONAL `version`,
//! `nextUpdate`, and `revokedCertificates` fields are handled without
//! fragile positional indexing.
#![deny(warnings, clippy::all, clippy::pedantic)]
#![warn(missing_docs)]

pub mod cert;
pub mod crl;
pub mod error;
pub mod name;
pub mod oid;
pub mod pem;

pub use cert::Certificate;
pub use crl::CertificateList;
pub use error::X509Error;
pub use name::DistinguishedName;
