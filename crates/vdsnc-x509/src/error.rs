//! Error types for X.509 parsing.

use thiserror::Error;
use vdsnc_asn1::DerError;

/// Errors raised while building a certificate or CRL view.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum X509Error {
    /// The underlying DER could not be decoded.
    #[error("DER decoding failed: {0}")]
    Der(#[from] DerError),
    /// The top-level structure is not `Certificate ::= SEQUENCE { tbs,
    /// algorithm, signature }`.
    #[error("not an X.509 certificate structure")]
    MalformedCertificate,
    /// The top-level structure is not `CertificateList ::= SEQUENCE {
    /// tbs, algorithm, signature }`.
    #[error("not an X.509 certificate list structure")]
    MalformedCertificateList,
    /// A PEM wrapper was detected but could not be unwrapped.
    #[error("invalid PEM wrapper")]
    InvalidPem,
}
