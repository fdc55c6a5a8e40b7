//! A trust-anchor certificate and its revocation data.

use vdsnc_core::Sha256Digest;
use vdsnc_x509::{pem, Certificate, X509Error};

use crate::crl::Crl;

/// A Country Signing CA certificate as configured by the host: the DER
/// bytes, the SHA-256 the host claims for them, and the CRL covering
/// certificates this CSCA issued.
///
/// The claimed digest is deliberately *not* checked here; the verifier
/// re-computes it on every use so tampering after startup is still
/// caught.
#[derive(Debug, Clone)]
pub struct CscaCertificate {
    der: Vec<u8>,
    sha256: Sha256Digest,
    crl: Crl,
}

impl CscaCertificate {
    /// Build a trust anchor from PEM or DER certificate bytes.
    ///
    /// The input is normalised to DER (the form the declared SHA-256 must
    /// cover) and parsed once so a malformed anchor fails at startup.
    ///
    /// # Errors
    ///
    /// Returns [`X509Error`] when the input is neither a parseable DER
    /// certificate nor a PEM wrapper around one.
    pub fn new(input: &[u8], sha256: Sha256Digest, crl: Crl) -> Result<Self, X509Error> {
        let der = if pem::is_pem(input) {
            pem::decode_certificate(input)?
        } else {
            input.to_vec()
        };
        Certificate::from_der(&der)?;
        Ok(CscaCertificate { der, sha256, crl })
    }

    /// The certificate DER bytes.
    #[must_use]
    pub fn der(&self) -> &[u8] {
        &self.der
    }

    /// The SHA-256 digest the host declared for the DER bytes.
    #[must_use]
    pub fn sha256(&self) -> &Sha256Digest {
        &self.sha256
    }

    /// The CRL covering certificates issued by this CSCA.
    #[must_use]
    pub fn crl(&self) -> &Crl {
        &self.crl
    }

    /// Re-parse the X.509 view.
    ///
    /// # Errors
    ///
    /// Returns [`X509Error`] when the stored DER no longer parses.
    pub fn parse(&self) -> Result<Certificate, X509Error> {
        Certificate::from_der(&self.der)
    }

    /// The subject country attribute, used to match a seal's BSC to its
    /// candidate CSCAs.
    #[must_use]
    pub fn subject_country(&self) -> Option<String> {
        self.parse().ok()?.subject_country()
    }
}
