//! Minimal PEM unwrapping for certificate input.

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;

use crate::error::X509Error;

const BEGIN: &str = "-----BEGIN CERTIFICATE-----";
const END: &str = "-----END CERTIFICATE-----";

/// `true` if the input looks like a PEM-armored certificate.
#[must_use]
pub fn is_pem(input: &[u8]) -> bool {
    std::str::from_utf8(input).is_ok_and(|s| s.contains(BEGIN))
}

/// Extract the DER bytes from a `-----BEGIN CERTIFICATE-----` wrapper.
///
/// # Errors
///
/// Returns [`X509Error::InvalidPem`] if the armor lines are missing or the
/// body is not valid base64.
pub fn decode_certificate(input: &[u8]) -> Result<Vec<u8>, X509Error> {
    let text = std::str::from_utf8(input).map_err(|_| X509Error::InvalidPem)?;
    let start = text.find(BEGIN).ok_or(X509Error::InvalidPem)? + BEGIN.len();
    let end = text.find(END).ok_or(X509Error::InvalidPem)?;
    if end < start {
        return Err(X509Error::InvalidPem);
    }
    let body: String = text[start..end].chars().filter(|c| !c.is_whitespace()).collect();
    STANDARD.decode(body).map_err(|_| X509Error::InvalidPem)
}
