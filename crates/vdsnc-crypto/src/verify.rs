//! Signature verification over a message.

use p256::ecdsa::signature::hazmat::PrehashVerifier as _;
use rsa::Pkcs1v15Sign;
use sha2::Sha256;

use crate::error::CryptoError;
use crate::hash::{digest, HashAlgorithm};
use crate::key::PublicKey;
use crate::scheme::SignatureScheme;

/// The two signature encodings seen in a seal: certificates and CRLs
/// carry ASN.1 `ECDSA-Sig-Value` structures, while the seal itself
/// carries the raw fixed-width `(r ‖ s)` concatenation.
#[derive(Debug, Clone, Copy)]
pub enum SignatureBytes<'a> {
    /// Raw `(r ‖ s)`, each component exactly the curve width.
    Raw(&'a [u8]),
    /// DER-encoded `ECDSA-Sig-Value` (or, for RSA, the plain signature
    /// octets).
    Der(&'a [u8]),
}

impl<'a> SignatureBytes<'a> {
    fn bytes(self) -> &'a [u8] {
        match self {
            SignatureBytes::Raw(b) | SignatureBytes::Der(b) => b,
        }
    }
}

/// Verify `signature` over `message` with `key`, hashing per `scheme`.
///
/// ECDSA signatures in either encoding are normalised into the curve's
/// signature type and checked against the message digest, so any
/// hash/curve pairing named by the OID table works (e.g. a SHA-256 CRL
/// signature under a P-384 CSCA key).
///
/// # Errors
///
/// Returns [`CryptoError::SchemeKeyMismatch`] when scheme and key type
/// disagree, [`CryptoError::MalformedSignature`] when the signature bytes
/// do not decode for the key's curve, and
/// [`CryptoError::VerificationFailed`] when the signature does not match.
pub fn verify(
    key: &PublicKey,
    scheme: SignatureScheme,
    message: &[u8],
    signature: SignatureBytes<'_>,
) -> Result<(), CryptoError> {
    let hashed = digest(scheme.hash(), message);
    match (key, scheme) {
        (PublicKey::EcP256(vk), SignatureScheme::Ecdsa(_)) => {
            let sig = p256_sig(signature)?;
            vk.verify_prehash(&hashed, &sig)
                .map_err(|_| CryptoError::VerificationFailed)
        }
        (PublicKey::EcP384(vk), SignatureScheme::Ecdsa(_)) => {
            let sig = p384_sig(signature)?;
            vk.verify_prehash(&hashed, &sig)
                .map_err(|_| CryptoError::VerificationFailed)
        }
        (PublicKey::EcP521(vk), SignatureScheme::Ecdsa(_)) => {
            let sig = p521_sig(signature)?;
            vk.verify_prehash(&hashed, &sig)
                .map_err(|_| CryptoError::VerificationFailed)
        }
        (PublicKey::Rsa(pk), SignatureScheme::RsaPkcs1V15(HashAlgorithm::Sha256)) => pk
            .verify(Pkcs1v15Sign::new::<Sha256>(), &hashed, signature.bytes())
            .map_err(|_| CryptoError::VerificationFailed),
        _ => Err(CryptoError::SchemeKeyMismatch),
    }
}

fn p256_sig(signature: SignatureBytes<'_>) -> Result<p256::ecdsa::Signature, CryptoError> {
    match signature {
        SignatureBytes::Raw(bytes) => p256::ecdsa::Signature::from_slice(bytes),
        SignatureBytes::Der(bytes) => p256::ecdsa::Signature::from_der(bytes),
    }
    .map_err(|_| CryptoError::MalformedSignature)
}

fn p384_sig(signature: SignatureBytes<'_>) -> Result<p384::ecdsa::Signature, CryptoError> {
    match signature {
        SignatureBytes::Raw(bytes) => p384::ecdsa::Signature::from_slice(bytes),
        SignatureBytes::Der(bytes) => p384::ecdsa::Signature::from_der(bytes),
    }
    .map_err(|_| CryptoError::MalformedSignature)
}

fn p521_sig(signature: SignatureBytes<'_>) -> Result<p521::ecdsa::Signature, CryptoError> {
    match signature {
        SignatureBytes::Raw(bytes) => p521::ecdsa::Signature::from_slice(bytes),
        SignatureBytes::Der(bytes) => p521::ecdsa::Signature::from_der(bytes),
    }
    .map_err(|_| CryptoError::MalformedSignature)
}
