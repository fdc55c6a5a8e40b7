//! Signature-algorithm OIDs and their scheme mapping.

use crate::error::CryptoError;
use crate::hash::HashAlgorithm;

/// sha256WithRSAEncryption.
pub const SHA256_WITH_RSA: &str = "1.2.840.113549.1.1.11";
/// ecdsa-with-SHA256.
pub const ECDSA_WITH_SHA256: &str = "1.2.840.10045.4.3.2";
/// ecdsa-with-SHA384.
pub const ECDSA_WITH_SHA384: &str = "1.2.840.10045.4.3.3";
/// ecdsa-with-SHA512.
pub const ECDSA_WITH_SHA512: &str = "1.2.840.10045.4.3.4";
/// id-ecPublicKey — a key type, deliberately not accepted as a signature
/// algorithm.
pub const EC_PUBLIC_KEY: &str = "1.2.840.10045.2.1";

/// A supported signature scheme, as named by a certificate or CRL
/// `signatureAlgorithm` field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SignatureScheme {
    /// ECDSA over the named hash; the curve comes from the verifying key.
    Ecdsa(HashAlgorithm),
    /// RSA PKCS#1 v1.5 over the named hash.
    RsaPkcs1V15(HashAlgorithm),
}

impl SignatureScheme {
    /// Map a dotted signature-algorithm OID to a scheme.
    ///
    /// # Errors
    ///
    /// Returns [`CryptoError::UnsupportedAlgorithm`] for every OID outside
    /// the supported set, including `ecPublicKey`.
    pub fn from_oid(dotted: &str) -> Result<Self, CryptoError> {
        match dotted {
            SHA256_WITH_RSA => Ok(SignatureScheme::RsaPkcs1V15(HashAlgorithm::Sha256)),
            ECDSA_WITH_SHA256 => Ok(SignatureScheme::Ecdsa(HashAlgorithm::Sha256)),
            ECDSA_WITH_SHA384 => Ok(SignatureScheme::Ecdsa(HashAlgorithm::Sha384)),
            ECDSA_WITH_SHA512 => Ok(SignatureScheme::Ecdsa(HashAlgorithm::Sha512)),
            other => Err(CryptoError::UnsupportedAlgorithm(other.to_owned())),
        }
    }

    /// The hash this scheme runs over the message.
    #[must_use]
    pub fn hash(self) -> HashAlgorithm {
        match self {
            SignatureScheme::Ecdsa(h) | SignatureScheme::RsaPkcs1V15(h) => h,
        }
    }
}
