//! Error types for cryptographic operations.

use thiserror::Error;

/// Errors that can occur while loading keys or verifying signatures.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CryptoError {
    /// The signature-algorithm OID is not one of the supported schemes.
    ///
    /// This includes the bare `ecPublicKey` OID (1.2.840.10045.2.1): it
    /// names a key type, not a signing algorithm, and is rejected here.
    #[error("unsupported signature algorithm OID: {0}")]
    UnsupportedAlgorithm(String),
    /// The SPKI names a key type or curve that is not supported.
    #[error("unsupported public key type: {0}")]
    UnsupportedKey(String),
    /// The `subjectPublicKeyInfo` structure could not be decoded.
    #[error("malformed subjectPublicKeyInfo: {0}")]
    MalformedSpki(String),
    /// The signature bytes are not a valid encoding for the key's curve.
    #[error("malformed signature encoding")]
    MalformedSignature,
    /// The scheme and the key disagree (e.g. an RSA scheme with an EC
    /// key).
    #[error("signature scheme does not match the key type")]
    SchemeKeyMismatch,
    /// The signature does not verify over the message.
    #[error("signature verification failed")]
    VerificationFailed,
}
