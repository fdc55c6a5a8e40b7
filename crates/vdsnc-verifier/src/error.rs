//! The verification error taxonomy.

use thiserror::Error;
use vdsnc_core::VdsDecodeError;

/// Every way a seal can fail verification. Flat by design: a host shows
/// exactly one failure reason, the first the pipeline hits.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum VdsVerifyError {
    /// The envelope JSON could not be decoded into the VDS model.
    #[error("VDS JSON decoding failed: {0}")]
    JsonDecoding(String),
    /// No stored CSCA matches the issuing country of the seal's BSC.
    #[error("no CSCA found for the BSC issuing country")]
    NoMatchingCscaFound,
    /// The stored CSCA bytes no longer hash to their declared SHA-256.
    #[error("CSCA certificate hash mismatch")]
    CscaCertHashMismatch,
    /// The CSCA's CRL is missing or not parseable.
    #[error("CRL could not be loaded")]
    LoadCrlFailed,
    /// The CRL signature does not verify under the CSCA key.
    #[error("CRL signature verification failed")]
    VerifyCrlFailed,
    /// The BSC carries no serial number to check against the CRL.
    #[error("BSC certificate has no serial number")]
    BscCertNoSerialNumber,
    /// The BSC's serial number appears in the CRL.
    #[error("BSC certificate is revoked")]
    BscCertRevoked,
    /// The BSC has no authority key identifier.
    #[error("failed to extract the BSC authority key identifier")]
    ExtractBscAkiFailed,
    /// The CSCA has no subject key identifier.
    #[error("failed to extract the CSCA subject key identifier")]
    ExtractCscaSkiFailed,
    /// The BSC AKI does not match the CSCA SKI.
    #[error("BSC authority key identifier does not match the CSCA subject key identifier")]
    BscAkiMismatchCscaSki,
    /// The BSC issuer name does not equal the CSCA subject name.
    #[error("BSC issuer does not match the CSCA subject")]
    IssuerSubjectsDontMatch,
    /// The BSC's own signature does not verify under the CSCA key.
    #[error("BSC signature verification failed")]
    VerifyBscSignatureFailed,
    /// The BSC key or declared algorithm is outside the supported set.
    #[error("BSC key algorithm not supported")]
    BscKeyAlgorithmNotSupported,
    /// The seal signature does not verify over the canonical payload.
    #[error("VDS signature verification failed")]
    VerifyVdsSignatureFailed,
    /// `sig.cer` did not decode into a certificate.
    #[error("failed to parse the BSC certificate from the seal")]
    ParseBscCertFromVdsFailed,
    /// `sig.sigvl` did not decode into signature bytes.
    #[error("failed to parse the signature from the seal")]
    ParseSignatureFromVdsFailed,
    /// The retained seal text failed canonicalisation.
    #[error("failed to canonicalise the seal payload")]
    ParseJsonFailedCanonicalization,
    /// The BSC public key could not be loaded from its SPKI.
    #[error("failed to load the BSC public key")]
    LoadBscPublicKeyDataFailed,
}

impl From<VdsDecodeError> for VdsVerifyError {
    fn from(err: VdsDecodeError) -> Self {
        let VdsDecodeError::JsonDecoding(msg) = err;
        VdsVerifyError::JsonDecoding(msg)
    }
}
