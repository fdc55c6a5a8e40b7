//! The ordered verification pipeline.

use log::debug;

use vdsnc_canonical::canonicalize_value;
use vdsnc_core::{base64url, SignatureAlgorithmId, Vds};
use vdsnc_crypto::{sha256_hex, verify as crypto_verify, HashAlgorithm, PublicKey,
    SignatureBytes, SignatureScheme};
use vdsnc_trust::{CscaCertificate, TrustStore};
use vdsnc_x509::{Certificate, CertificateList};

use crate::error::VdsVerifyError;

/// Verify a decoded seal against the trust store.
///
/// The checks run strictly in order; the first failure is the result.
/// Candidate CSCAs (same subject country as the BSC issuer) are tried in
/// store order, gated by the SHA-256 integrity check; once one is
/// adopted, every later failure is final.
///
/// # Errors
///
/// One [`VdsVerifyError`] kind per failed check; see the error type.
pub fn verify(vds: &Vds, store: &TrustStore) -> Result<(), VdsVerifyError> {
    // Decode the BSC out of the envelope.
    let bsc_der = base64url::decode(&vds.sig.cer)
        .map_err(|_| VdsVerifyError::ParseBscCertFromVdsFailed)?;
    let bsc = Certificate::from_der(&bsc_der)
        .map_err(|_| VdsVerifyError::ParseBscCertFromVdsFailed)?;
    let issuing_country = bsc
        .issuer_country()
        .ok_or(VdsVerifyError::NoMatchingCscaFound)?;
    debug!("BSC issuing country: {issuing_country}");

    // Candidate selection: CSCAs whose subject country matches, gated by
    // the integrity check. When no candidate passes the gate, the first
    // candidate's failure is the verdict.
    let candidates: Vec<(&CscaCertificate, Certificate)> = store
        .certificates()
        .iter()
        .filter_map(|csca| {
            let parsed = csca.parse().ok()?;
            (parsed.subject_country().as_deref() == Some(issuing_country.as_str()))
                .then_some((csca, parsed))
        })
        .collect();
    if candidates.is_empty() {
        return Err(VdsVerifyError::NoMatchingCscaFound);
    }

    let mut first_failure = None;
    let mut adopted = None;
    for (csca, parsed) in candidates {
        match check_integrity(csca) {
            Ok(()) => {
                adopted = Some((csca, parsed));
                break;
            }
            Err(e) => {
                first_failure.get_or_insert(e);
            }
        }
    }
    let Some((csca, csca_cert)) = adopted else {
        return Err(first_failure.unwrap_or(VdsVerifyError::NoMatchingCscaFound));
    };
    debug!("adopted CSCA: {}", csca.sha256());

    // CRL signature under the CSCA key.
    let crl_bytes = csca.crl().data().ok_or(VdsVerifyError::LoadCrlFailed)?;
    let crl =
        CertificateList::from_der(&crl_bytes).map_err(|_| VdsVerifyError::LoadCrlFailed)?;
    let csca_key = csca_cert
        .subject_public_key_info_der()
        .ok_or(VdsVerifyError::VerifyCrlFailed)
        .and_then(|spki| {
            PublicKey::from_spki_der(spki).map_err(|_| VdsVerifyError::VerifyCrlFailed)
        })?;
    let crl_scheme = crl
        .signature_algorithm_oid()
        .and_then(|o| SignatureScheme::from_oid(o).ok())
        .ok_or(VdsVerifyError::VerifyCrlFailed)?;
    let crl_sig = crl.signature().ok_or(VdsVerifyError::VerifyCrlFailed)?;
    crypto_verify(
        &csca_key,
        crl_scheme,
        crl.tbs_raw(),
        SignatureBytes::Der(crl_sig),
    )
    .map_err(|_| VdsVerifyError::VerifyCrlFailed)?;
    debug!("CRL signature verified");

    // BSC must not be revoked.
    let serial = bsc
        .serial_number()
        .ok_or(VdsVerifyError::BscCertNoSerialNumber)?;
    if crl.revoked_serials().iter().any(|s| *s == serial) {
        return Err(VdsVerifyError::BscCertRevoked);
    }

    // Key-identifier linkage.
    let aki = bsc
        .authority_key_identifier()
        .ok_or(VdsVerifyError::ExtractBscAkiFailed)?;
    let ski = csca_cert
        .subject_key_identifier()
        .ok_or(VdsVerifyError::ExtractCscaSkiFailed)?;
    if aki != ski {
        return Err(VdsVerifyError::BscAkiMismatchCscaSki);
    }

    // Name linkage and the BSC's own signature.
    let bsc_issuer = bsc
        .issuer()
        .ok_or(VdsVerifyError::IssuerSubjectsDontMatch)?;
    let csca_subject = csca_cert
        .subject()
        .ok_or(VdsVerifyError::IssuerSubjectsDontMatch)?;
    if bsc_issuer != csca_subject {
        return Err(VdsVerifyError::IssuerSubjectsDontMatch);
    }
    let bsc_scheme = bsc
        .signature_algorithm_oid()
        .ok_or(VdsVerifyError::VerifyBscSignatureFailed)
        .and_then(|o| {
            SignatureScheme::from_oid(o)
                .map_err(|_| VdsVerifyError::BscKeyAlgorithmNotSupported)
        })?;
    let bsc_sig = bsc
        .signature()
        .ok_or(VdsVerifyError::VerifyBscSignatureFailed)?;
    crypto_verify(
        &csca_key,
        bsc_scheme,
        bsc.tbs_raw(),
        SignatureBytes::Der(bsc_sig),
    )
    .map_err(|_| VdsVerifyError::VerifyBscSignatureFailed)?;
    debug!("BSC signature verified");

    // Finally, the seal signature over the canonical payload, always
    // derived from the retained original text.
    let envelope: serde_json::Value = serde_json::from_str(vds.original_text())
        .map_err(|_| VdsVerifyError::ParseJsonFailedCanonicalization)?;
    let data = envelope
        .get("data")
        .ok_or(VdsVerifyError::ParseJsonFailedCanonicalization)?;
    let canonical =
        canonicalize_value(data).map_err(|_| VdsVerifyError::ParseJsonFailedCanonicalization)?;

    let seal_sig = base64url::decode(&vds.sig.sigvl)
        .map_err(|_| VdsVerifyError::ParseSignatureFromVdsFailed)?;
    let bsc_key = bsc
        .subject_public_key_info_der()
        .ok_or(VdsVerifyError::LoadBscPublicKeyDataFailed)
        .and_then(|spki| {
            PublicKey::from_spki_der(spki)
                .map_err(|_| VdsVerifyError::LoadBscPublicKeyDataFailed)
        })?;
    let seal_scheme = seal_scheme(vds.sig.alg, &bsc_key)?;
    crypto_verify(
        &bsc_key,
        seal_scheme,
        &canonical,
        SignatureBytes::Raw(&seal_sig),
    )
    .map_err(|_| VdsVerifyError::VerifyVdsSignatureFailed)?;
    debug!("seal signature verified");

    Ok(())
}

fn check_integrity(csca: &CscaCertificate) -> Result<(), VdsVerifyError> {
    if sha256_hex(csca.der()) == csca.sha256().as_hex() {
        Ok(())
    } else {
        Err(VdsVerifyError::CscaCertHashMismatch)
    }
}

/// The declared seal algorithm fixes both curve and hash; the BSC key
/// must be on that curve.
fn seal_scheme(
    alg: SignatureAlgorithmId,
    key: &PublicKey,
) -> Result<SignatureScheme, VdsVerifyError> {
    match (alg, key) {
        (SignatureAlgorithmId::Es256, PublicKey::EcP256(_)) => {
            Ok(SignatureScheme::Ecdsa(HashAlgorithm::Sha256))
        }
        (SignatureAlgorithmId::Es384, PublicKey::EcP384(_)) => {
            Ok(SignatureScheme::Ecdsa(HashAlgorithm::Sha384))
        }
        (SignatureAlgorithmId::Es512, PublicKey::EcP521(_)) => {
            Ok(SignatureScheme::Ecdsa(HashAlgorithm::Sha512))
        }
        _ => Err(VdsVerifyError::BscKeyAlgorithmNotSupported),
    }
}
