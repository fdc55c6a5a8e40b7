//! Certificate view.

use chrono::{DateTime, Utc};
use vdsnc_asn1::tag::universal;
use vdsnc_asn1::{Arena, NodeId};

use crate::error::X509Error;
use crate::name::DistinguishedName;
use crate::oid;
use crate::pem;

/// A parsed X.509 certificate.
///
/// Owns the DER arena; field accessors resolve lazily so structurally
/// unusual certificates surface their problems at the access site, where
/// the verifier maps them to its own error kinds.
#[derive(Debug)]
pub struct Certificate {
    arena: Arena,
    root: NodeId,
    tbs: NodeId,
}

impl Certificate {
    /// Parse a certificate from DER bytes.
    ///
    /// # Errors
    ///
    /// Returns [`X509Error`] if the bytes are not valid DER or the top
    /// level is not the three-element `Certificate` SEQUENCE.
    pub fn from_der(der: &[u8]) -> Result<Self, X509Error> {
        let arena = Arena::parse(der)?;
        let root = arena.root().ok_or(X509Error::MalformedCertificate)?;
        let root_tag = arena.tag(root);
        if !root_tag.is_universal(universal::SEQUENCE) || arena.children(root).len() < 3 {
            return Err(X509Error::MalformedCertificate);
        }
        let tbs = arena.child(root, 0).ok_or(X509Error::MalformedCertificate)?;
        if !arena.tag(tbs).is_universal(universal::SEQUENCE) {
            return Err(X509Error::MalformedCertificate);
        }
        Ok(Certificate { arena, root, tbs })
    }

    /// Parse a certificate from DER bytes or a PEM wrapper.
    ///
    /// # Errors
    ///
    /// Returns [`X509Error`] on invalid PEM armor or invalid DER.
    pub fn from_pem_or_der(input: &[u8]) -> Result<Self, X509Error> {
        if pem::is_pem(input) {
            Self::from_der(&pem::decode_certificate(input)?)
        } else {
            Self::from_der(input)
        }
    }

    /// The exact DER bytes of `tbsCertificate`, header included.
    #[must_use]
    pub fn tbs_raw(&self) -> &[u8] {
        self.arena.raw(self.tbs)
    }

    /// Offset of the first `tbsCertificate` field after the optional
    /// `[0]` version.
    fn version_offset(&self) -> usize {
        usize::from(
            self.arena
                .child(self.tbs, 0)
                .is_some_and(|c| self.arena.tag(c).is_context(0)),
        )
    }

    fn field(&self, index: usize) -> Option<NodeId> {
        self.arena.child(self.tbs, self.version_offset() + index)
    }

    /// The certificate version (0-based, so v3 reads as 2), when the
    /// optional `[0]` field is present.
    #[must_use]
    pub fn version(&self) -> Option<u64> {
        let wrapper = self
            .arena
            .child(self.tbs, 0)
            .filter(|&c| self.arena.tag(c).is_context(0))?;
        let bytes = self
            .arena
            .integer_bytes(self.arena.child(wrapper, 0)?)?;
        if bytes.len() > 8 {
            return None;
        }
        Some(bytes.iter().fold(0u64, |acc, &b| (acc << 8) | u64::from(b)))
    }

    /// `serialNumber` contents, leading zeros stripped.
    #[must_use]
    pub fn serial_number(&self) -> Option<&[u8]> {
        self.field(0).and_then(|n| self.arena.integer_bytes(n))
    }

    /// The issuer name.
    #[must_use]
    pub fn issuer(&self) -> Option<DistinguishedName> {
        self.field(2)
            .map(|n| DistinguishedName::from_node(&self.arena, n))
    }

    /// The subject name.
    #[must_use]
    pub fn subject(&self) -> Option<DistinguishedName> {
        self.field(4)
            .map(|n| DistinguishedName::from_node(&self.arena, n))
    }

    /// Start of the validity window.
    #[must_use]
    pub fn not_before(&self) -> Option<DateTime<Utc>> {
        let validity = self.field(3)?;
        self.arena.time(self.arena.child(validity, 0)?)
    }

    /// End of the validity window.
    #[must_use]
    pub fn not_after(&self) -> Option<DateTime<Utc>> {
        let validity = self.field(3)?;
        self.arena.time(self.arena.child(validity, 1)?)
    }

    /// The outer `signatureAlgorithm` OID.
    #[must_use]
    pub fn signature_algorithm_oid(&self) -> Option<&str> {
        let alg = self.arena.child(self.root, 1)?;
        self.arena.oid_str(self.arena.child(alg, 0)?)
    }

    /// The `signatureValue` BIT STRING contents.
    #[must_use]
    pub fn signature(&self) -> Option<&[u8]> {
        self.arena.bit_string(self.arena.child(self.root, 2)?)
    }

    /// The full `subjectPublicKeyInfo` encoding, tag and length included.
    #[must_use]
    pub fn subject_public_key_info_der(&self) -> Option<&[u8]> {
        self.field(5).map(|n| self.arena.raw(n))
    }

    /// The algorithm OID inside `subjectPublicKeyInfo`.
    #[must_use]
    pub fn spki_algorithm_oid(&self) -> Option<&str> {
        let spki = self.field(5)?;
        let alg = self.arena.child(spki, 0)?;
        self.arena.oid_str(self.arena.child(alg, 0)?)
    }

    /// The `extnValue` OCTET STRING node of the extension with the given
    /// OID, or `None` when absent.
    #[must_use]
    pub fn extension(&self, dotted: &str) -> Option<NodeId> {
        // Extensions live inside the [3] EXPLICIT wrapper at the end of
        // tbsCertificate.
        let wrapper = self
            .arena
            .children(self.tbs)
            .iter()
            .copied()
            .find(|&c| self.arena.tag(c).is_context(3))?;
        let list = self.arena.child(wrapper, 0)?;
        for &ext in self.arena.children(list) {
            let Some(oid_node) = self.arena.child(ext, 0) else {
                continue;
            };
            if self.arena.oid_str(oid_node) == Some(dotted) {
                // Last child skips the optional `critical` BOOLEAN.
                let count = self.arena.children(ext).len();
                return self.arena.child(ext, count - 1);
            }
        }
        None
    }

    /// `subjectKeyIdentifier`: the inner OCTET STRING contents.
    #[must_use]
    pub fn subject_key_identifier(&self) -> Option<&[u8]> {
        let value = self.extension(oid::SUBJECT_KEY_IDENTIFIER)?;
        let inner = self.arena.child(value, 0)?;
        if self.arena.tag(inner).is_universal(universal::OCTET_STRING) {
            Some(self.arena.body(inner))
        } else {
            None
        }
    }

    /// `authorityKeyIdentifier`: the `[0]` IMPLICIT `keyIdentifier`
    /// contents.
    #[must_use]
    pub fn authority_key_identifier(&self) -> Option<&[u8]> {
        let value = self.extension(oid::AUTHORITY_KEY_IDENTIFIER)?;
        let aki = self.arena.child(value, 0)?;
        self.arena
            .children(aki)
            .iter()
            .copied()
            .find(|&c| self.arena.tag(c).is_context(0))
            .map(|c| self.arena.body(c))
    }

    /// The issuer's country attribute (OID 2.5.4.6).
    #[must_use]
    pub fn issuer_country(&self) -> Option<String> {
        self.issuer()?
            .first_value(oid::COUNTRY_NAME)
            .map(ToOwned::to_owned)
    }

    /// The subject's country attribute (OID 2.5.4.6).
    #[must_use]
    pub fn subject_country(&self) -> Option<String> {
        self.subject()?
            .first_value(oid::COUNTRY_NAME)
            .map(ToOwned::to_owned)
    }
}
