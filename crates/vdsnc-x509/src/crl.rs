//! Certificate revocation list view.

use chrono::{DateTime, Utc};
use vdsnc_asn1::tag::universal;
use vdsnc_asn1::{Arena, NodeId, Tag};

use crate::error::X509Error;
use crate::name::DistinguishedName;

fn is_time(tag: Tag) -> bool {
    tag.is_universal(universal::UTC_TIME) || tag.is_universal(universal::GENERALIZED_TIME)
}

/// A parsed `CertificateList` (RFC 5280 §5.1).
///
/// The `tbsCertList` fields are resolved once, by walking the SEQUENCE by
/// type: the OPTIONAL `version`, `nextUpdate`, and `revokedCertificates`
/// fields shift later positions, so nothing here trusts a fixed index.
#[derive(Debug)]
pub struct CertificateList {
    arena: Arena,
    root: NodeId,
    tbs: NodeId,
    issuer: Option<NodeId>,
    this_update: Option<NodeId>,
    next_update: Option<NodeId>,
    revoked: Option<NodeId>,
}

impl CertificateList {
    /// Parse a CRL from DER bytes.
    ///
    /// # Errors
    ///
    /// Returns [`X509Error`] if the bytes are not valid DER or the top
    /// level is not the three-element `CertificateList` SEQUENCE.
    pub fn from_der(der: &[u8]) -> Result<Self, X509Error> {
        let arena = Arena::parse(der)?;
        let root = arena.root().ok_or(X509Error::MalformedCertificateList)?;
        if !arena.tag(root).is_universal(universal::SEQUENCE) || arena.children(root).len() < 3 {
            return Err(X509Error::MalformedCertificateList);
        }
        let tbs = arena
            .child(root, 0)
            .ok_or(X509Error::MalformedCertificateList)?;
        if !arena.tag(tbs).is_universal(universal::SEQUENCE) {
            return Err(X509Error::MalformedCertificateList);
        }

        // Typed walk over tbsCertList:
        //   version? INTEGER, signature AlgorithmIdentifier, issuer Name,
        //   thisUpdate Time, nextUpdate? Time, revokedCertificates? SEQ,
        //   crlExtensions? [0].
        let children = arena.children(tbs).to_vec();
        let mut cursor = 0;
        if children
            .first()
            .is_some_and(|&c| arena.tag(c).is_universal(universal::INTEGER))
        {
            cursor += 1;
        }
        // signature AlgorithmIdentifier
        cursor += 1;
        let issuer = children.get(cursor).copied();
        cursor += 1;
        let this_update = children
            .get(cursor)
            .copied()
            .filter(|&c| is_time(arena.tag(c)));
        cursor += 1;
        let next_update = children
            .get(cursor)
            .copied()
            .filter(|&c| is_time(arena.tag(c)));
        if next_update.is_some() {
            cursor += 1;
        }
        let revoked = children
            .get(cursor)
            .copied()
            .filter(|&c| arena.tag(c).is_universal(universal::SEQUENCE));

        Ok(CertificateList {
            arena,
            root,
            tbs,
            issuer,
            this_update,
            next_update,
            revoked,
        })
    }

    /// The exact DER bytes of `tbsCertList`, header included.
    #[must_use]
    pub fn tbs_raw(&self) -> &[u8] {
        self.arena.raw(self.tbs)
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

    /// The CRL issuer name.
    #[must_use]
    pub fn issuer(&self) -> Option<DistinguishedName> {
        self.issuer
            .map(|n| DistinguishedName::from_node(&self.arena, n))
    }

    /// `thisUpdate`.
    #[must_use]
    pub fn this_update(&self) -> Option<DateTime<Utc>> {
        self.arena.time(self.this_update?)
    }

    /// `nextUpdate`, absent on CRLs that do not carry one.
    #[must_use]
    pub fn next_update(&self) -> Option<DateTime<Utc>> {
        self.arena.time(self.next_update?)
    }

    /// The `userCertificate` serial of every revoked entry, leading
    /// zeros stripped. Empty when `revokedCertificates` is absent.
    #[must_use]
    pub fn revoked_serials(&self) -> Vec<&[u8]> {
        let Some(revoked) = self.revoked else {
            return Vec::new();
        };
        self.arena
            .children(revoked)
            .iter()
            .filter_map(|&entry| {
                let serial = self.arena.child(entry, 0)?;
                self.arena.integer_bytes(serial)
            })
            .collect()
    }
}
