//! Public-key loading from `subjectPublicKeyInfo`.

use rsa::pkcs1::DecodeRsaPublicKey as _;
use vdsnc_asn1::tag::universal;
use vdsnc_asn1::Arena;

use crate::error::CryptoError;

/// rsaEncryption.
const RSA_ENCRYPTION: &str = "1.2.840.113549.1.1.1";
/// id-ecPublicKey.
const EC_PUBLIC_KEY: &str = "1.2.840.10045.2.1";
/// prime256v1 / secp256r1.
const SECP256R1: &str = "1.2.840.10045.3.1.7";
/// secp384r1.
const SECP384R1: &str = "1.3.132.0.34";
/// secp521r1.
const SECP521R1: &str = "1.3.132.0.35";

/// A verifying key decoded from an SPKI.
#[derive(Clone)]
pub enum PublicKey {
    /// NIST P-256 ECDSA key.
    EcP256(p256::ecdsa::VerifyingKey),
    /// NIST P-384 ECDSA key.
    EcP384(p384::ecdsa::VerifyingKey),
    /// NIST P-521 ECDSA key.
    EcP521(p521::ecdsa::VerifyingKey),
    /// RSA key.
    Rsa(rsa::RsaPublicKey),
}

impl std::fmt::Debug for PublicKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EcP256(k) => f.debug_tuple("EcP256").field(k).finish(),
            Self::EcP384(k) => f.debug_tuple("EcP384").field(k).finish(),
            Self::EcP521(_) => f.debug_tuple("EcP521").finish(),
            Self::Rsa(k) => f.debug_tuple("Rsa").field(k).finish(),
        }
    }
}

impl PublicKey {
    /// Decode a `subjectPublicKeyInfo` (full DER, tag and length
    /// included): `SEQUENCE { AlgorithmIdentifier, BIT STRING }`.
    ///
    /// # Errors
    ///
    /// Returns [`CryptoError::MalformedSpki`] on structural problems and
    /// [`CryptoError::UnsupportedKey`] for unknown key types or curves.
    pub fn from_spki_der(der: &[u8]) -> Result<Self, CryptoError> {
        let arena =
            Arena::parse(der).map_err(|e| CryptoError::MalformedSpki(e.to_string()))?;
        let root = arena
            .root()
            .filter(|&n| arena.tag(n).is_universal(universal::SEQUENCE))
            .ok_or_else(|| CryptoError::MalformedSpki("not a SEQUENCE".to_owned()))?;
        let alg = arena
            .child(root, 0)
            .ok_or_else(|| CryptoError::MalformedSpki("missing AlgorithmIdentifier".to_owned()))?;
        let alg_oid = arena
            .child(alg, 0)
            .and_then(|n| arena.oid_str(n))
            .ok_or_else(|| CryptoError::MalformedSpki("missing algorithm OID".to_owned()))?;
        let key_bits = arena
            .child(root, 1)
            .and_then(|n| arena.bit_string(n))
            .ok_or_else(|| CryptoError::MalformedSpki("missing subjectPublicKey".to_owned()))?;

        match alg_oid {
            EC_PUBLIC_KEY => {
                let curve_oid = arena
                    .child(alg, 1)
                    .and_then(|n| arena.oid_str(n))
                    .ok_or_else(|| {
                        CryptoError::MalformedSpki("missing EC curve parameters".to_owned())
                    })?;
                match curve_oid {
                    SECP256R1 => p256::ecdsa::VerifyingKey::from_sec1_bytes(key_bits)
                        .map(PublicKey::EcP256)
                        .map_err(|e| CryptoError::MalformedSpki(e.to_string())),
                    SECP384R1 => p384::ecdsa::VerifyingKey::from_sec1_bytes(key_bits)
                        .map(PublicKey::EcP384)
                        .map_err(|e| CryptoError::MalformedSpki(e.to_string())),
                    SECP521R1 => p521::ecdsa::VerifyingKey::from_sec1_bytes(key_bits)
                        .map(PublicKey::EcP521)
                        .map_err(|e| CryptoError::MalformedSpki(e.to_string())),
                    other => Err(CryptoError::UnsupportedKey(format!("EC curve {other}"))),
                }
            }
            RSA_ENCRYPTION => rsa::RsaPublicKey::from_pkcs1_der(key_bits)
                .map(PublicKey::Rsa)
                .map_err(|e| CryptoError::MalformedSpki(e.to_string())),
            other => Err(CryptoError::UnsupportedKey(other.to_owned())),
        }
    }
}
