//! End-to-end verification scenarios against a miniature PKI assembled
//! in-process: a CSCA, a BSC it issued, a CRL it signed, and seals signed
//! over the canonical payload.

use std::sync::Arc;

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine as _;
use p256::ecdsa::signature::Signer as _;
use vdsnc_core::decode_vds;
use vdsnc_crypto::sha256_hex;
use vdsnc_trust::{Crl, CscaCertificate, MemoryCache, TrustStore, TrustStoreConfig};
use vdsnc_verifier::{verify, VdsVerifyError};

mod build {
    //! Minimal DER construction helpers for assembling test material.

    pub fn tlv(tag: u8, body: &[u8]) -> Vec<u8> {
        let mut out = vec![tag];
        let len = body.len();
        if len < 0x80 {
            out.push(len as u8);
        } else if len <= 0xff {
            out.push(0x81);
            out.push(len as u8);
        } else {
            out.push(0x82);
            out.push((len >> 8) as u8);
            out.push((len & 0xff) as u8);
        }
        out.extend_from_slice(body);
        out
    }

    pub fn seq(parts: &[Vec<u8>]) -> Vec<u8> {
        tlv(0x30, &parts.concat())
    }

    pub fn set(parts: &[Vec<u8>]) -> Vec<u8> {
        tlv(0x31, &parts.concat())
    }

    pub fn ctx(n: u8, body: &[u8]) -> Vec<u8> {
        tlv(0xa0 | n, body)
    }

    pub fn ctx_prim(n: u8, body: &[u8]) -> Vec<u8> {
        tlv(0x80 | n, body)
    }

    pub fn int(body: &[u8]) -> Vec<u8> {
        tlv(0x02, body)
    }

    pub fn octet(body: &[u8]) -> Vec<u8> {
        tlv(0x04, body)
    }

    pub fn bitstring(body: &[u8]) -> Vec<u8> {
        let mut with_unused = vec![0x00];
        with_unused.extend_from_slice(body);
        tlv(0x03, &with_unused)
    }

    pub fn utf8(s: &str) -> Vec<u8> {
        tlv(0x0c, s.as_bytes())
    }

    pub fn utc_time(s: &str) -> Vec<u8> {
        tlv(0x17, s.as_bytes())
    }

    pub fn oid(dotted: &str) -> Vec<u8> {
        let arcs: Vec<u64> = dotted.split('.').map(|a| a.parse().unwrap()).collect();
        let mut body = Vec::new();
        push_base128(&mut body, arcs[0] * 40 + arcs[1]);
        for &arc in &arcs[2..] {
            push_base128(&mut body, arc);
        }
        tlv(0x06, &body)
    }

    fn push_base128(out: &mut Vec<u8>, mut v: u64) {
        let mut chunk = vec![(v & 0x7f) as u8];
        v >>= 7;
        while v > 0 {
            chunk.push((v & 0x7f) as u8 | 0x80);
            v >>= 7;
        }
        chunk.reverse();
        out.extend_from_slice(&chunk);
    }

    pub fn name(attrs: &[(&str, &str)]) -> Vec<u8> {
        let rdns: Vec<Vec<u8>> = attrs
            .iter()
            .map(|(type_oid, value)| set(&[seq(&[oid(type_oid), utf8(value)])]))
            .collect();
        seq(&rdns)
    }

    pub fn alg_id(dotted: &str) -> Vec<u8> {
        seq(&[oid(dotted)])
    }

    pub fn extension(ext_oid: &str, value_der: &[u8]) -> Vec<u8> {
        seq(&[oid(ext_oid), octet(value_der)])
    }
}

mod pki {
    //! Assembles certificates, CRLs, and signed seals.

    use super::build::*;
    use base64::engine::general_purpose::URL_SAFE_NO_PAD;
    use base64::Engine as _;
    use p256::ecdsa::signature::Signer as _;
    use p256::pkcs8::EncodePublicKey as _;
    use rsa::signature::{Keypair as _, SignatureEncoding as _};
    use sha2::Sha256;

    pub const ECDSA_SHA256: &str = "1.2.840.10045.4.3.2";
    pub const SHA256_RSA: &str = "1.2.840.113549.1.1.11";
    pub const CSCA_SKI: [u8; 20] = [0x11; 20];

    pub const CSCA_NAME: &[(&str, &str)] =
        &[("2.5.4.6", "AU"), ("2.5.4.3", "Passport Country Signing Authority")];
    pub const BSC_NAME: &[(&str, &str)] = &[("2.5.4.6", "AU"), ("2.5.4.3", "VDS-NC Signer")];
    pub const BSC_SERIAL: &[u8] = &[0x42, 0x77];

    /// A CA signing key: ECDSA P-256 or RSA PKCS#1 v1.5.
    pub enum CaKey {
        P256(p256::ecdsa::SigningKey),
        Rsa(rsa::pkcs1v15::SigningKey<Sha256>),
    }

    impl CaKey {
        pub fn generate_p256() -> Self {
            CaKey::P256(p256::ecdsa::SigningKey::random(&mut rand::thread_rng()))
        }

        pub fn generate_rsa() -> Self {
            let private = rsa::RsaPrivateKey::new(&mut rand::thread_rng(), 2048).unwrap();
            CaKey::Rsa(rsa::pkcs1v15::SigningKey::new(private))
        }

        pub fn alg_oid(&self) -> &'static str {
            match self {
                CaKey::P256(_) => ECDSA_SHA256,
                CaKey::Rsa(_) => SHA256_RSA,
            }
        }

        /// Certificate-style signature bytes for the BIT STRING.
        pub fn sign(&self, tbs: &[u8]) -> Vec<u8> {
            match self {
                CaKey::P256(sk) => {
                    let sig: p256::ecdsa::Signature = sk.sign(tbs);
                    sig.to_der().as_bytes().to_vec()
                }
                CaKey::Rsa(sk) => {
                    use rsa::signature::Signer as _;
                    sk.sign(tbs).to_bytes().to_vec()
                }
            }
        }

        pub fn spki_der(&self) -> Vec<u8> {
            match self {
                CaKey::P256(sk) => sk
                    .verifying_key()
                    .to_public_key_der()
                    .unwrap()
                    .as_bytes()
                    .to_vec(),
                CaKey::Rsa(sk) => {
                    use rsa::pkcs8::EncodePublicKey as _;
                    sk.verifying_key()
                        .as_ref()
                        .to_public_key_der()
                        .unwrap()
                        .as_bytes()
                        .to_vec()
                }
            }
        }
    }

    pub struct CertSpec<'a> {
        pub serial: &'a [u8],
        pub issuer: &'a [(&'a str, &'a str)],
        pub subject: &'a [(&'a str, &'a str)],
        pub spki_der: Vec<u8>,
        pub ski: Option<&'a [u8]>,
        pub aki: Option<&'a [u8]>,
    }

    pub fn make_cert(spec: &CertSpec<'_>, signer: &CaKey) -> Vec<u8> {
        let mut tbs_fields = vec![
            ctx(0, &int(&[0x02])),
            int(spec.serial),
            alg_id(signer.alg_oid()),
            name(spec.issuer),
            seq(&[utc_time("210101000000Z"), utc_time("310101000000Z")]),
            name(spec.subject),
            spec.spki_der.clone(),
        ];
        let mut exts = Vec::new();
        if let Some(ski) = spec.ski {
            exts.push(extension("2.5.29.14", &octet(ski)));
        }
        if let Some(aki) = spec.aki {
            exts.push(extension("2.5.29.35", &seq(&[ctx_prim(0, aki)])));
        }
        if !exts.is_empty() {
            tbs_fields.push(ctx(3, &seq(&exts)));
        }
        let tbs = seq(&tbs_fields);
        let sig = signer.sign(&tbs);
        seq(&[tbs, alg_id(signer.alg_oid()), bitstring(&sig)])
    }

    pub fn make_crl(
        issuer: &[(&str, &str)],
        revoked: &[&[u8]],
        signer: &CaKey,
    ) -> Vec<u8> {
        let mut tbs_fields = vec![
            int(&[0x01]),
            alg_id(signer.alg_oid()),
            name(issuer),
            utc_time("220301000000Z"),
            utc_time("220401000000Z"),
        ];
        if !revoked.is_empty() {
            let entries: Vec<Vec<u8>> = revoked
                .iter()
                .map(|serial| seq(&[int(serial), utc_time("220310000000Z")]))
                .collect();
            tbs_fields.push(seq(&entries));
        }
        let tbs = seq(&tbs_fields);
        let sig = signer.sign(&tbs);
        seq(&[tbs, alg_id(signer.alg_oid()), bitstring(&sig)])
    }

    /// Sign `data_json` (the exact text of the `data` value) and build
    /// the full envelope text around it.
    pub fn make_seal_text(
        data_json: &str,
        bsc_der: &[u8],
        bsc_key: &p256::ecdsa::SigningKey,
    ) -> String {
        let canonical = vdsnc_canonical::canonicalize(data_json).unwrap();
        let sig: p256::ecdsa::Signature = bsc_key.sign(&canonical);
        envelope_text(data_json, "ES256", bsc_der, &sig.to_bytes())
    }

    pub fn envelope_text(
        data_json: &str,
        alg: &str,
        bsc_der: &[u8],
        raw_sig: &[u8],
    ) -> String {
        let cer = URL_SAFE_NO_PAD.encode(bsc_der);
        let sigvl = URL_SAFE_NO_PAD.encode(raw_sig);
        format!(
            r#"{{"data":{data_json},"sig":{{"alg":"{alg}","cer":"{cer}","sigvl":"{sigvl}"}}}}"#
        )
    }
}

use pki::*;

const DATA_JSON: &str = r#"{"hdr":{"t":"icao.vacc","v":1,"is":"AUS"},"msg":{"uvci":"VB0009990012","pid":{"n":"CITIZEN  JANE CATHERINE","dob":"1961-05-15","i":"PA0941262","sex":"F"},"ve":[{"des":"XM68M6","nam":"Comirnaty","dis":"RA01.0","vd":[{"dvc":"2021-09-15","seq":1,"ctr":"AUS","adm":"General Practitioner","lot":"PT123F"}]}]}}"#;

/// Everything a scenario needs: the anchors and a signed seal.
struct Fixture {
    csca_der: Vec<u8>,
    crl_der: Vec<u8>,
    bsc_der: Vec<u8>,
    bsc_key: p256::ecdsa::SigningKey,
    csca_key: CaKey,
}

fn fixture() -> Fixture {
    let csca_key = CaKey::generate_p256();
    let bsc_key = p256::ecdsa::SigningKey::random(&mut rand::thread_rng());

    let csca_der = make_cert(
        &CertSpec {
            serial: &[0x01],
            issuer: CSCA_NAME,
            subject: CSCA_NAME,
            spki_der: csca_key.spki_der(),
            ski: Some(&CSCA_SKI),
            aki: None,
        },
        &csca_key,
    );
    let bsc_der = {
        use p256::pkcs8::EncodePublicKey as _;
        make_cert(
            &CertSpec {
                serial: BSC_SERIAL,
                issuer: CSCA_NAME,
                subject: BSC_NAME,
                spki_der: bsc_key
                    .verifying_key()
                    .to_public_key_der()
                    .unwrap()
                    .as_bytes()
                    .to_vec(),
                ski: None,
                aki: Some(&CSCA_SKI),
            },
            &csca_key,
        )
    };
    let crl_der = make_crl(CSCA_NAME, &[], &csca_key);
    Fixture {
        csca_der,
        crl_der,
        bsc_der,
        bsc_key,
        csca_key,
    }
}

fn store_with(anchors: Vec<CscaCertificate>) -> TrustStore {
    let mut store =
        TrustStore::new(TrustStoreConfig::default(), Arc::new(MemoryCache::new())).unwrap();
    for anchor in anchors {
        store.add(anchor);
    }
    store
}

fn anchor(cert_der: &[u8], crl: Crl) -> CscaCertificate {
    let digest = vdsnc_core::Sha256Digest::from_hex(&sha256_hex(cert_der)).unwrap();
    CscaCertificate::new(cert_der, digest, crl).unwrap()
}

fn anchor_with_hash(cert_der: &[u8], hash_hex: &str, crl: Crl) -> CscaCertificate {
    let digest = vdsnc_core::Sha256Digest::from_hex(hash_hex).unwrap();
    CscaCertificate::new(cert_der, digest, crl).unwrap()
}

#[test]
fn authentic_seal_verifies() {
    let f = fixture();
    let store = store_with(vec![anchor(&f.csca_der, Crl::from_static(f.crl_der.clone()))]);
    let vds = decode_vds(&make_seal_text(DATA_JSON, &f.bsc_der, &f.bsc_key)).unwrap();
    verify(&vds, &store).unwrap();
}

#[test]
fn tampered_payload_fails_signature() {
    let f = fixture();
    let store = store_with(vec![anchor(&f.csca_der, Crl::from_static(f.crl_der.clone()))]);
    let text = make_seal_text(DATA_JSON, &f.bsc_der, &f.bsc_key)
        .replace("CITIZEN  JANE CATHERINE", "CITIZEN  JANEX CATHERINE");
    let vds = decode_vds(&text).unwrap();
    assert_eq!(
        verify(&vds, &store).unwrap_err(),
        VdsVerifyError::VerifyVdsSignatureFailed
    );
}

#[test]
fn non_vds_json_is_a_decoding_error() {
    let err: VdsVerifyError = decode_vds(r#"{ "isThisAVDS": false }"#).unwrap_err().into();
    assert!(matches!(err, VdsVerifyError::JsonDecoding(_)));
}

#[test]
fn corrupted_csca_hash_is_detected() {
    let f = fixture();
    let store = store_with(vec![anchor_with_hash(
        &f.csca_der,
        &"0".repeat(64),
        Crl::from_static(f.crl_der.clone()),
    )]);
    let vds = decode_vds(&make_seal_text(DATA_JSON, &f.bsc_der, &f.bsc_key)).unwrap();
    assert_eq!(
        verify(&vds, &store).unwrap_err(),
        VdsVerifyError::CscaCertHashMismatch
    );
}

#[test]
fn crl_from_an_unrelated_signer_fails() {
    let f = fixture();
    let unrelated = CaKey::generate_p256();
    let forged_crl = make_crl(CSCA_NAME, &[], &unrelated);
    let store = store_with(vec![anchor(&f.csca_der, Crl::from_static(forged_crl))]);
    let vds = decode_vds(&make_seal_text(DATA_JSON, &f.bsc_der, &f.bsc_key)).unwrap();
    assert_eq!(
        verify(&vds, &store).unwrap_err(),
        VdsVerifyError::VerifyCrlFailed
    );
}

#[test]
fn revoked_bsc_is_rejected() {
    let f = fixture();
    let revoking_crl = make_crl(CSCA_NAME, &[BSC_SERIAL], &f.csca_key);
    let store = store_with(vec![anchor(&f.csca_der, Crl::from_static(revoking_crl))]);
    let vds = decode_vds(&make_seal_text(DATA_JSON, &f.bsc_der, &f.bsc_key)).unwrap();
    assert_eq!(
        verify(&vds, &store).unwrap_err(),
        VdsVerifyError::BscCertRevoked
    );
}

#[test]
fn missing_crl_data_fails_loading() {
    let f = fixture();
    let empty = Crl::updating(url::Url::parse("https://example.org/crl.der").unwrap(), None);
    let store = store_with(vec![anchor(&f.csca_der, empty)]);
    let vds = decode_vds(&make_seal_text(DATA_JSON, &f.bsc_der, &f.bsc_key)).unwrap();
    assert_eq!(
        verify(&vds, &store).unwrap_err(),
        VdsVerifyError::LoadCrlFailed
    );
}

#[test]
fn foreign_country_anchor_is_no_match() {
    let f = fixture();
    let nz_name: &[(&str, &str)] = &[("2.5.4.6", "NZ"), ("2.5.4.3", "NZ Authority")];
    let nz_key = CaKey::generate_p256();
    let nz_csca = make_cert(
        &CertSpec {
            serial: &[0x09],
            issuer: nz_name,
            subject: nz_name,
            spki_der: nz_key.spki_der(),
            ski: Some(&CSCA_SKI),
            aki: None,
        },
        &nz_key,
    );
    let crl = make_crl(nz_name, &[], &nz_key);
    let store = store_with(vec![anchor(&nz_csca, Crl::from_static(crl))]);
    let vds = decode_vds(&make_seal_text(DATA_JSON, &f.bsc_der, &f.bsc_key)).unwrap();
    assert_eq!(
        verify(&vds, &store).unwrap_err(),
        VdsVerifyError::NoMatchingCscaFound
    );
}

#[test]
fn aki_mismatch_is_detected() {
    let f = fixture();
    let wrong_aki = [0x33; 20];
    let bsc_der = {
        use p256::pkcs8::EncodePublicKey as _;
        make_cert(
            &CertSpec {
                serial: BSC_SERIAL,
                issuer: CSCA_NAME,
                subject: BSC_NAME,
                spki_der: f
                    .bsc_key
                    .verifying_key()
                    .to_public_key_der()
                    .unwrap()
                    .as_bytes()
                    .to_vec(),
                ski: None,
                aki: Some(&wrong_aki),
            },
            &f.csca_key,
        )
    };
    let store = store_with(vec![anchor(&f.csca_der, Crl::from_static(f.crl_der.clone()))]);
    let vds = decode_vds(&make_seal_text(DATA_JSON, &bsc_der, &f.bsc_key)).unwrap();
    assert_eq!(
        verify(&vds, &store).unwrap_err(),
        VdsVerifyError::BscAkiMismatchCscaSki
    );
}

#[test]
fn issuer_name_mismatch_is_detected() {
    let f = fixture();
    let other_issuer: &[(&str, &str)] =
        &[("2.5.4.6", "AU"), ("2.5.4.3", "Some Other Authority")];
    let bsc_der = {
        use p256::pkcs8::EncodePublicKey as _;
        make_cert(
            &CertSpec {
                serial: BSC_SERIAL,
                issuer: other_issuer,
                subject: BSC_NAME,
                spki_der: f
                    .bsc_key
                    .verifying_key()
                    .to_public_key_der()
                    .unwrap()
                    .as_bytes()
                    .to_vec(),
                ski: None,
                aki: Some(&CSCA_SKI),
            },
            &f.csca_key,
        )
    };
    let store = store_with(vec![anchor(&f.csca_der, Crl::from_static(f.crl_der.clone()))]);
    let vds = decode_vds(&make_seal_text(DATA_JSON, &bsc_der, &f.bsc_key)).unwrap();
    assert_eq!(
        verify(&vds, &store).unwrap_err(),
        VdsVerifyError::IssuerSubjectsDontMatch
    );
}

#[test]
fn bsc_signed_by_the_wrong_key_fails() {
    let f = fixture();
    let impostor = CaKey::generate_p256();
    let bsc_der = {
        use p256::pkcs8::EncodePublicKey as _;
        make_cert(
            &CertSpec {
                serial: BSC_SERIAL,
                issuer: CSCA_NAME,
                subject: BSC_NAME,
                spki_der: f
                    .bsc_key
                    .verifying_key()
                    .to_public_key_der()
                    .unwrap()
                    .as_bytes()
                    .to_vec(),
                ski: None,
                aki: Some(&CSCA_SKI),
            },
            &impostor,
        )
    };
    let store = store_with(vec![anchor(&f.csca_der, Crl::from_static(f.crl_der.clone()))]);
    let vds = decode_vds(&make_seal_text(DATA_JSON, &bsc_der, &f.bsc_key)).unwrap();
    assert_eq!(
        verify(&vds, &store).unwrap_err(),
        VdsVerifyError::VerifyBscSignatureFailed
    );
}

#[test]
fn unparseable_certificate_field_is_detected() {
    let f = fixture();
    let store = store_with(vec![anchor(&f.csca_der, Crl::from_static(f.crl_der.clone()))]);
    let text = envelope_text(DATA_JSON, "ES256", b"not a certificate", &[0u8; 64]);
    let vds = decode_vds(&text).unwrap();
    assert_eq!(
        verify(&vds, &store).unwrap_err(),
        VdsVerifyError::ParseBscCertFromVdsFailed
    );
}

#[test]
fn unparseable_signature_field_is_detected() {
    let f = fixture();
    let store = store_with(vec![anchor(&f.csca_der, Crl::from_static(f.crl_der.clone()))]);
    let good = make_seal_text(DATA_JSON, &f.bsc_der, &f.bsc_key);
    let vds = decode_vds(&good).unwrap();
    // Splice an out-of-alphabet sigvl into the otherwise valid envelope.
    let text = good.replace(&vds.sig.sigvl, "!!!not-base64!!!");
    let vds = decode_vds(&text).unwrap();
    assert_eq!(
        verify(&vds, &store).unwrap_err(),
        VdsVerifyError::ParseSignatureFromVdsFailed
    );
}

#[test]
fn declared_algorithm_must_match_the_key_curve() {
    let f = fixture();
    let store = store_with(vec![anchor(&f.csca_der, Crl::from_static(f.crl_der.clone()))]);
    let text = make_seal_text(DATA_JSON, &f.bsc_der, &f.bsc_key).replace("ES256", "ES384");
    let vds = decode_vds(&text).unwrap();
    assert_eq!(
        verify(&vds, &store).unwrap_err(),
        VdsVerifyError::BscKeyAlgorithmNotSupported
    );
}

#[test]
fn key_order_and_whitespace_do_not_affect_the_signature() {
    let f = fixture();
    let store = store_with(vec![anchor(&f.csca_der, Crl::from_static(f.crl_der.clone()))]);

    // Sign the payload once, then present the same data object with its
    // top-level keys swapped. The canonical form is identical.
    let signed = make_seal_text(DATA_JSON, &f.bsc_der, &f.bsc_key);
    let vds = decode_vds(&signed).unwrap();
    let reordered_data = format!(
        r#"{{"msg":{},"hdr":{{"t":"icao.vacc","v":1,"is":"AUS"}}}}"#,
        serde_json::from_str::<serde_json::Value>(DATA_JSON).unwrap()["msg"]
    );
    let text = envelope_text(
        &reordered_data,
        "ES256",
        &f.bsc_der,
        &URL_SAFE_NO_PAD.decode(&vds.sig.sigvl).unwrap(),
    );
    let vds = decode_vds(&text).unwrap();
    verify(&vds, &store).unwrap();
}

#[test]
fn masked_first_candidate_falls_through_to_the_second() {
    let f = fixture();
    let decoy_key = CaKey::generate_p256();
    let decoy = make_cert(
        &CertSpec {
            serial: &[0x07],
            issuer: CSCA_NAME,
            subject: CSCA_NAME,
            spki_der: decoy_key.spki_der(),
            ski: Some(&CSCA_SKI),
            aki: None,
        },
        &decoy_key,
    );
    let store = store_with(vec![
        // Declared hash is wrong: the integrity gate skips this one.
        anchor_with_hash(&decoy, &"0".repeat(64), Crl::from_static(f.crl_der.clone())),
        anchor(&f.csca_der, Crl::from_static(f.crl_der.clone())),
    ]);
    let vds = decode_vds(&make_seal_text(DATA_JSON, &f.bsc_der, &f.bsc_key)).unwrap();
    verify(&vds, &store).unwrap();
}

#[test]
fn es512_seal_with_a_p521_bsc_verifies() {
    use p521::pkcs8::EncodePublicKey as _;

    let csca_key = CaKey::generate_p256();
    let bsc_key = p521::ecdsa::SigningKey::random(&mut rand::thread_rng());
    let csca_der = make_cert(
        &CertSpec {
            serial: &[0x01],
            issuer: CSCA_NAME,
            subject: CSCA_NAME,
            spki_der: csca_key.spki_der(),
            ski: Some(&CSCA_SKI),
            aki: None,
        },
        &csca_key,
    );
    let bsc_der = make_cert(
        &CertSpec {
            serial: BSC_SERIAL,
            issuer: CSCA_NAME,
            subject: BSC_NAME,
            spki_der: p521::PublicKey::from_affine(
                *p521::ecdsa::VerifyingKey::from(&bsc_key).as_affine(),
            )
            .unwrap()
            .to_public_key_der()
            .unwrap()
            .as_bytes()
            .to_vec(),
            ski: None,
            aki: Some(&CSCA_SKI),
        },
        &csca_key,
    );
    let crl_der = make_crl(CSCA_NAME, &[], &csca_key);
    let store = store_with(vec![anchor(&csca_der, Crl::from_static(crl_der))]);

    let canonical = vdsnc_canonical::canonicalize(DATA_JSON).unwrap();
    let sig: p521::ecdsa::Signature = bsc_key.sign(&canonical);
    let text = envelope_text(DATA_JSON, "ES512", &bsc_der, &sig.to_bytes());
    let vds = decode_vds(&text).unwrap();
    verify(&vds, &store).unwrap();
}

#[test]
fn rsa_signed_csca_chain_verifies() {
    let csca_key = CaKey::generate_rsa();
    let bsc_key = p256::ecdsa::SigningKey::random(&mut rand::thread_rng());
    let csca_der = make_cert(
        &CertSpec {
            serial: &[0x01],
            issuer: CSCA_NAME,
            subject: CSCA_NAME,
            spki_der: csca_key.spki_der(),
            ski: Some(&CSCA_SKI),
            aki: None,
        },
        &csca_key,
    );
    let bsc_der = {
        use p256::pkcs8::EncodePublicKey as _;
        make_cert(
            &CertSpec {
                serial: BSC_SERIAL,
                issuer: CSCA_NAME,
                subject: BSC_NAME,
                spki_der: bsc_key
                    .verifying_key()
                    .to_public_key_der()
                    .unwrap()
                    .as_bytes()
                    .to_vec(),
                ski: None,
                aki: Some(&CSCA_SKI),
            },
            &csca_key,
        )
    };
    let crl_der = make_crl(CSCA_NAME, &[], &csca_key);
    let store = store_with(vec![anchor(&csca_der, Crl::from_static(crl_der))]);
    let vds = decode_vds(&make_seal_text(DATA_JSON, &bsc_der, &bsc_key)).unwrap();
    verify(&vds, &store).unwrap();
}
