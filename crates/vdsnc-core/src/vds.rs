//! The VDS-NC envelope model and reader.

use serde::Deserialize;

use crate::error::VdsDecodeError;

/// A decoded VDS-NC envelope.
///
/// Holds the decoded model alongside the exact text it was decoded from.
/// The canonical signing input is always derived from that original text:
/// re-encoding the model would not be byte-identical.
#[derive(Debug, Clone)]
pub struct Vds {
    /// The signed payload: header plus message.
    pub data: VdsData,
    /// Signature envelope: algorithm, signer certificate, signature.
    pub sig: VdsSignature,
    original_text: String,
}

impl Vds {
    /// The exact JSON text this envelope was decoded from.
    #[must_use]
    pub fn original_text(&self) -> &str {
        &self.original_text
    }
}

/// The `data` object of the envelope.
#[derive(Debug, Clone, Deserialize)]
pub struct VdsData {
    /// Envelope header.
    pub hdr: Header,
    /// Typed message payload.
    pub msg: Message,
}

/// The `hdr` object.
#[derive(Debug, Clone, Deserialize)]
pub struct Header {
    /// Seal type, e.g. `icao.vacc` or `icao.test`. Opaque to the
    /// verifier.
    pub t: String,
    /// Version.
    pub v: u32,
    /// Three-letter issuing country code, from the wire field `is`.
    #[serde(rename = "is")]
    pub issuing_country: String,
}

/// The message payload. Vaccination seals decode into the typed form;
/// every other seal type keeps its raw JSON value.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum Message {
    /// An `icao.vacc` proof-of-vaccination payload.
    Vaccination(VaccinationMessage),
    /// Any other payload (`icao.test`, ...), kept as-is.
    Other(serde_json::Value),
}

/// Proof-of-vaccination message.
#[derive(Debug, Clone, Deserialize)]
pub struct VaccinationMessage {
    /// Unique vaccination certificate identifier.
    pub uvci: String,
    /// Person identification.
    pub pid: PersonIdentification,
    /// Vaccination events.
    pub ve: Vec<VaccinationEvent>,
}

/// Identification of the vaccinated person.
#[derive(Debug, Clone, Deserialize)]
pub struct PersonIdentification {
    /// Date of birth.
    pub dob: Option<String>,
    /// Name of the holder.
    pub n: String,
    /// Sex.
    pub sex: Option<String>,
    /// Travel document number.
    pub i: Option<String>,
    /// Additional identifier.
    pub ai: Option<String>,
}

/// One vaccination event (vaccine product and its administrations).
#[derive(Debug, Clone, Deserialize)]
pub struct VaccinationEvent {
    /// Vaccine or prophylaxis designation.
    pub des: String,
    /// Vaccine brand name.
    pub nam: String,
    /// Disease targeted.
    pub dis: String,
    /// Individual vaccination details.
    pub vd: Vec<VaccinationDetails>,
}

/// A single administration of a vaccine.
#[derive(Debug, Clone, Deserialize)]
pub struct VaccinationDetails {
    /// Date of vaccination.
    pub dvc: String,
    /// Dose sequence number.
    pub seq: u32,
    /// Country of vaccination.
    pub ctr: String,
    /// Administering centre.
    pub adm: String,
    /// Batch/lot number.
    pub lot: String,
    /// Due date of next dose.
    pub dvn: Option<String>,
}

/// The `sig` object.
#[derive(Debug, Clone, Deserialize)]
pub struct VdsSignature {
    /// Signature algorithm of the seal.
    pub alg: SignatureAlgorithmId,
    /// Barcode Signing Certificate, base64url DER.
    pub cer: String,
    /// Raw `(r ‖ s)` signature, base64url.
    pub sigvl: String,
}

/// The signature algorithms a seal may declare.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub enum SignatureAlgorithmId {
    /// ECDSA P-256 with SHA-256.
    #[serde(rename = "ES256")]
    Es256,
    /// ECDSA P-384 with SHA-384.
    #[serde(rename = "ES384")]
    Es384,
    /// ECDSA P-521 with SHA-512.
    #[serde(rename = "ES512")]
    Es512,
}

#[derive(Debug, Deserialize)]
struct Envelope {
    data: VdsData,
    sig: VdsSignature,
}

/// Decode a VDS-NC envelope from its JSON text, retaining the text for
/// later canonicalisation.
///
/// # Errors
///
/// Returns [`VdsDecodeError::JsonDecoding`] on any schema violation.
pub fn decode_vds(text: &str) -> Result<Vds, VdsDecodeError> {
    let envelope: Envelope =
        serde_json::from_str(text).map_err(|e| VdsDecodeError::JsonDecoding(e.to_string()))?;
    Ok(Vds {
        data: envelope.data,
        sig: envelope.sig,
        original_text: text.to_owned(),
    })
}
