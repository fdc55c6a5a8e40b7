//! Base64url decoding tolerant of missing padding.
//!
//! Seal producers in the field emit `cer` and `sigvl` both with and
//! without `=` padding; the decoder accepts either form but still rejects
//! characters outside the URL-safe alphabet.

use base64::alphabet::URL_SAFE;
use base64::engine::general_purpose::GeneralPurpose;
use base64::engine::{DecodePaddingMode, GeneralPurposeConfig};
use base64::Engine as _;

const PADDING_INDIFFERENT: GeneralPurpose = GeneralPurpose::new(
    &URL_SAFE,
    GeneralPurposeConfig::new().with_decode_padding_mode(DecodePaddingMode::Indifferent),
);

/// Decode base64url input, padded or not.
///
/// # Errors
///
/// Returns [`base64::DecodeError`] for characters outside the base64url
/// alphabet or an impossible length.
pub fn decode(input: &str) -> Result<Vec<u8>, base64::DecodeError> {
    PADDING_INDIFFERENT.decode(input)
}
