//! Canonical serialisation of `serde_json` values.

use serde_json::Value;

use crate::error::CanonicalizeError;
use crate::number::format_f64;

/// Parse `text` and produce its canonical byte form.
///
/// # Errors
///
/// Returns [`CanonicalizeError::InvalidJson`] when the text does not
/// parse (lone surrogates included) and
/// [`CanonicalizeError::InvalidNumber`] for non-finite numbers.
pub fn canonicalize(text: &str) -> Result<Vec<u8>, CanonicalizeError> {
    let value: Value =
        serde_json::from_str(text).map_err(|e| CanonicalizeError::InvalidJson(e.to_string()))?;
    canonicalize_value(&value)
}

/// Produce the canonical byte form of an already-parsed value.
///
/// # Errors
///
/// Returns [`CanonicalizeError::InvalidNumber`] for non-finite numbers.
pub fn canonicalize_value(value: &Value) -> Result<Vec<u8>, CanonicalizeError> {
    let mut out = Vec::new();
    write_value(value, &mut out)?;
    Ok(out)
}

fn write_value(value: &Value, out: &mut Vec<u8>) -> Result<(), CanonicalizeError> {
    match value {
        Value::Null => out.extend_from_slice(b"null"),
        Value::Bool(true) => out.extend_from_slice(b"true"),
        Value::Bool(false) => out.extend_from_slice(b"false"),
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                out.extend_from_slice(i.to_string().as_bytes());
            } else if let Some(u) = n.as_u64() {
                out.extend_from_slice(u.to_string().as_bytes());
            } else {
                let f = n.as_f64().ok_or(CanonicalizeError::InvalidNumber)?;
                out.extend_from_slice(format_f64(f)?.as_bytes());
            }
        }
        Value::String(s) => write_string(s, out),
        Value::Array(items) => {
            out.push(b'[');
            for (i, item) in items.iter().enumerate() {
                if i > 0 {
                    out.push(b',');
                }
                write_value(item, out)?;
            }
            out.push(b']');
        }
        Value::Object(map) => {
            // Keys sort by UTF-16 code units: this matches how the
            // signing side orders keys, and differs from code-point
            // order for supplementary-plane characters.
            let mut entries: Vec<(&String, &Value)> = map.iter().collect();
            entries.sort_by(|(a, _), (b, _)| a.encode_utf16().cmp(b.encode_utf16()));
            out.push(b'{');
            for (i, (key, item)) in entries.into_iter().enumerate() {
                if i > 0 {
                    out.push(b',');
                }
                write_string(key, out);
                out.push(b':');
                write_value(item, out)?;
            }
            out.push(b'}');
        }
    }
    Ok(())
}

/// JSON string escaping: the two mandatory escapes, the short control
/// escapes, `\u00XX` for the rest of C0, and everything else (forward
/// slash included) as raw UTF-8.
fn write_string(s: &str, out: &mut Vec<u8>) {
    out.push(b'"');
    for c in s.chars() {
        match c {
            '"' => out.extend_from_slice(b"\\\""),
            '\\' => out.extend_from_slice(b"\\\\"),
            '\u{8}' => out.extend_from_slice(b"\\b"),
            '\u{c}' => out.extend_from_slice(b"\\f"),
            '\n' => out.extend_from_slice(b"\\n"),
            '\r' => out.extend_from_slice(b"\\r"),
            '\t' => out.extend_from_slice(b"\\t"),
            c if u32::from(c) < 0x20 => {
                out.extend_from_slice(format!("\\u{:04x}", u32::from(c)).as_bytes());
            }
            c => {
                let mut buf = [0u8; 4];
                out.extend_from_slice(c.encode_utf8(&mut buf).as_bytes());
            }
        }
    }
    out.push(b'"');
}
