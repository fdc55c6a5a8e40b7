//! Eagerly decoded values for UNIVERSAL primitives.

use chrono::{DateTime, Utc};

/// A convenient decoded form attached to a node where the tag allows one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Value {
    /// BOOLEAN contents.
    Boolean(bool),
    /// INTEGER contents with leading zero octets stripped.
    Integer(Vec<u8>),
    /// BIT STRING contents with the unused-bits octet removed.
    BitString(Vec<u8>),
    /// Raw octets (OCTET STRING that did not reparse, or an unrecognised
    /// string type).
    Bytes(Vec<u8>),
    /// NULL.
    Null,
    /// OBJECT IDENTIFIER in dotted-decimal form.
    ObjectIdentifier(String),
    /// UTF8String / PrintableString / IA5String contents, or the UTF-8
    /// view of a context-specific body.
    Utf8(String),
    /// UTCTime or GeneralizedTime.
    Time(DateTime<Utc>),
}

impl Value {
    /// The string form of this value, if it has one.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Utf8(s) | Value::ObjectIdentifier(s) => Some(s),
            _ => None,
        }
    }
}
