//! Well-known object identifiers used by the views.

/// id-at-countryName.
pub const COUNTRY_NAME: &str = "2.5.4.6";
/// id-ce-subjectKeyIdentifier.
pub const SUBJECT_KEY_IDENTIFIER: &str = "2.5.29.14";
/// id-ce-authorityKeyIdentifier.
pub const AUTHORITY_KEY_IDENTIFIER: &str = "2.5.29.35";

/// Short attribute-type aliases for RFC 1779 rendering.
pub(crate) const DN_ALIASES: &[(&str, &str)] = &[
    ("2.5.4.3", "CN"),
    ("2.5.4.6", "C"),
    ("2.5.4.7", "L"),
    ("2.5.4.8", "ST"),
    ("2.5.4.9", "STREET"),
    ("2.5.4.10", "O"),
    ("2.5.4.11", "OU"),
];

/// The alias for a DN attribute type, if one is defined.
#[must_use]
pub(crate) fn dn_alias(dotted: &str) -> Option<&'static str> {
    DN_ALIASES
        .iter()
        .find(|(oid, _)| *oid == dotted)
        .map(|(_, alias)| *alias)
}
