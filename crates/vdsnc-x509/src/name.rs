//! Distinguished names and their RFC 1779 rendering.

use std::fmt;

use vdsnc_asn1::{Arena, NodeId};

use crate::oid::dn_alias;

/// Characters that force a DN attribute value into double quotes.
const NEEDS_QUOTING: &[char] = &[',', '+', '=', '\n', '<', '>', '#', ';', '\\'];

/// An ordered list of `(attribute-type OID, value)` pairs pulled from an
/// RFC 5280 `Name`. Multi-valued RDN sets are flattened in encoding order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DistinguishedName {
    rdns: Vec<(String, String)>,
}

impl DistinguishedName {
    /// Build a name from an RDNSequence node.
    #[must_use]
    pub fn from_node(arena: &Arena, name: NodeId) -> Self {
        let mut rdns = Vec::new();
        for &set in arena.children(name) {
            for &atv in arena.children(set) {
                let Some(type_node) = arena.child(atv, 0) else {
                    continue;
                };
                let Some(oid) = arena.oid_str(type_node) else {
                    continue;
                };
                let value = arena
                    .child(atv, 1)
                    .map_or_else(String::new, |v| match arena.first_string(v) {
                        Some(s) => s.to_owned(),
                        None => hex::encode(arena.body(v)),
                    });
                rdns.push((oid.to_owned(), value));
            }
        }
        DistinguishedName { rdns }
    }

    /// The ordered `(oid, value)` pairs.
    #[must_use]
    pub fn rdns(&self) -> &[(String, String)] {
        &self.rdns
    }

    /// The value of the first attribute with the given type OID.
    #[must_use]
    pub fn first_value(&self, oid: &str) -> Option<&str> {
        self.rdns
            .iter()
            .find(|(o, _)| o == oid)
            .map(|(_, v)| v.as_str())
    }

    /// `true` when the name has no attributes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rdns.is_empty()
    }
}

impl fmt::Display for DistinguishedName {
    /// RFC 1779 form: `OID=value` pairs joined by `", "`, with short
    /// aliases where defined and values quoted when they contain special
    /// characters.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, (oid, value)) in self.rdns.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            match dn_alias(oid) {
                Some(alias) => f.write_str(alias)?,
                None => f.write_str(oid)?,
            }
            f.write_str("=")?;
            if value.contains(NEEDS_QUOTING) {
                write!(f, "\"{value}\"")?;
            } else {
                f.write_str(value)?;
            }
        }
        Ok(())
    }
}
