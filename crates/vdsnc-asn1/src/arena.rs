//! The decoder itself: TLV walking into an index-addressed node arena.

use std::ops::Range;

use chrono::{DateTime, NaiveDate, Utc};

use crate::error::DerError;
use crate::tag::{universal, Class, Tag};
use crate::value::Value;

/// Hard cap on nesting depth, protecting against crafted deeply nested
/// inputs.
const MAX_DEPTH: usize = 32;

/// Index of a node inside its [`Arena`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(usize);

#[derive(Debug, PartialEq)]
struct NodeData {
    tag: Tag,
    /// Byte range of the full encoding, header included.
    range: Range<usize>,
    /// Byte range of the content octets.
    body: Range<usize>,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    value: Option<Value>,
}

/// A parsed DER forest. Nodes are stored flat and addressed by [`NodeId`];
/// the original input is retained so raw byte ranges stay recoverable.
#[derive(Debug)]
pub struct Arena {
    data: Vec<u8>,
    nodes: Vec<NodeData>,
    roots: Vec<NodeId>,
}

impl Arena {
    /// Parse `der` into a forest of nodes.
    ///
    /// # Errors
    ///
    /// Returns [`DerError`] if the input is empty or truncated, a length
    /// overflows, or nesting exceeds the decoder's cap. Trailing bytes
    /// that do not form a complete value are reported as truncation.
    pub fn parse(der: &[u8]) -> Result<Self, DerError> {
        let mut arena = Arena {
            data: der.to_vec(),
            nodes: Vec::new(),
            roots: Vec::new(),
        };
        let mut pos = 0;
        let end = arena.data.len();
        if pos == end {
            return Err(DerError::Truncated(0));
        }
        while pos < end {
            let (id, next) = arena.parse_node(pos, end, None, 0)?;
            arena.roots.push(id);
            pos = next;
        }
        Ok(arena)
    }

    /// The first top-level node, if any.
    #[must_use]
    pub fn root(&self) -> Option<NodeId> {
        self.roots.first().copied()
    }

    /// All top-level nodes in input order.
    #[must_use]
    pub fn roots(&self) -> &[NodeId] {
        &self.roots
    }

    /// The tag of `id`.
    #[must_use]
    pub fn tag(&self, id: NodeId) -> Tag {
        self.nodes[id.0].tag
    }

    /// Exact bytes of the node's encoding, header and length included.
    #[must_use]
    pub fn raw(&self, id: NodeId) -> &[u8] {
        &self.data[self.nodes[id.0].range.clone()]
    }

    /// Content octets of the node.
    #[must_use]
    pub fn body(&self, id: NodeId) -> &[u8] {
        &self.data[self.nodes[id.0].body.clone()]
    }

    /// The eagerly decoded value, where the tag allowed one.
    #[must_use]
    pub fn value(&self, id: NodeId) -> Option<&Value> {
        self.nodes[id.0].value.as_ref()
    }

    /// The node's parent, if it is not a root.
    #[must_use]
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.nodes[id.0].parent
    }

    /// Child nodes in encoding order.
    #[must_use]
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        &self.nodes[id.0].children
    }

    /// The `i`-th child, if present.
    #[must_use]
    pub fn child(&self, id: NodeId, i: usize) -> Option<NodeId> {
        self.nodes[id.0].children.get(i).copied()
    }

    /// Depth-first search below `from` (inclusive) for an OBJECT
    /// IDENTIFIER node with the given dotted value.
    #[must_use]
    pub fn find_oid(&self, from: NodeId, dotted: &str) -> Option<NodeId> {
        let mut stack = vec![from];
        while let Some(id) = stack.pop() {
            if let Some(Value::ObjectIdentifier(s)) = self.value(id) {
                if s == dotted {
                    return Some(id);
                }
            }
            for &child in self.children(id).iter().rev() {
                stack.push(child);
            }
        }
        None
    }

    /// The first stringifiable leaf value at or below `from`, in
    /// depth-first order.
    #[must_use]
    pub fn first_string(&self, from: NodeId) -> Option<&str> {
        let mut stack = vec![from];
        while let Some(id) = stack.pop() {
            if let Some(s) = self.value(id).and_then(Value::as_str) {
                return Some(s);
            }
            for &child in self.children(id).iter().rev() {
                stack.push(child);
            }
        }
        None
    }

    /// INTEGER contents of `id`, leading zeros stripped.
    #[must_use]
    pub fn integer_bytes(&self, id: NodeId) -> Option<&[u8]> {
        match self.value(id) {
            Some(Value::Integer(b)) => Some(b),
            _ => None,
        }
    }

    /// Dotted OBJECT IDENTIFIER string of `id`.
    #[must_use]
    pub fn oid_str(&self, id: NodeId) -> Option<&str> {
        match self.value(id) {
            Some(Value::ObjectIdentifier(s)) => Some(s),
            _ => None,
        }
    }

    /// Decoded UTCTime / GeneralizedTime of `id`.
    #[must_use]
    pub fn time(&self, id: NodeId) -> Option<DateTime<Utc>> {
        match self.value(id) {
            Some(Value::Time(t)) => Some(*t),
            _ => None,
        }
    }

    /// BIT STRING contents of `id`, unused-bits octet removed.
    #[must_use]
    pub fn bit_string(&self, id: NodeId) -> Option<&[u8]> {
        match self.value(id) {
            Some(Value::BitString(b)) => Some(b),
            _ => None,
        }
    }

    fn alloc(&mut self, node: NodeData) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(node);
        id
    }

    /// Parse one TLV starting at `pos`. Returns the node and the offset
    /// just past its encoding.
    fn parse_node(
        &mut self,
        pos: usize,
        end: usize,
        parent: Option<NodeId>,
        depth: usize,
    ) -> Result<(NodeId, usize), DerError> {
        if depth > MAX_DEPTH {
            return Err(DerError::TooDeep(MAX_DEPTH));
        }
        let header_start = pos;
        let (tag, after_tag) = read_tag(&self.data, pos, end)?;
        let (length, body_start) = read_length(&self.data, after_tag, end)?;

        match length {
            Some(len) => {
                let body_end = body_start
                    .checked_add(len)
                    .ok_or(DerError::LengthOverflow(after_tag))?;
                if body_end > end {
                    return Err(DerError::Truncated(body_start));
                }
                let id = self.alloc(NodeData {
                    tag,
                    range: header_start..body_end,
                    body: body_start..body_end,
                    parent,
                    children: Vec::new(),
                    value: None,
                });
                if tag.constructed {
                    self.parse_children(body_start, body_end, id, depth + 1)?;
                } else {
                    self.decode_primitive(id, header_start, depth)?;
                }
                Ok((id, body_end))
            }
            None => {
                // Indefinite form: content runs until end-of-contents.
                if !tag.constructed {
                    return Err(DerError::IndefinitePrimitive(header_start));
                }
                let id = self.alloc(NodeData {
                    tag,
                    range: header_start..body_start,
                    body: body_start..body_start,
                    parent,
                    children: Vec::new(),
                    value: None,
                });
                let mut cursor = body_start;
                loop {
                    if cursor + 2 <= end && self.data[cursor] == 0 && self.data[cursor + 1] == 0 {
                        break;
                    }
                    if cursor >= end {
                        return Err(DerError::Truncated(cursor));
                    }
                    let (child, next) = self.parse_node(cursor, end, Some(id), depth + 1)?;
                    self.nodes[id.0].children.push(child);
                    cursor = next;
                }
                self.nodes[id.0].body = body_start..cursor;
                self.nodes[id.0].range = header_start..cursor + 2;
                Ok((id, cursor + 2))
            }
        }
    }

    /// Parse children strictly filling `start..end`, attaching them to
    /// `parent`.
    fn parse_children(
        &mut self,
        start: usize,
        end: usize,
        parent: NodeId,
        depth: usize,
    ) -> Result<(), DerError> {
        let mut cursor = start;
        while cursor < end {
            let (child, next) = self.parse_node(cursor, end, Some(parent), depth)?;
            self.nodes[parent.0].children.push(child);
            cursor = next;
        }
        Ok(())
    }

    /// Attach a decoded value to a primitive node, reparsing OCTET STRING
    /// bodies that are themselves valid DER.
    fn decode_primitive(
        &mut self,
        id: NodeId,
        offset: usize,
        depth: usize,
    ) -> Result<(), DerError> {
        let tag = self.nodes[id.0].tag;
        let body_range = self.nodes[id.0].body.clone();

        if tag.is_universal(universal::OCTET_STRING) {
            if !body_range.is_empty() && self.try_reparse(id, body_range.clone(), depth) {
                return Ok(());
            }
            let body = &self.data[body_range];
            let value = match std::str::from_utf8(body) {
                Ok(s) => Value::Utf8(s.to_owned()),
                Err(_) => Value::Bytes(body.to_vec()),
            };
            self.nodes[id.0].value = Some(value);
            return Ok(());
        }

        let body = &self.data[body_range];
        let value = match tag.class {
            Class::Universal => match tag.number {
                universal::BOOLEAN => {
                    if body.len() != 1 {
                        return Err(DerError::Malformed {
                            what: "BOOLEAN",
                            offset,
                        });
                    }
                    Some(Value::Boolean(body[0] != 0))
                }
                universal::INTEGER => {
                    if body.is_empty() {
                        return Err(DerError::Malformed {
                            what: "INTEGER",
                            offset,
                        });
                    }
                    let mut contents = body;
                    while contents.len() > 1 && contents[0] == 0 {
                        contents = &contents[1..];
                    }
                    Some(Value::Integer(contents.to_vec()))
                }
                universal::BIT_STRING => {
                    if body.is_empty() {
                        return Err(DerError::Malformed {
                            what: "BIT STRING",
                            offset,
                        });
                    }
                    Some(Value::BitString(body[1..].to_vec()))
                }
                universal::NULL => {
                    if !body.is_empty() {
                        return Err(DerError::Malformed {
                            what: "NULL",
                            offset,
                        });
                    }
                    Some(Value::Null)
                }
                universal::OBJECT_IDENTIFIER => {
                    Some(Value::ObjectIdentifier(decode_oid(body, offset)?))
                }
                universal::UTF8_STRING
                | universal::PRINTABLE_STRING
                | universal::IA5_STRING => match std::str::from_utf8(body) {
                    Ok(s) => Some(Value::Utf8(s.to_owned())),
                    Err(_) => Some(Value::Bytes(body.to_vec())),
                },
                universal::UTC_TIME => Some(Value::Time(parse_utc_time(body, offset)?)),
                universal::GENERALIZED_TIME => {
                    Some(Value::Time(parse_generalized_time(body, offset)?))
                }
                _ => Some(Value::Bytes(body.to_vec())),
            },
            // Context-specific and application bodies keep their raw range;
            // record a string view when the body happens to be UTF-8.
            Class::ContextSpecific | Class::Application | Class::Private => {
                std::str::from_utf8(body)
                    .ok()
                    .map(|s| Value::Utf8(s.to_owned()))
            }
        };
        self.nodes[id.0].value = value;
        Ok(())
    }

    /// Attempt to parse an OCTET STRING body as nested DER. On failure the
    /// arena is rolled back and the node stays a leaf.
    fn try_reparse(&mut self, id: NodeId, body: Range<usize>, depth: usize) -> bool {
        if depth >= MAX_DEPTH {
            return false;
        }
        let snapshot = self.nodes.len();
        match self.parse_children(body.start, body.end, id, depth + 1) {
            Ok(()) if !self.nodes[id.0].children.is_empty() => true,
            _ => {
                self.nodes.truncate(snapshot);
                self.nodes[id.0].children.clear();
                false
            }
        }
    }
}

fn read_tag(data: &[u8], pos: usize, end: usize) -> Result<(Tag, usize), DerError> {
    if pos >= end {
        return Err(DerError::Truncated(pos));
    }
    let first = data[pos];
    let class = match first >> 6 {
        0 => Class::Universal,
        1 => Class::Application,
        2 => Class::ContextSpecific,
        _ => Class::Private,
    };
    let constructed = first & 0x20 != 0;
    let mut cursor = pos + 1;
    let number = if first & 0x1f == 0x1f {
        // High tag number form, base-128.
        let mut n: u32 = 0;
        loop {
            if cursor >= end {
                return Err(DerError::Truncated(cursor));
            }
            let b = data[cursor];
            cursor += 1;
            if n > (u32::MAX >> 7) {
                return Err(DerError::LengthOverflow(pos));
            }
            n = (n << 7) | u32::from(b & 0x7f);
            if b & 0x80 == 0 {
                break;
            }
        }
        n
    } else {
        u32::from(first & 0x1f)
    };
    Ok((
        Tag {
            class,
            constructed,
            number,
        },
        cursor,
    ))
}

/// Read a length. `None` means the indefinite form.
fn read_length(data: &[u8], pos: usize, end: usize) -> Result<(Option<usize>, usize), DerError> {
    if pos >= end {
        return Err(DerError::Truncated(pos));
    }
    let first = data[pos];
    if first < 0x80 {
        return Ok((Some(usize::from(first)), pos + 1));
    }
    if first == 0x80 {
        return Ok((None, pos + 1));
    }
    let count = usize::from(first & 0x7f);
    if count > std::mem::size_of::<usize>() {
        return Err(DerError::LengthOverflow(pos));
    }
    if pos + 1 + count > end {
        return Err(DerError::Truncated(pos));
    }
    let mut len: usize = 0;
    for &b in &data[pos + 1..pos + 1 + count] {
        if len > (usize::MAX >> 8) {
            return Err(DerError::LengthOverflow(pos));
        }
        len = (len << 8) | usize::from(b);
    }
    Ok((Some(len), pos + 1 + count))
}

fn decode_oid(body: &[u8], offset: usize) -> Result<String, DerError> {
    let malformed = DerError::Malformed {
        what: "OBJECT IDENTIFIER",
        offset,
    };
    if body.is_empty() {
        return Err(malformed);
    }
    let mut arcs: Vec<u64> = Vec::new();
    let mut cur: u64 = 0;
    let mut in_arc = false;
    for (i, &b) in body.iter().enumerate() {
        if cur > (u64::MAX >> 7) {
            return Err(malformed);
        }
        cur = (cur << 7) | u64::from(b & 0x7f);
        in_arc = true;
        if b & 0x80 == 0 {
            if arcs.is_empty() {
                // First subidentifier packs the two leading arcs as 40·a + b.
                let a = std::cmp::min(cur / 40, 2);
                arcs.push(a);
                arcs.push(cur - 40 * a);
            } else {
                arcs.push(cur);
            }
            cur = 0;
            in_arc = false;
        } else if i == body.len() - 1 {
            return Err(malformed);
        }
    }
    if in_arc {
        return Err(malformed);
    }
    Ok(arcs
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("."))
}

fn two_digits(s: &[u8], at: usize) -> Option<u32> {
    let a = *s.get(at)?;
    let b = *s.get(at + 1)?;
    if a.is_ascii_digit() && b.is_ascii_digit() {
        Some(u32::from(a - b'0') * 10 + u32::from(b - b'0'))
    } else {
        None
    }
}

fn build_time(
    year: i32,
    month: u32,
    day: u32,
    hour: u32,
    minute: u32,
    second: u32,
) -> Option<DateTime<Utc>> {
    NaiveDate::from_ymd_opt(year, month, day)?
        .and_hms_opt(hour, minute, second)
        .map(|naive| DateTime::from_naive_utc_and_offset(naive, Utc))
}

/// `yyMMddHHmmssZ` or `yyMMddHHmmZ`, century per RFC 5280 (< 50 ⇒ 20xx).
fn parse_utc_time(body: &[u8], offset: usize) -> Result<DateTime<Utc>, DerError> {
    let malformed = DerError::Malformed {
        what: "UTCTime",
        offset,
    };
    if (body.len() != 13 && body.len() != 11) || body.last() != Some(&b'Z') {
        return Err(malformed);
    }
    let yy = two_digits(body, 0).ok_or(malformed.clone())?;
    let year = if yy < 50 { 2000 + yy } else { 1900 + yy };
    let month = two_digits(body, 2).ok_or(malformed.clone())?;
    let day = two_digits(body, 4).ok_or(malformed.clone())?;
    let hour = two_digits(body, 6).ok_or(malformed.clone())?;
    let minute = two_digits(body, 8).ok_or(malformed.clone())?;
    let second = if body.len() == 13 {
        two_digits(body, 10).ok_or(malformed.clone())?
    } else {
        0
    };
    build_time(
        i32::try_from(year).map_err(|_| malformed.clone())?,
        month,
        day,
        hour,
        minute,
        second,
    )
    .ok_or(malformed)
}

/// `yyyyMMddHHmmssZ`.
fn parse_generalized_time(body: &[u8], offset: usize) -> Result<DateTime<Utc>, DerError> {
    let malformed = DerError::Malformed {
        what: "GeneralizedTime",
        offset,
    };
    if body.len() != 15 || body.last() != Some(&b'Z') {
        return Err(malformed);
    }
    let century = two_digits(body, 0).ok_or(malformed.clone())?;
    let yy = two_digits(body, 2).ok_or(malformed.clone())?;
    let year = century * 100 + yy;
    let month = two_digits(body, 4).ok_or(malformed.clone())?;
    let day = two_digits(body, 6).ok_or(malformed.clone())?;
    let hour = two_digits(body, 8).ok_or(malformed.clone())?;
    let minute = two_digits(body, 10).ok_or(malformed.clone())?;
    let second = two_digits(body, 12).ok_or(malformed.clone())?;
    build_time(
        i32::try_from(year).map_err(|_| malformed.clone())?,
        month,
        day,
        hour,
        minute,
        second,
    )
    .ok_or(malformed)
}
