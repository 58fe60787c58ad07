//! Payload and field types plus the parse/serialize operations.

use std::fmt;

use serde::Serialize;
use thiserror::Error;

use super::{checksum_hex, is_composite_tag, CRC_PREFIX, CRC_TAG};

/// Maximum value length representable by the two-digit length prefix.
const MAX_VALUE_LEN: usize = 99;

/// Length of the checksum field's value (four hex digits).
const CRC_VALUE_LEN: usize = 4;

/// Hard parse failures. Any of these aborts parsing without a usable
/// [`Payload`].
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize)]
pub enum ParseError {
    #[error("malformed tag at offset {offset}: expected two ASCII digits")]
    MalformedTag { offset: usize },

    #[error("malformed length for tag {tag} at offset {offset}: expected two ASCII digits")]
    MalformedLength { tag: String, offset: usize },

    #[error("truncated value for tag {tag}: declared {declared} bytes but only {remaining} remain")]
    TruncatedValue {
        tag: String,
        declared: usize,
        remaining: usize,
    },

    #[error("payload does not end with a \"6304\" checksum field")]
    MissingChecksum,

    #[error("non-ASCII byte at offset {offset}: QRIS payloads use the EMV common character set")]
    NonAscii { offset: usize },
}

/// Errors raised when constructing a field, before any serialization.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FieldError {
    #[error("tag {0:?} must be exactly two ASCII digits")]
    InvalidTag(String),

    #[error("value for tag {tag} is {actual} bytes, the two-digit length prefix caps it at 99")]
    LengthMismatch { tag: String, actual: usize },

    #[error("value for tag {tag} contains non-ASCII data")]
    NonAsciiValue { tag: String },
}

/// Non-fatal findings attached to a parsed payload. Callers decide whether
/// to treat them as fatal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum Warning {
    /// The stored tag `63` value disagrees with the recomputed CRC.
    ChecksumMismatch { stored: String, computed: String },
    /// The same tag appeared twice at one nesting level. Nested
    /// occurrences are reported as `parent.tag`.
    DuplicateTag { path: String },
}

impl fmt::Display for Warning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Warning::ChecksumMismatch { stored, computed } => {
                write!(f, "stored checksum {stored} does not match computed {computed}")
            }
            Warning::DuplicateTag { path } => write!(f, "duplicate tag {path}"),
        }
    }
}

/// The nested view of a field's value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum Nested {
    /// Non-composite tag; the value is opaque.
    None,
    /// Composite tag whose value parsed as a TLV sequence.
    Parsed(Payload),
    /// Composite tag whose value failed nested parsing. The raw value is
    /// still preserved verbatim so the payload round-trips.
    Failed(ParseError),
}

/// One TLV entry. Immutable once constructed; [`Payload::set_field`]
/// replaces fields wholesale instead of mutating them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Field {
    tag: String,
    value: String,
    nested: Nested,
}

impl Field {
    /// Builds a field, validating the tag shape and value length, and
    /// deriving the nested view for composite tags.
    pub fn new(tag: &str, value: &str) -> Result<Self, FieldError> {
        if tag.len() != 2 || !tag.bytes().all(|b| b.is_ascii_digit()) {
            return Err(FieldError::InvalidTag(tag.to_string()));
        }
        if !value.is_ascii() {
            return Err(FieldError::NonAsciiValue { tag: tag.to_string() });
        }
        if value.len() > MAX_VALUE_LEN {
            return Err(FieldError::LengthMismatch {
                tag: tag.to_string(),
                actual: value.len(),
            });
        }
        let nested = if is_composite_tag(tag) {
            match scan(value, Some(tag), &mut Vec::new()) {
                Ok(fields) => Nested::Parsed(Payload::from_parts(fields, None, Vec::new())),
                Err(e) => Nested::Failed(e),
            }
        } else {
            Nested::None
        };
        Ok(Self {
            tag: tag.to_string(),
            value: value.to_string(),
            nested,
        })
    }

    /// The two-digit tag.
    pub fn tag(&self) -> &str {
        &self.tag
    }

    /// The raw value, byte-exact as it appeared on the wire.
    pub fn value(&self) -> &str {
        &self.value
    }

    /// Byte length of the value (what the length prefix encodes).
    pub fn length(&self) -> usize {
        self.value.len()
    }

    /// The nested payload, for composite tags that parsed cleanly.
    pub fn nested(&self) -> Option<&Payload> {
        match &self.nested {
            Nested::Parsed(p) => Some(p),
            _ => None,
        }
    }

    /// True for a composite tag whose value failed nested parsing.
    pub fn has_nested_parse_error(&self) -> bool {
        matches!(self.nested, Nested::Failed(_))
    }

    /// The nested parse failure, if any.
    pub fn nested_parse_error(&self) -> Option<&ParseError> {
        match &self.nested {
            Nested::Failed(e) => Some(e),
            _ => None,
        }
    }
}

/// An ordered sequence of TLV fields, excluding the trailing checksum
/// field (its stored value is kept separately for diagnostics).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Default)]
pub struct Payload {
    fields: Vec<Field>,
    stored_checksum: Option<String>,
    warnings: Vec<Warning>,
}

impl Payload {
    /// An empty payload, for incremental construction via
    /// [`set_field`](Self::set_field).
    pub fn new() -> Self {
        Self::default()
    }

    fn from_parts(fields: Vec<Field>, stored_checksum: Option<String>, warnings: Vec<Warning>) -> Self {
        Self {
            fields,
            stored_checksum,
            warnings,
        }
    }

    /// Parses a QRIS payload string.
    ///
    /// Consumes the input left to right: two digits of tag, two digits of
    /// length, then exactly `length` bytes of value, until the input is
    /// exhausted. Composite tags get their value parsed one level deeper;
    /// a nested failure flags the field but does not abort. The final
    /// field must be the tag `63` checksum, which is recomputed and
    /// checked.
    ///
    /// Hard failures return an error. Checksum disagreement and duplicate
    /// tags still return the payload, annotated via
    /// [`warnings`](Self::warnings).
    pub fn parse(input: &str) -> Result<Self, ParseError> {
        if input.is_empty() {
            return Err(ParseError::MalformedTag { offset: 0 });
        }
        if let Some(offset) = input.bytes().position(|b| !b.is_ascii()) {
            return Err(ParseError::NonAscii { offset });
        }

        let mut warnings = Vec::new();
        let mut fields = scan(input, None, &mut warnings)?;

        let stored = match fields.pop() {
            Some(f) if f.tag == CRC_TAG && f.value.len() == CRC_VALUE_LEN => f.value,
            _ => return Err(ParseError::MissingChecksum),
        };

        // The CRC covers everything up to and including the "6304"
        // prefix, i.e. the whole input minus the four checksum digits.
        let computed = checksum_hex(&input[..input.len() - CRC_VALUE_LEN]);
        if stored != computed {
            warnings.push(Warning::ChecksumMismatch {
                stored: stored.clone(),
                computed,
            });
        }

        Ok(Self::from_parts(fields, Some(stored), warnings))
    }

    /// Serializes the field sequence and appends a freshly computed
    /// checksum field. The stored checksum is never trusted, so
    /// parse → mutate → serialize always yields a consistent payload.
    pub fn serialize(&self) -> String {
        let mut out = self.to_tlv_string();
        out.push_str(CRC_PREFIX);
        let crc = checksum_hex(&out);
        out.push_str(&crc);
        out
    }

    /// Serializes the fields without a checksum. This is the form a
    /// composite field's value takes, so use it when building nested
    /// sequences to pass to [`set_field`](Self::set_field).
    pub fn to_tlv_string(&self) -> String {
        let mut out = String::new();
        for field in &self.fields {
            out.push_str(&field.tag);
            out.push_str(&format!("{:02}", field.value.len()));
            out.push_str(&field.value);
        }
        out
    }

    /// Looks up a field by tag.
    pub fn get_field(&self, tag: &str) -> Option<&Field> {
        self.fields.iter().find(|f| f.tag == tag)
    }

    /// Returns a new payload with `tag` set to `value`: an existing field
    /// is replaced in place (order preserved), an absent tag is appended.
    pub fn set_field(&self, tag: &str, value: &str) -> Result<Self, FieldError> {
        let field = Field::new(tag, value)?;
        let mut next = self.clone();
        match next.fields.iter_mut().find(|f| f.tag == tag) {
            Some(slot) => *slot = field,
            None => next.fields.push(field),
        }
        Ok(next)
    }

    /// Returns a new payload without the given tag. A no-op if absent.
    pub fn remove_field(&self, tag: &str) -> Self {
        let mut next = self.clone();
        next.fields.retain(|f| f.tag != tag);
        next
    }

    /// The parsed fields, in wire order, checksum field excluded.
    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    /// Non-fatal findings from parsing. Empty for payloads built by hand.
    pub fn warnings(&self) -> &[Warning] {
        &self.warnings
    }

    /// The checksum value as it appeared in the parsed input, if this
    /// payload came from [`parse`](Self::parse).
    pub fn stored_checksum(&self) -> Option<&str> {
        self.stored_checksum.as_deref()
    }

    /// True when parsing produced no warnings.
    pub fn is_valid(&self) -> bool {
        self.warnings.is_empty()
    }

    /// Number of fields (checksum excluded).
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// True when the payload has no fields.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

/// Takes two ASCII digits at `at`, or `None`.
fn take2(input: &str, at: usize) -> Option<&str> {
    let s = input.get(at..at + 2)?;
    s.bytes().all(|b| b.is_ascii_digit()).then_some(s)
}

/// Linear TLV scan of one nesting level. `parent` is `None` at the top
/// level; composite recursion happens only there, so depth is bounded at
/// two as QRIS defines no deeper nesting.
fn scan(input: &str, parent: Option<&str>, warnings: &mut Vec<Warning>) -> Result<Vec<Field>, ParseError> {
    let mut fields: Vec<Field> = Vec::new();
    let mut pos = 0;

    while pos < input.len() {
        let tag = take2(input, pos)
            .ok_or(ParseError::MalformedTag { offset: pos })?
            .to_string();
        let declared: usize = take2(input, pos + 2)
            .ok_or_else(|| ParseError::MalformedLength {
                tag: tag.clone(),
                offset: pos + 2,
            })?
            .parse()
            .map_err(|_| ParseError::MalformedLength {
                tag: tag.clone(),
                offset: pos + 2,
            })?;

        let start = pos + 4;
        let remaining = input.len() - start;
        if declared > remaining {
            return Err(ParseError::TruncatedValue {
                tag,
                declared,
                remaining,
            });
        }
        let value = &input[start..start + declared];

        let nested = if parent.is_none() && is_composite_tag(&tag) {
            let mut nested_warnings = Vec::new();
            match scan(value, Some(&tag), &mut nested_warnings) {
                Ok(nested_fields) => {
                    warnings.append(&mut nested_warnings);
                    Nested::Parsed(Payload::from_parts(nested_fields, None, Vec::new()))
                }
                Err(e) => Nested::Failed(e),
            }
        } else {
            Nested::None
        };

        if fields.iter().any(|f| f.tag == tag) {
            let path = match parent {
                Some(p) => format!("{p}.{tag}"),
                None => tag.clone(),
            };
            warnings.push(Warning::DuplicateTag { path });
        }

        fields.push(Field {
            tag,
            value: value.to_string(),
            nested,
        });
        pos = start + declared;
    }

    Ok(fields)
}
