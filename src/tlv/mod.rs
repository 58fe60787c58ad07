//! TLV (tag-length-value) codec for QRIS payloads.
//!
//! A payload is a flat sequence of fields, each encoded as two decimal
//! digits of tag, two decimal digits of length, then exactly that many
//! bytes of value. Composite tags nest one further TLV level inside their
//! value. The sequence ends with the mandatory tag `63` checksum field.
//!
//! Parsing is a single left-to-right scan with one level of recursion for
//! composite tags; no byte is visited more than once per nesting level.

mod crc;
mod payload;

pub use crc::{checksum, checksum_hex};
pub use payload::{Field, FieldError, Nested, ParseError, Payload, Warning};

/// Reserved tag of the trailing checksum field.
pub const CRC_TAG: &str = "63";

/// The `tag + length` prefix of the checksum field. The CRC is computed
/// over the payload up to and including these four characters.
pub const CRC_PREFIX: &str = "6304";

/// Returns true if `tag` is in the composite range (first digit `2`-`5`),
/// meaning its value is itself a TLV sequence.
pub fn is_composite_tag(tag: &str) -> bool {
    matches!(tag.as_bytes().first(), Some(b'2'..=b'5'))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_composite_tag_range() {
        assert!(is_composite_tag("26"));
        assert!(is_composite_tag("51"));
        assert!(is_composite_tag("20"));
        assert!(is_composite_tag("59"));
        assert!(!is_composite_tag("00"));
        assert!(!is_composite_tag("01"));
        assert!(!is_composite_tag("62"));
        assert!(!is_composite_tag("63"));
    }
}
