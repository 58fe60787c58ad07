//! # QRIS-HD - QRIS payload toolkit
//!
//! QRIS-HD validates, inspects and renders QRIS (Quick Response Code
//! Indonesian Standard) payment payloads.
//!
//! ## Overview
//!
//! A QRIS payload is a single ASCII string of concatenated TLV
//! (tag-length-value) triples terminated by a mandatory CRC field:
//! - Each field declares a two-digit `tag`, a two-digit `length`, and
//!   exactly `length` bytes of `value`
//! - Composite tags (first digit `2`-`5`, used for merchant account
//!   information) carry a value that is itself a nested TLV sequence
//! - The final field (tag `63`) holds a CRC-16/CCITT-FALSE checksum over
//!   everything before it, including its own `6304` prefix
//!
//! The [`tlv`] module implements the structural codec; [`qris`] adds the
//! payment-level vocabulary on top; [`qr`] bridges to the external QR
//! pixel encoder and image scanner.
//!
//! ## Example Usage
//!
//! ```rust
//! use qris_hd::tlv::Payload;
//!
//! let payload = Payload::parse(qris_hd::qris::SAMPLE_PAYLOAD).unwrap();
//! assert!(payload.is_valid());
//!
//! // Merchant account information is a nested TLV sequence
//! let account = payload.get_field("26").unwrap().nested().unwrap();
//! assert_eq!(account.get_field("00").unwrap().value(), "COM.NOBUBANK.WWW");
//!
//! // Serialization always recomputes the checksum
//! assert_eq!(payload.serialize(), qris_hd::qris::SAMPLE_PAYLOAD);
//! ```
//!
//! ## Modules
//!
//! - [`tlv`]: TLV parsing, serialization and the CRC-16 checksum
//! - [`qris`]: QRIS tag names, heuristic pre-checks, payload accessors
//! - [`qr`]: QR code rendering and image scanning

/// Maximum accepted payload length in characters (matches the upper bound
/// QRIS-issuing apps enforce before rendering).
pub const MAX_PAYLOAD_LEN: usize = 2000;

/// Minimum plausible payload length in characters.
pub const MIN_PAYLOAD_LEN: usize = 10;

pub mod qr;
pub mod qris;
pub mod tlv;

// Re-export commonly used types at the crate root
pub use qr::{generate_qr, generate_qr_to_file, read_qr, QrConfig, QrError, QrFormat};
pub use tlv::{Field, FieldError, Nested, ParseError, Payload, Warning};
