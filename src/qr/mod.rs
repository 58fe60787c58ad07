//! QR code rendering and scanning for QRIS payloads.
//!
//! The payload travels through QR codes as a plain alphanumeric/byte-mode
//! string; the heavy lifting (matrix placement, Reed-Solomon, finder
//! pattern detection) lives in the `qrcode` and `rqrr` crates. This
//! module only configures rendering and hands strings back and forth.

mod generator;
mod reader;

pub use generator::{
    generate_qr, generate_qr_to_file, parse_color, parse_ec_level, QrConfig, QrError, QrFormat,
    QrOutput,
};
pub use reader::{read_all_qr, read_qr, read_qr_from_file};
