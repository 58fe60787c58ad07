//! CRC-16/CCITT-FALSE checksum.
//!
//! QRIS mandates this CRC variant for the trailing tag `63` field:
//! polynomial 0x1021, initial value 0xFFFF, no reflection, no final XOR.

const POLY: u16 = 0x1021;
const INIT: u16 = 0xFFFF;

/// Computes the CRC-16/CCITT-FALSE checksum of `data`.
pub fn checksum(data: &str) -> u16 {
    let mut crc = INIT;
    for &byte in data.as_bytes() {
        crc ^= (byte as u16) << 8;
        for _ in 0..8 {
            if crc & 0x8000 != 0 {
                crc = (crc << 1) ^ POLY;
            } else {
                crc <<= 1;
            }
        }
    }
    crc
}

/// Computes the checksum of `data` in the wire format QRIS uses:
/// four uppercase hex digits, big-endian.
pub fn checksum_hex(data: &str) -> String {
    format!("{:04X}", checksum(data))
}
