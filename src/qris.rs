//! QRIS payment-level vocabulary on top of the TLV codec.
//!
//! Tag names and conventions follow the EMVCo merchant-presented QR
//! specification that QRIS derives from: tag 00 is the payload format
//! indicator, 26-51 carry merchant account information, 52-61 describe
//! the merchant and transaction, 63 is the CRC.

use thiserror::Error;

use crate::tlv::Payload;
use crate::{MAX_PAYLOAD_LEN, MIN_PAYLOAD_LEN};

/// Every QRIS payload starts with tag 00 (length 02, value "01"): the
/// payload format indicator.
pub const FORMAT_PREFIX: &str = "00020101";

/// A structurally valid sample payload with a correct checksum, for demos
/// and smoke tests.
pub const SAMPLE_PAYLOAD: &str = "00020101021226630016COM.NOBUBANK.WWW0118936005030000089824021003123456780303UME51440014ID.CO.QRIS.WWW0215ID20200000000010303UME520458125303360540810000.005802ID5909Kopi Satu6007Jakarta61051011062070703A0163042A9E";

/// Findings from the fast heuristic pre-check. These mirror what a
/// payment app checks before attempting a structural parse; none of them
/// replace [`Payload::parse`].
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum QuickCheckIssue {
    #[error("QRIS data cannot be empty")]
    Empty,

    #[error("QRIS data seems too short (under {MIN_PAYLOAD_LEN} characters)")]
    TooShort,

    #[error("QRIS data exceeds maximum length of {MAX_PAYLOAD_LEN} characters")]
    TooLong,

    #[error("invalid QRIS format: payload should start with the version identifier {FORMAT_PREFIX}")]
    BadPrefix,
}

/// Cheap shape checks on a candidate payload string. Returns every issue
/// found so a caller can report them all at once.
pub fn quick_check(input: &str) -> Vec<QuickCheckIssue> {
    let mut issues = Vec::new();
    let trimmed = input.trim();

    if trimmed.is_empty() {
        issues.push(QuickCheckIssue::Empty);
        return issues;
    }
    if trimmed.len() < MIN_PAYLOAD_LEN {
        issues.push(QuickCheckIssue::TooShort);
    }
    if trimmed.len() > MAX_PAYLOAD_LEN {
        issues.push(QuickCheckIssue::TooLong);
    }
    if !trimmed.starts_with(FORMAT_PREFIX) {
        issues.push(QuickCheckIssue::BadPrefix);
    }
    issues
}

/// Human-readable name for a top-level QRIS tag, if the standard assigns
/// one.
pub fn tag_name(tag: &str) -> Option<&'static str> {
    let n: u8 = tag.parse().ok()?;
    Some(match n {
        0 => "Payload Format Indicator",
        1 => "Point of Initiation Method",
        2..=25 => "Reserved",
        26..=51 => "Merchant Account Information",
        52 => "Merchant Category Code",
        53 => "Transaction Currency",
        54 => "Transaction Amount",
        55 => "Tip or Convenience Indicator",
        56 => "Convenience Fee Fixed",
        57 => "Convenience Fee Percentage",
        58 => "Country Code",
        59 => "Merchant Name",
        60 => "Merchant City",
        61 => "Postal Code",
        62 => "Additional Data",
        63 => "CRC",
        64 => "Merchant Information (alternate language)",
        _ => return None,
    })
}

/// Merchant name (tag 59).
pub fn merchant_name(payload: &Payload) -> Option<&str> {
    payload.get_field("59").map(|f| f.value())
}

/// Merchant city (tag 60).
pub fn merchant_city(payload: &Payload) -> Option<&str> {
    payload.get_field("60").map(|f| f.value())
}

/// Country code (tag 58).
pub fn country_code(payload: &Payload) -> Option<&str> {
    payload.get_field("58").map(|f| f.value())
}

/// Transaction amount (tag 54), absent for open-amount codes.
pub fn transaction_amount(payload: &Payload) -> Option<&str> {
    payload.get_field("54").map(|f| f.value())
}

/// ISO 4217 numeric currency code (tag 53); "360" is the Indonesian
/// rupiah.
pub fn currency_code(payload: &Payload) -> Option<&str> {
    payload.get_field("53").map(|f| f.value())
}

/// True when the point of initiation method (tag 01) marks the code as
/// dynamic ("12", one transaction), false for static ("11", reusable).
/// `None` when the tag is absent or unrecognized.
pub fn is_dynamic(payload: &Payload) -> Option<bool> {
    match payload.get_field("01")?.value() {
        "12" => Some(true),
        "11" => Some(false),
        _ => None,
    }
}
