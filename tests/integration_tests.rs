//! Integration tests for QRIS-HD
//!
//! Exercises the public API end to end: TLV parse/serialize round-trips,
//! checksum behavior, payload construction, and the full
//! payload -> QR image -> scan -> parse pipeline.

use qris_hd::qr::{generate_qr, read_qr, QrConfig};
use qris_hd::qris::{self, SAMPLE_PAYLOAD};
use qris_hd::tlv::{checksum_hex, ParseError, Payload, Warning};

/// Test that the bundled sample payload parses cleanly and round-trips
/// byte for byte
#[test]
fn test_sample_payload_round_trip() {
    let payload = Payload::parse(SAMPLE_PAYLOAD).unwrap();
    assert!(payload.is_valid());
    assert_eq!(payload.serialize(), SAMPLE_PAYLOAD);

    // Re-parsing the serialized form reconstructs the same fields.
    let reparsed = Payload::parse(&payload.serialize()).unwrap();
    assert_eq!(reparsed.fields(), payload.fields());
}

/// Test that the serialized checksum always equals an independent CRC of
/// the emitted body
#[test]
fn test_serialized_checksum_matches_independent_crc() {
    let payload = Payload::parse(SAMPLE_PAYLOAD).unwrap();
    let out = payload.serialize();
    let (body, stored) = out.split_at(out.len() - 4);
    assert_eq!(checksum_hex(body), stored);
}

/// Test merchant account information is retrievable through the nested
/// payload view
#[test]
fn test_merchant_account_nested_lookup() {
    let payload = Payload::parse(SAMPLE_PAYLOAD).unwrap();

    let account = payload.get_field("26").unwrap().nested().unwrap();
    assert_eq!(account.get_field("00").unwrap().value(), "COM.NOBUBANK.WWW");
    assert_eq!(account.get_field("01").unwrap().value(), "936005030000089824");

    let qris_info = payload.get_field("51").unwrap().nested().unwrap();
    assert_eq!(qris_info.get_field("00").unwrap().value(), "ID.CO.QRIS.WWW");
}

/// Test that a zeroed checksum parses structurally but is flagged
#[test]
fn test_zeroed_checksum_is_flagged_not_fatal() {
    let broken = format!("{}0000", &SAMPLE_PAYLOAD[..SAMPLE_PAYLOAD.len() - 4]);
    let payload = Payload::parse(&broken).unwrap();

    assert!(!payload.is_valid());
    assert!(matches!(
        payload.warnings(),
        [Warning::ChecksumMismatch { stored, computed }]
            if stored == "0000" && computed == "2A9E"
    ));

    // Structure still fully inspectable.
    assert_eq!(qris::merchant_name(&payload), Some("Kopi Satu"));

    // Serialization repairs the checksum.
    assert_eq!(payload.serialize(), SAMPLE_PAYLOAD);
}

/// Test that a garbled real-world transcription fails hard instead of
/// producing a payload
#[test]
fn test_garbled_payload_fails_hard() {
    // A circulating "demo" QRIS string whose inner lengths are wrong; the
    // scan runs off the field boundaries and hits non-digit tag bytes.
    let garbled = "00020101021226670016COM.NOBUBANK.WWW01189360050300000898240214031234567890303UME51440014ID.CO.QRIS.WWW0215ID20200000000010303UME5204481253033605502011954041000550201006009Jakarta6105123456304B8A4";
    assert!(matches!(
        Payload::parse(garbled),
        Err(ParseError::MalformedTag { .. })
    ));
}

/// Test editing the transaction amount and re-serializing keeps the
/// payload consistent
#[test]
fn test_edit_amount_and_reserialize() {
    let payload = Payload::parse(SAMPLE_PAYLOAD).unwrap();
    let updated = payload.set_field("54", "25000.00").unwrap();

    let out = updated.serialize();
    let reparsed = Payload::parse(&out).unwrap();
    assert!(reparsed.is_valid());
    assert_eq!(qris::transaction_amount(&reparsed), Some("25000.00"));

    // Everything else unchanged, including field order.
    assert_eq!(qris::merchant_name(&reparsed), Some("Kopi Satu"));
    let tags: Vec<&str> = payload.fields().iter().map(|f| f.tag()).collect();
    let new_tags: Vec<&str> = reparsed.fields().iter().map(|f| f.tag()).collect();
    assert_eq!(tags, new_tags);
}

/// Test building a payload from scratch, composite field included
#[test]
fn test_build_payload_from_scratch() {
    let account = Payload::new()
        .set_field("00", "ID.CO.EXAMPLE.WWW")
        .unwrap()
        .set_field("02", "936000140000000001")
        .unwrap();

    let payload = Payload::new()
        .set_field("00", "01")
        .unwrap()
        .set_field("01", "11")
        .unwrap()
        .set_field("26", &account.to_tlv_string())
        .unwrap()
        .set_field("58", "ID")
        .unwrap()
        .set_field("59", "Warung Bu Sri")
        .unwrap()
        .set_field("60", "Bandung")
        .unwrap();

    let out = payload.serialize();
    let parsed = Payload::parse(&out).unwrap();
    assert!(parsed.is_valid());
    assert_eq!(parsed.fields(), payload.fields());

    let nested = parsed.get_field("26").unwrap().nested().unwrap();
    assert_eq!(nested.get_field("00").unwrap().value(), "ID.CO.EXAMPLE.WWW");
    assert_eq!(qris::merchant_name(&parsed), Some("Warung Bu Sri"));
}

/// Test removing a field yields a new, still-consistent payload
#[test]
fn test_remove_field_keeps_payload_consistent() {
    let payload = Payload::parse(SAMPLE_PAYLOAD).unwrap();
    let without_amount = payload.remove_field("54");

    let reparsed = Payload::parse(&without_amount.serialize()).unwrap();
    assert!(reparsed.is_valid());
    assert_eq!(qris::transaction_amount(&reparsed), None);

    // The source payload is untouched.
    assert_eq!(qris::transaction_amount(&payload), Some("10000.00"));
}

/// Test the full pipeline: render the payload to a QR image and scan it
/// back
#[test]
fn test_generate_and_scan_pipeline() {
    let config = QrConfig::default();
    let output = generate_qr(SAMPLE_PAYLOAD, &config).unwrap();
    let image = output.into_image().unwrap();

    let scanned = read_qr(&image).unwrap();
    assert_eq!(scanned, SAMPLE_PAYLOAD);

    let payload = Payload::parse(&scanned).unwrap();
    assert!(payload.is_valid());
    assert_eq!(qris::merchant_city(&payload), Some("Jakarta"));
}

/// Test the quick heuristic check agrees with the structural parser on
/// the sample
#[test]
fn test_quick_check_and_parse_agree_on_sample() {
    assert!(qris::quick_check(SAMPLE_PAYLOAD).is_empty());
    assert!(Payload::parse(SAMPLE_PAYLOAD).unwrap().is_valid());
}
