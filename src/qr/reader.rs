//! QR code reading from images.
//!
//! Scans an image for QR codes and returns their text content; whether
//! that content is a structurally valid QRIS payload is the TLV codec's
//! call, not the scanner's.

use image::DynamicImage;
use rqrr::PreparedImage;
use std::path::Path;

use super::QrError;

/// Reads the first QR code found in an image and returns its content.
pub fn read_qr(image: &DynamicImage) -> Result<String, QrError> {
    let gray = image.to_luma8();
    let mut prepared = PreparedImage::prepare(gray);
    let grids = prepared.detect_grids();

    if grids.is_empty() {
        return Err(QrError::NoQrCodeFound);
    }

    let (_, content) = grids[0]
        .decode()
        .map_err(|e| QrError::QrReadError(format!("Failed to decode QR: {e:?}")))?;

    Ok(content)
}

/// Reads the first QR code from an image file.
pub fn read_qr_from_file<P: AsRef<Path>>(path: P) -> Result<String, QrError> {
    let image = image::open(path).map_err(|e| QrError::QrReadError(e.to_string()))?;
    read_qr(&image)
}

/// Reads every decodable QR code in an image.
///
/// Useful when an image might contain multiple QR codes.
pub fn read_all_qr(image: &DynamicImage) -> Result<Vec<String>, QrError> {
    let gray = image.to_luma8();
    let mut prepared = PreparedImage::prepare(gray);
    let grids = prepared.detect_grids();

    if grids.is_empty() {
        return Err(QrError::NoQrCodeFound);
    }

    let results: Vec<String> = grids
        .into_iter()
        .filter_map(|grid| grid.decode().ok().map(|(_, content)| content))
        .collect();

    if results.is_empty() {
        return Err(QrError::QrReadError(
            "Found QR codes but failed to decode any".to_string(),
        ));
    }

    Ok(results)
}
