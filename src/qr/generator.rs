//! QR code generation from QRIS payload strings.
//!
//! Renders with the settings the HD generator exposes: output pixel size,
//! foreground/background colors, error correction level and quiet-zone
//! margin.

use image::{DynamicImage, Rgba, RgbaImage};
use qrcode::render::svg;
use qrcode::{EcLevel, QrCode};
use std::path::Path;
use thiserror::Error;

/// Errors that can occur during QR code operations.
#[derive(Error, Debug)]
pub enum QrError {
    #[error("QR code generation failed: {0}")]
    QrGenerationError(String),

    #[error("Image save error: {0}")]
    ImageSaveError(String),

    #[error("Invalid color {0:?}: expected #RGB or #RRGGBB hex")]
    InvalidColor(String),

    #[error("Invalid error correction level {0:?}: expected L, M, Q or H")]
    InvalidEcLevel(String),

    #[error("QR code read error: {0}")]
    QrReadError(String),

    #[error("No QR code found in image")]
    NoQrCodeFound,

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

/// Output format for QR codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum QrFormat {
    /// PNG image (default)
    #[default]
    Png,
    /// SVG vector image
    Svg,
    /// ASCII art (for terminal display)
    Ascii,
}

/// Configuration for QR code generation.
#[derive(Debug, Clone)]
pub struct QrConfig {
    /// Target output size in pixels (default: 1024)
    pub size: u32,
    /// Module (dark) color (default: black)
    pub foreground: Rgba<u8>,
    /// Background color (default: white)
    pub background: Rgba<u8>,
    /// Error correction level (default: Medium)
    pub ec_level: EcLevel,
    /// Quiet zone size in modules (default: 4)
    pub margin: u32,
    /// Output format
    pub format: QrFormat,
}

impl Default for QrConfig {
    fn default() -> Self {
        Self {
            size: 1024,
            foreground: Rgba([0, 0, 0, 255]),
            background: Rgba([255, 255, 255, 255]),
            ec_level: EcLevel::M,
            margin: 4,
            format: QrFormat::Png,
        }
    }
}

/// Output from QR code generation.
pub enum QrOutput {
    /// PNG/image output
    Image(DynamicImage),
    /// SVG string output
    Svg(String),
    /// ASCII art output
    Ascii(String),
}

impl QrOutput {
    /// Returns true if this is an image output.
    pub fn is_image(&self) -> bool {
        matches!(self, QrOutput::Image(_))
    }

    /// Returns the image if this is an image output.
    pub fn into_image(self) -> Option<DynamicImage> {
        match self {
            QrOutput::Image(img) => Some(img),
            _ => None,
        }
    }

    /// Returns the string content (for SVG or ASCII).
    pub fn as_string(&self) -> Option<&str> {
        match self {
            QrOutput::Svg(s) | QrOutput::Ascii(s) => Some(s),
            _ => None,
        }
    }
}

/// Parses a `#RGB` or `#RRGGBB` hex color (leading `#` optional).
pub fn parse_color(input: &str) -> Result<Rgba<u8>, QrError> {
    let hex = input.strip_prefix('#').unwrap_or(input);
    let invalid = || QrError::InvalidColor(input.to_string());

    let expand = |digits: &str| -> Result<Vec<u8>, QrError> {
        digits
            .chars()
            .map(|c| {
                c.to_digit(16)
                    .map(|d| (d * 16 + d) as u8)
                    .ok_or_else(invalid)
            })
            .collect()
    };

    let (r, g, b) = match hex.len() {
        3 => {
            let c = expand(hex)?;
            (c[0], c[1], c[2])
        }
        6 => {
            let parse2 = |at: usize| {
                u8::from_str_radix(&hex[at..at + 2], 16).map_err(|_| invalid())
            };
            (parse2(0)?, parse2(2)?, parse2(4)?)
        }
        _ => return Err(invalid()),
    };
    Ok(Rgba([r, g, b, 255]))
}

/// Parses an error correction level letter (L, M, Q or H).
pub fn parse_ec_level(input: &str) -> Result<EcLevel, QrError> {
    match input.to_ascii_uppercase().as_str() {
        "L" => Ok(EcLevel::L),
        "M" => Ok(EcLevel::M),
        "Q" => Ok(EcLevel::Q),
        "H" => Ok(EcLevel::H),
        _ => Err(QrError::InvalidEcLevel(input.to_string())),
    }
}

fn color_hex(c: Rgba<u8>) -> String {
    format!("#{:02x}{:02x}{:02x}", c[0], c[1], c[2])
}

/// Generates a QR code from a payload string.
///
/// For PNG output the module size is derived from the requested pixel
/// size and the margin is composited in the background color, so the
/// result is close to `size`×`size` pixels. SVG and ASCII output use the
/// renderer's standard quiet zone, toggled by `margin > 0`.
pub fn generate_qr(payload: &str, config: &QrConfig) -> Result<QrOutput, QrError> {
    let qr = QrCode::with_error_correction_level(payload, config.ec_level)
        .map_err(|e| QrError::QrGenerationError(e.to_string()))?;

    match config.format {
        QrFormat::Png => {
            let modules = qr.width() as u32;
            let module_px = (config.size / (modules + 2 * config.margin)).max(1);

            let image: RgbaImage = qr
                .render::<Rgba<u8>>()
                .quiet_zone(false)
                .module_dimensions(module_px, module_px)
                .dark_color(config.foreground)
                .light_color(config.background)
                .build();

            let pad = config.margin * module_px;
            let mut canvas = RgbaImage::from_pixel(
                image.width() + 2 * pad,
                image.height() + 2 * pad,
                config.background,
            );
            image::imageops::replace(&mut canvas, &image, pad as i64, pad as i64);

            Ok(QrOutput::Image(DynamicImage::ImageRgba8(canvas)))
        }
        QrFormat::Svg => {
            let dark = color_hex(config.foreground);
            let light = color_hex(config.background);
            let svg_string = qr
                .render()
                .min_dimensions(config.size, config.size)
                .quiet_zone(config.margin > 0)
                .dark_color(svg::Color(&dark))
                .light_color(svg::Color(&light))
                .build();

            Ok(QrOutput::Svg(svg_string))
        }
        QrFormat::Ascii => {
            let ascii = qr
                .render::<char>()
                .quiet_zone(config.margin > 0)
                .module_dimensions(2, 1)
                .build();

            Ok(QrOutput::Ascii(ascii))
        }
    }
}

/// Generates a QR code and saves it to a file.
pub fn generate_qr_to_file<P: AsRef<Path>>(
    payload: &str,
    path: P,
    config: &QrConfig,
) -> Result<(), QrError> {
    let output = generate_qr(payload, config)?;
    let path = path.as_ref();

    match output {
        QrOutput::Image(img) => {
            img.save(path)
                .map_err(|e| QrError::ImageSaveError(e.to_string()))?;
        }
        QrOutput::Svg(svg) => {
            std::fs::write(path, svg)?;
        }
        QrOutput::Ascii(ascii) => {
            std::fs::write(path, ascii)?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::qris::SAMPLE_PAYLOAD;

    #[test]
    fn test_generate_qr_png() {
        let config = QrConfig::default();
        let output = generate_qr(SAMPLE_PAYLOAD, &config).unwrap();
        assert!(output.is_image());

        let image = output.into_image().unwrap();
        // Close to the requested size, never larger.
        assert!(image.width() <= 1024);
        assert!(image.width() > 512);
        assert_eq!(image.width(), image.height());
    }

    #[test]
    fn test_generate_qr_svg_uses_colors() {
        let config = QrConfig {
            format: QrFormat::Svg,
            foreground: parse_color("#112233").unwrap(),
            ..Default::default()
        };
        let output = generate_qr(SAMPLE_PAYLOAD, &config).unwrap();
        let svg = output.as_string().unwrap();
        assert!(svg.contains("<svg"));
        assert!(svg.contains("#112233"));
    }

    #[test]
    fn test_generate_qr_ascii() {
        let config = QrConfig {
            format: QrFormat::Ascii,
            ..Default::default()
        };
        let output = generate_qr(SAMPLE_PAYLOAD, &config).unwrap();
        let ascii = output.as_string().unwrap();
        assert!(ascii.contains('█') || ascii.contains('#') || ascii.contains(' '));
    }

    #[test]
    fn test_margin_adds_background_border() {
        let config = QrConfig {
            size: 512,
            margin: 4,
            ..Default::default()
        };
        let with_margin = generate_qr(SAMPLE_PAYLOAD, &config)
            .unwrap()
            .into_image()
            .unwrap();
        // Corner pixel is background.
        let corner = with_margin.to_rgba8().get_pixel(0, 0).0;
        assert_eq!(corner, [255, 255, 255, 255]);
    }

    #[test]
    fn test_parse_color_forms() {
        assert_eq!(parse_color("#000000").unwrap(), Rgba([0, 0, 0, 255]));
        assert_eq!(parse_color("ffffff").unwrap(), Rgba([255, 255, 255, 255]));
        assert_eq!(parse_color("#abc").unwrap(), Rgba([0xaa, 0xbb, 0xcc, 255]));
        assert_eq!(parse_color("#1A2B3C").unwrap(), Rgba([0x1a, 0x2b, 0x3c, 255]));
        assert!(parse_color("#12345").is_err());
        assert!(parse_color("red").is_err());
    }

    #[test]
    fn test_parse_ec_level() {
        assert_eq!(parse_ec_level("L").unwrap(), EcLevel::L);
        assert_eq!(parse_ec_level("m").unwrap(), EcLevel::M);
        assert_eq!(parse_ec_level("Q").unwrap(), EcLevel::Q);
        assert_eq!(parse_ec_level("h").unwrap(), EcLevel::H);
        assert!(parse_ec_level("X").is_err());
    }
}
