//! QR code generation command.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;

use qris_hd::qr::{generate_qr_to_file, parse_color, parse_ec_level, QrConfig, QrFormat};
use qris_hd::qris;
use qris_hd::tlv::Payload;

use super::{payload_or_stdin, print_warnings, CommandExecutor};

/// Validate a QRIS payload and render it as a QR code image.
#[derive(Args, Debug)]
pub struct GenerateCommand {
    /// QRIS payload string - reads from stdin if not provided
    #[arg(short, long)]
    pub payload: Option<String>,

    /// Use the bundled sample payload instead of providing one
    #[arg(long, conflicts_with = "payload")]
    pub sample: bool,

    /// Output file path (PNG, SVG, or TXT for ASCII)
    #[arg(short, long)]
    pub output: PathBuf,

    /// Output format: png (default), svg, or ascii
    #[arg(short, long, default_value = "png")]
    pub format: String,

    /// Output size in pixels
    #[arg(short, long, default_value_t = 1024)]
    pub size: u32,

    /// Foreground (module) color as #RGB or #RRGGBB hex
    #[arg(long, default_value = "#000000")]
    pub foreground: String,

    /// Background color as #RGB or #RRGGBB hex
    #[arg(long, default_value = "#ffffff")]
    pub background: String,

    /// Error correction level: L (7%), M (15%), Q (25%), or H (30%)
    #[arg(short, long, default_value = "M")]
    pub ec_level: String,

    /// Quiet zone margin in modules
    #[arg(short, long, default_value_t = 4)]
    pub margin: u32,

    /// Render even if the payload has warnings (bad checksum, duplicate tags)
    #[arg(long)]
    pub force: bool,
}

impl CommandExecutor for GenerateCommand {
    fn execute(&self) -> Result<()> {
        let payload_str = if self.sample {
            qris::SAMPLE_PAYLOAD.to_string()
        } else {
            payload_or_stdin(&self.payload)?
        };

        // Fast shape check before the structural parse.
        let issues = qris::quick_check(&payload_str);
        if !issues.is_empty() && !self.force {
            for issue in &issues {
                eprintln!("error: {issue}");
            }
            anyhow::bail!("Payload failed QRIS pre-checks (use --force to render anyway)");
        }

        let payload = Payload::parse(&payload_str).context("Payload is not valid QRIS TLV")?;
        print_warnings(&payload);
        if !payload.is_valid() && !self.force {
            anyhow::bail!("Payload has warnings (use --force to render anyway, or `fix` to repair the checksum)");
        }

        let qr_format = match self.format.to_lowercase().as_str() {
            "png" => QrFormat::Png,
            "svg" => QrFormat::Svg,
            "ascii" | "txt" => QrFormat::Ascii,
            _ => anyhow::bail!("Unknown format: {}. Use: png, svg, or ascii", self.format),
        };

        let config = QrConfig {
            size: self.size,
            foreground: parse_color(&self.foreground)?,
            background: parse_color(&self.background)?,
            ec_level: parse_ec_level(&self.ec_level)?,
            margin: self.margin,
            format: qr_format,
        };

        // The input string is rendered verbatim; `fix` exists for
        // repairing checksums, generation never rewrites a payload.
        generate_qr_to_file(&payload_str, &self.output, &config)
            .context("Failed to generate QR code")?;

        println!("QR code generated: {}", self.output.display());
        println!("  Payload length: {} chars", payload_str.len());
        if let Some(name) = qris::merchant_name(&payload) {
            println!("  Merchant: {name}");
        }
        if let Some(city) = qris::merchant_city(&payload) {
            println!("  City: {city}");
        }
        match qris::transaction_amount(&payload) {
            Some(amount) => println!("  Amount: {amount}"),
            None => println!("  Amount: open (entered at payment time)"),
        }
        println!("  Size: {}x{} px target", self.size, self.size);
        println!("  Error correction: {}", self.ec_level.to_uppercase());
        println!("  Format: {}", self.format);

        Ok(())
    }
}
