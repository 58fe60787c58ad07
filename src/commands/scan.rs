//! QR image scanning command.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;

use qris_hd::qr::read_qr_from_file;
use qris_hd::qris;
use qris_hd::tlv::Payload;

use super::{print_payload_tree, print_warnings, CommandExecutor};

/// Read a QR code image and extract the QRIS payload.
#[derive(Args, Debug)]
pub struct ScanCommand {
    /// Path to the image containing the QR code
    #[arg(short, long)]
    pub input: PathBuf,

    /// Write the payload to a file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Print the parsed TLV structure as well
    #[arg(short, long)]
    pub verbose: bool,
}

impl CommandExecutor for ScanCommand {
    fn execute(&self) -> Result<()> {
        let content = read_qr_from_file(&self.input)
            .with_context(|| format!("Failed to read QR code from {}", self.input.display()))?;

        // Validation findings go to stderr so the payload itself stays
        // pipeable.
        for issue in qris::quick_check(&content) {
            eprintln!("warning: {issue}");
        }
        match Payload::parse(&content) {
            Ok(payload) => {
                print_warnings(&payload);
                if payload.is_valid() {
                    eprintln!("Payload is structurally valid QRIS");
                }
                if self.verbose {
                    println!("Fields:");
                    print_payload_tree(&payload);
                }
            }
            Err(e) => eprintln!("warning: content is not QRIS TLV: {e}"),
        }

        if let Some(output_path) = &self.output {
            std::fs::write(output_path, &content)
                .with_context(|| format!("Failed to write to {}", output_path.display()))?;
            println!("Payload written to: {}", output_path.display());
        } else {
            println!("{content}");
        }

        Ok(())
    }
}
