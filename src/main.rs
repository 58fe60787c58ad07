//! QRIS-HD - QRIS payload toolkit
//!
//! A CLI for validating, inspecting and rendering QRIS (Indonesian QR
//! payment standard) payloads. Payloads can be typed, piped in, or
//! scanned out of existing QR images.

use anyhow::Result;
use clap::{Parser, Subcommand};

mod commands;

use commands::{CommandExecutor, FixCommand, GenerateCommand, InspectCommand, ScanCommand};

/// QRIS-HD - validate, inspect and render QRIS payment codes
#[derive(Parser)]
#[command(name = "qris-hd")]
#[command(version)]
#[command(about = "Validate, inspect and render QRIS (Indonesian QR payment) payloads")]
#[command(long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate a QRIS payload and render it as a QR code image
    Generate(GenerateCommand),

    /// Read a QR code image and extract the QRIS payload
    Scan(ScanCommand),

    /// Parse a QRIS payload and print its TLV structure
    Inspect(InspectCommand),

    /// Re-serialize a payload with a freshly computed checksum
    Fix(FixCommand),
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Generate(cmd) => cmd.execute(),
        Commands::Scan(cmd) => cmd.execute(),
        Commands::Inspect(cmd) => cmd.execute(),
        Commands::Fix(cmd) => cmd.execute(),
    }
}
