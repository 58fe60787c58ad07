//! Command module - Strategy pattern for CLI commands.
//!
//! Each command is a separate module implementing the `CommandExecutor`
//! trait, keeping argument parsing and execution logic together.

mod fix;
mod generate;
mod inspect;
mod scan;

pub use fix::FixCommand;
pub use generate::GenerateCommand;
pub use inspect::InspectCommand;
pub use scan::ScanCommand;

use std::io::{self, Read};

use anyhow::{Context, Result};

use qris_hd::qris;
use qris_hd::tlv::Payload;

/// Trait for command execution - Strategy pattern.
///
/// Each command struct holds its parsed arguments and implements
/// this trait to define its execution logic.
pub trait CommandExecutor {
    /// Executes the command with its parsed arguments.
    fn execute(&self) -> Result<()>;
}

/// Resolves the payload string from an optional argument, falling back to
/// stdin the way interactive use expects.
pub(crate) fn payload_or_stdin(payload: &Option<String>) -> Result<String> {
    let raw = match payload {
        Some(p) => p.clone(),
        None => {
            eprintln!("Reading QRIS payload from stdin (Ctrl+D to finish):");
            let mut buffer = String::new();
            io::stdin()
                .read_to_string(&mut buffer)
                .context("Failed to read payload from stdin")?;
            buffer
        }
    };
    let trimmed = raw.trim().to_string();
    if trimmed.is_empty() {
        anyhow::bail!("Payload cannot be empty");
    }
    Ok(trimmed)
}

/// Prints a parsed payload as an indented TLV tree with tag names.
pub(crate) fn print_payload_tree(payload: &Payload) {
    for field in payload.fields() {
        let name = qris::tag_name(field.tag()).unwrap_or("Unknown");
        match field.nested() {
            Some(nested) => {
                println!("  {} ({})", field.tag(), name);
                for sub in nested.fields() {
                    println!("    {} = {:?}", sub.tag(), sub.value());
                }
            }
            None => {
                if field.has_nested_parse_error() {
                    println!("  {} ({}) = {:?}  [value is not nested TLV]", field.tag(), name, field.value());
                } else {
                    println!("  {} ({}) = {:?}", field.tag(), name, field.value());
                }
            }
        }
    }
    if let Some(stored) = payload.stored_checksum() {
        println!("  63 (CRC) = {stored:?}");
    }
}

/// Prints warning-level findings to stderr.
pub(crate) fn print_warnings(payload: &Payload) {
    for warning in payload.warnings() {
        eprintln!("warning: {warning}");
    }
}
