//! Payload inspection command.

use anyhow::{Context, Result};
use clap::Args;

use qris_hd::qris;
use qris_hd::tlv::Payload;

use super::{payload_or_stdin, print_payload_tree, CommandExecutor};

/// Parse a QRIS payload and print its TLV structure.
#[derive(Args, Debug)]
pub struct InspectCommand {
    /// QRIS payload string - reads from stdin if not provided
    #[arg(short, long)]
    pub payload: Option<String>,

    /// Print the parsed structure as JSON
    #[arg(short, long)]
    pub json: bool,
}

impl CommandExecutor for InspectCommand {
    fn execute(&self) -> Result<()> {
        let payload_str = payload_or_stdin(&self.payload)?;
        let payload = Payload::parse(&payload_str).context("Payload is not valid QRIS TLV")?;

        if self.json {
            let json =
                serde_json::to_string_pretty(&payload).context("Failed to serialize payload")?;
            println!("{json}");
            return Ok(());
        }

        println!("QRIS payload ({} chars, {} fields)", payload_str.len(), payload.len());
        match qris::is_dynamic(&payload) {
            Some(true) => println!("  Type: dynamic (single transaction)"),
            Some(false) => println!("  Type: static (reusable)"),
            None => {}
        }
        println!("Fields:");
        print_payload_tree(&payload);

        if payload.is_valid() {
            println!("Checksum: OK");
        } else {
            println!("Findings:");
            for warning in payload.warnings() {
                println!("  - {warning}");
            }
        }

        Ok(())
    }
}
