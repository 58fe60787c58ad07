//! Checksum repair command.

use anyhow::{Context, Result};
use clap::Args;

use qris_hd::tlv::Payload;

use super::{payload_or_stdin, CommandExecutor};

/// Re-serialize a QRIS payload with a freshly computed checksum.
///
/// Structural errors (bad tags, truncated values) cannot be repaired and
/// still fail; a wrong or stale CRC is replaced with the correct one.
#[derive(Args, Debug)]
pub struct FixCommand {
    /// QRIS payload string - reads from stdin if not provided
    #[arg(short, long)]
    pub payload: Option<String>,
}

impl CommandExecutor for FixCommand {
    fn execute(&self) -> Result<()> {
        let payload_str = payload_or_stdin(&self.payload)?;
        let payload = Payload::parse(&payload_str)
            .context("Payload is not valid QRIS TLV; only checksums can be repaired")?;

        let fixed = payload.serialize();
        if fixed == payload_str {
            eprintln!("Checksum already correct, payload unchanged");
        } else {
            eprintln!(
                "Checksum repaired: {} -> {}",
                payload.stored_checksum().unwrap_or("????"),
                &fixed[fixed.len() - 4..]
            );
        }
        println!("{fixed}");

        Ok(())
    }
}
