//! Shared helpers for CLI commands.

use anyhow::Result;

use rackinfo_core::{BlockDecoder, DecoderKind, FieldDecoder, RackDecoder};

/// Build the configured hostname decoder.
pub fn build_decoder(kind: DecoderKind, nodes_per_rack: u32) -> Result<Box<dyn RackDecoder>> {
    Ok(match kind {
        DecoderKind::Blocks => {
            if nodes_per_rack == 0 {
                anyhow::bail!("nodes-per-rack must be at least 1");
            }
            Box::new(BlockDecoder { nodes_per_rack })
        }
        DecoderKind::Fields => Box::new(FieldDecoder),
    })
}
