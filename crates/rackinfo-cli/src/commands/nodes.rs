//! Nodes command implementation.

use anyhow::Result;
use tracing::info;

use rackinfo_core::{
    DecoderKind, FilterConfig, Format, OutputField, PartitionFilter, RackFilter, SinfoClient,
    StateFilter, filter, report,
};

use super::common;

/// Execute the nodes command.
#[allow(clippy::too_many_arguments)]
pub async fn execute(
    states: &str,
    racks: &str,
    partitions: &str,
    numnodes: &str,
    format: &str,
    output: &str,
    unique: &str,
    decoder: &str,
    nodes_per_rack: u32,
) -> Result<()> {
    // Validate the whole configuration before invoking sinfo.
    let config = FilterConfig {
        states: StateFilter::parse(states),
        racks: RackFilter::parse(racks),
        partitions: PartitionFilter::parse(partitions),
        numnodes: filter::parse_numnodes(numnodes)?,
    };
    let field = OutputField::parse(output)?;
    let format = Format::parse(format)?;
    let unique = report::parse_unique(unique)?;
    let kind = DecoderKind::parse(decoder)?;

    if kind == DecoderKind::Blocks && field.needs_field_decoding() {
        anyhow::bail!("output '{output}' is only derived by the fields decoder");
    }

    let decoder = common::build_decoder(kind, nodes_per_rack)?;

    let all = SinfoClient::new(None).fetch(decoder.as_ref()).await?;
    let filtered = config.apply(&all);
    info!(total = all.len(), filtered = filtered.len(), "inventory filtered");

    println!("{}", report::render(&all, &filtered, field, format, unique)?);

    Ok(())
}
