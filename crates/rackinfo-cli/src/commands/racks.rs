//! Racks command implementation.

use anyhow::Result;
use console::style;

use rackinfo_core::{DecoderKind, HostlistClient, SinfoClient, StateFilter, report};

use super::common;

/// Execute the racks command.
pub async fn execute(
    states: &str,
    partition: Option<&str>,
    decoder: &str,
    nodes_per_rack: u32,
) -> Result<()> {
    let kind = DecoderKind::parse(decoder)?;
    let decoder = common::build_decoder(kind, nodes_per_rack)?;
    let state_filter = StateFilter::parse(states);

    println!(
        "Searching for the following states: {}",
        style(states).cyan()
    );

    let nodes = SinfoClient::new(partition).fetch(decoder.as_ref()).await?;
    let hostlist = HostlistClient::new();

    for group in report::group_by_rack(&nodes, &state_filter) {
        let all = hostlist.compact(&group.all).await?;
        let matching = if group.matching.is_empty() {
            String::new()
        } else {
            hostlist.compact(&group.matching).await?
        };
        println!("{}", report::summary_line(&group, &all, &matching));
    }

    Ok(())
}
