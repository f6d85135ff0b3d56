//! Rack-level occupancy reporting over the Slurm node inventory.
//!
//! This crate turns `sinfo --Node --noheader` output into structured node
//! records, derives each node's physical rack location from its hostname,
//! and runs an ordered filter pipeline over the result:
//!
//! 1. **Inventory**: [`SinfoClient`] queries sinfo in per-node mode and
//!    parses `HOSTNAME NODES PARTITION STATE` lines. A line aggregating
//!    more than one node aborts the run.
//! 2. **Location**: a pluggable [`RackDecoder`] maps hostnames to rack,
//!    rack-unit, and chassis tokens ([`FieldDecoder`]) or to block-numbered
//!    racks ([`BlockDecoder`]).
//! 3. **Filtering**: [`FilterConfig`] applies state, rack, partition, and
//!    per-rack count stages in a fixed order.
//! 4. **Reporting**: flat projections (csv/exclude/row/count) or a per-rack
//!    summary with compact hostlists via [`HostlistClient`].
//!
//! # Example
//!
//! ```
//! use rackinfo_core::{
//!     FieldDecoder, FilterConfig, Format, OutputField, PartitionFilter, RackFilter,
//!     SinfoClient, StateFilter, report,
//! };
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() -> rackinfo_core::RackResult<()> {
//! let client = SinfoClient::mock("cpu-h21a5-u7-svn2 1 cclake* idle\n");
//! let nodes = client.fetch(&FieldDecoder).await?;
//!
//! let config = FilterConfig {
//!     states: StateFilter::parse("idle"),
//!     racks: RackFilter::All,
//!     partitions: PartitionFilter::Default,
//!     numnodes: None,
//! };
//! let filtered = config.apply(&nodes);
//!
//! let csv = report::render(&nodes, &filtered, OutputField::Hostname, Format::Csv, false)?;
//! assert_eq!(csv, "cpu-h21a5-u7-svn2");
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod filter;
pub mod hostlist;
pub mod inventory;
pub mod location;
pub mod node;
pub mod report;

pub use error::{RackError, RackResult};
pub use filter::{FilterConfig, PartitionFilter, RackFilter, StateFilter};
pub use hostlist::HostlistClient;
pub use inventory::{SinfoClient, parse_inventory};
pub use location::{
    BlockDecoder, DEFAULT_NODES_PER_RACK, DecoderKind, FieldDecoder, Location, RackDecoder,
};
pub use node::Node;
pub use report::{Format, OutputField, RackGroup};
