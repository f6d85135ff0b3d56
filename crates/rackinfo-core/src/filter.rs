//! Filter pipeline over the node inventory.
//!
//! Stages run in a fixed order: state, rack, partition, numnodes. The
//! numnodes stage groups by rack AFTER the other stages, so a threshold of
//! N reads as "racks with exactly N surviving nodes", never "racks with N
//! nodes in the raw inventory".

use rustc_hash::FxHashMap;
use tracing::debug;

use crate::error::{RackError, RackResult};
use crate::node::Node;

/// Node-state filter; the `any` sentinel disables it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StateFilter {
    Any,
    States(Vec<String>),
}

impl StateFilter {
    /// Parse a comma-separated state list, or the `any` sentinel.
    ///
    /// Matching is exact string equality, so Slurm suffix markers must be
    /// included to match marked states (`idle*` for a draining node).
    pub fn parse(value: &str) -> Self {
        if value == "any" {
            Self::Any
        } else {
            Self::States(value.split(',').map(str::to_string).collect())
        }
    }

    pub fn matches(&self, node: &Node) -> bool {
        match self {
            Self::Any => true,
            Self::States(states) => states.iter().any(|s| s == &node.state),
        }
    }
}

/// Rack filter; the `all` sentinel disables it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RackFilter {
    All,
    Racks(Vec<String>),
}

impl RackFilter {
    /// Parse a comma-separated rack-id list, or the `all` sentinel.
    pub fn parse(value: &str) -> Self {
        if value == "all" {
            Self::All
        } else {
            Self::Racks(value.split(',').map(str::to_string).collect())
        }
    }

    pub fn matches(&self, node: &Node) -> bool {
        match self {
            Self::All => true,
            Self::Racks(racks) => racks.iter().any(|r| r == &node.rack),
        }
    }
}

/// Partition filter; the `default` sentinel keeps only partitions carrying
/// the default marker (trailing `*`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PartitionFilter {
    Default,
    Partitions(Vec<String>),
}

impl PartitionFilter {
    /// Parse a comma-separated partition list, or the `default` sentinel.
    ///
    /// Explicit names match exactly; include the `*` marker to match the
    /// default-marked row of a partition.
    pub fn parse(value: &str) -> Self {
        if value == "default" {
            Self::Default
        } else {
            Self::Partitions(value.split(',').map(str::to_string).collect())
        }
    }

    pub fn matches(&self, node: &Node) -> bool {
        match self {
            Self::Default => node.on_default_partition(),
            Self::Partitions(partitions) => partitions.iter().any(|p| p == &node.partition),
        }
    }
}

/// Parse the per-rack count threshold; the `-1` sentinel disables it.
pub fn parse_numnodes(value: &str) -> RackResult<Option<usize>> {
    let n: i64 = value.trim().parse().map_err(|_| {
        RackError::Config(format!("numnodes must be an integer, got '{value}'"))
    })?;
    match n {
        -1 => Ok(None),
        n if n < 0 => Err(RackError::Config(format!(
            "numnodes must be -1 or non-negative, got {n}"
        ))),
        n => Ok(Some(n as usize)),
    }
}

/// Immutable filter configuration, built and validated once at startup and
/// passed down explicitly.
#[derive(Debug, Clone)]
pub struct FilterConfig {
    pub states: StateFilter,
    pub racks: RackFilter,
    pub partitions: PartitionFilter,
    /// Keep only nodes on racks with exactly this many survivors of the
    /// preceding stages. `None` disables the stage.
    pub numnodes: Option<usize>,
}

impl FilterConfig {
    /// Run the pipeline: state → rack → partition → numnodes.
    ///
    /// Pure over the input slice; the inventory is never mutated.
    pub fn apply<'a>(&self, nodes: &'a [Node]) -> Vec<&'a Node> {
        let mut kept: Vec<&Node> = nodes.iter().filter(|n| self.states.matches(n)).collect();
        kept.retain(|n| self.racks.matches(n));
        kept.retain(|n| self.partitions.matches(n));

        if let Some(target) = self.numnodes {
            let mut counts: FxHashMap<&str, usize> = FxHashMap::default();
            for node in &kept {
                *counts.entry(node.rack.as_str()).or_default() += 1;
            }
            kept.retain(|n| counts[n.rack.as_str()] == target);
        }

        debug!(total = nodes.len(), kept = kept.len(), "filter pipeline applied");
        kept
    }
}
