//! Output projections over the filtered node set, and per-rack grouping
//! for the occupancy summary.

use rustc_hash::{FxHashMap, FxHashSet};

use crate::error::{RackError, RackResult};
use crate::filter::StateFilter;
use crate::node::Node;

/// Node attribute selected for projection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputField {
    Hostname,
    Rack,
    ULoc,
    ChassisLoc,
    Partition,
    State,
}

impl OutputField {
    /// Parse an output attribute name from configuration.
    pub fn parse(value: &str) -> RackResult<Self> {
        match value {
            "hostname" => Ok(Self::Hostname),
            "rack" => Ok(Self::Rack),
            "u_loc" => Ok(Self::ULoc),
            "chassis_loc" => Ok(Self::ChassisLoc),
            "partition" => Ok(Self::Partition),
            "state" => Ok(Self::State),
            other => Err(RackError::Config(format!(
                "unknown output '{other}', expected hostname, rack, u_loc, chassis_loc, partition or state"
            ))),
        }
    }

    /// Whether this attribute is only derived by the fields decoder.
    pub fn needs_field_decoding(&self) -> bool {
        matches!(self, Self::ULoc | Self::ChassisLoc)
    }

    fn select(&self, node: &Node) -> RackResult<String> {
        let missing = |field: &str| {
            RackError::Config(format!(
                "output '{field}' is not derived by the configured decoder"
            ))
        };
        Ok(match self {
            Self::Hostname => node.hostname.clone(),
            Self::Rack => node.rack.clone(),
            Self::ULoc => node.u_loc.clone().ok_or_else(|| missing("u_loc"))?,
            Self::ChassisLoc => node
                .chassis_loc
                .clone()
                .ok_or_else(|| missing("chassis_loc"))?,
            Self::Partition => node.partition.clone(),
            Self::State => node.state.clone(),
        })
    }
}

/// Rendering format for the flat projection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    /// Comma-joined values of the filtered nodes.
    Csv,
    /// Comma-joined values of the complement (all minus filtered), suitable
    /// for `#SBATCH --exclude=` directives.
    Exclude,
    /// Newline-joined values of the filtered nodes.
    Row,
    /// Two lines: total node count, then filtered node count.
    Count,
}

impl Format {
    /// Parse a format name from configuration.
    pub fn parse(value: &str) -> RackResult<Self> {
        match value {
            "csv" => Ok(Self::Csv),
            "exclude" => Ok(Self::Exclude),
            "row" => Ok(Self::Row),
            "count" => Ok(Self::Count),
            other => Err(RackError::Config(format!(
                "unknown format '{other}', expected csv, exclude, row or count"
            ))),
        }
    }
}

/// Parse the `--unique yes|no` option.
pub fn parse_unique(value: &str) -> RackResult<bool> {
    match value {
        "yes" => Ok(true),
        "no" => Ok(false),
        other => Err(RackError::Config(format!(
            "unique must be 'yes' or 'no', got '{other}'"
        ))),
    }
}

/// Project one attribute from each node.
pub fn project(nodes: &[&Node], field: OutputField) -> RackResult<Vec<String>> {
    nodes.iter().map(|n| field.select(n)).collect()
}

/// Render the filtered set against the full inventory in the requested
/// format. `unique` deduplicates the projected values, keeping the first
/// occurrence of each.
pub fn render(
    all: &[Node],
    filtered: &[&Node],
    field: OutputField,
    format: Format,
    unique: bool,
) -> RackResult<String> {
    match format {
        Format::Csv => Ok(join(project(filtered, field)?, ",", unique)),
        Format::Row => Ok(join(project(filtered, field)?, "\n", unique)),
        Format::Exclude => {
            let kept: FxHashSet<&str> = filtered.iter().map(|n| n.hostname.as_str()).collect();
            let complement: Vec<&Node> = all
                .iter()
                .filter(|n| !kept.contains(n.hostname.as_str()))
                .collect();
            Ok(join(project(&complement, field)?, ",", unique))
        }
        Format::Count => Ok(format!("{}\n{}", all.len(), filtered.len())),
    }
}

fn join(mut values: Vec<String>, separator: &str, unique: bool) -> String {
    if unique {
        let mut seen = FxHashSet::default();
        values.retain(|v| seen.insert(v.clone()));
    }
    values.join(separator)
}

/// Nodes of one rack: all members, and those matching the state filter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RackGroup {
    pub rack: String,
    pub all: Vec<String>,
    pub matching: Vec<String>,
}

/// Group the full inventory by rack in first-seen order, recording which
/// hostnames match the given state filter. Every node lands in exactly one
/// group regardless of the filter.
pub fn group_by_rack(nodes: &[Node], states: &StateFilter) -> Vec<RackGroup> {
    let mut index: FxHashMap<&str, usize> = FxHashMap::default();
    let mut groups: Vec<RackGroup> = Vec::new();

    for node in nodes {
        let slot = match index.get(node.rack.as_str()) {
            Some(&slot) => slot,
            None => {
                groups.push(RackGroup {
                    rack: node.rack.clone(),
                    all: Vec::new(),
                    matching: Vec::new(),
                });
                index.insert(node.rack.as_str(), groups.len() - 1);
                groups.len() - 1
            }
        };
        groups[slot].all.push(node.hostname.clone());
        if states.matches(node) {
            groups[slot].matching.push(node.hostname.clone());
        }
    }

    groups
}

/// Summary wording for one rack. The count drives singular/plural, and a
/// rack with no matching nodes gets no trailing hostlist.
pub fn summary_line(group: &RackGroup, all_hostlist: &str, matching_hostlist: &str) -> String {
    match group.matching.len() {
        0 => format!("Rack {} ({}): 0 nodes", group.rack, all_hostlist),
        1 => format!(
            "Rack {} ({}): 1 node - {}",
            group.rack, all_hostlist, matching_hostlist
        ),
        n => format!(
            "Rack {} ({}): {} nodes - {}",
            group.rack, all_hostlist, n, matching_hostlist
        ),
    }
}
