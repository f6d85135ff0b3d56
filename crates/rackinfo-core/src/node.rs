//! Node records parsed from the scheduler inventory.

/// A single scheduler node with its derived rack location.
///
/// Constructed once per invocation from a sinfo snapshot and never mutated;
/// filters produce new sequences of references instead.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node {
    /// Scheduler-assigned hostname, unique within the inventory.
    pub hostname: String,

    /// Derived rack identifier. Block arithmetic yields a decimal rack
    /// number; positional decoding yields the rack token from the hostname.
    pub rack: String,

    /// Vertical rack-unit token. Only derived by positional decoding.
    pub u_loc: Option<String>,

    /// Chassis/slot token. Only derived by positional decoding.
    pub chassis_loc: Option<String>,

    /// Partition name verbatim from sinfo, default marker included.
    pub partition: String,

    /// Node state verbatim from sinfo, suffix characters included
    /// (`idle*` is distinct from `idle` for matching purposes).
    pub state: String,
}

impl Node {
    /// Whether this node sits on the scheduler's default partition,
    /// marked by a trailing `*` in sinfo output.
    pub fn on_default_partition(&self) -> bool {
        self.partition.ends_with('*')
    }
}
