//! Hostname-to-rack location decoding strategies.
//!
//! Naming conventions are site-specific. The decoder is a pluggable
//! strategy so a new convention only means a new [`RackDecoder`] impl;
//! filtering and reporting never change.

use crate::error::{RackError, RackResult};

/// Rack block size assumed by the legacy block-arithmetic convention.
pub const DEFAULT_NODES_PER_RACK: u32 = 56;

/// Physical location tokens derived from a hostname.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Location {
    pub rack: String,
    pub u_loc: Option<String>,
    pub chassis_loc: Option<String>,
}

/// Strategy for deriving a rack location from a hostname.
///
/// Implementations must be pure: the same hostname always decodes to the
/// same location.
pub trait RackDecoder {
    fn decode(&self, hostname: &str) -> RackResult<Location>;
}

/// Built-in decoder selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecoderKind {
    /// Legacy block arithmetic over a trailing node id.
    Blocks,
    /// Positional four-field hostname decomposition.
    Fields,
}

impl DecoderKind {
    /// Parse a decoder name from configuration.
    pub fn parse(value: &str) -> RackResult<Self> {
        match value {
            "blocks" => Ok(Self::Blocks),
            "fields" => Ok(Self::Fields),
            other => Err(RackError::Config(format!(
                "unknown decoder '{other}', expected 'blocks' or 'fields'"
            ))),
        }
    }
}

/// Legacy block-arithmetic decoder.
///
/// Takes the numeric token after the last `-` as a 1-based node id and
/// assigns `rack = (nodeid - 1) / nodes_per_rack + 1`. This assumes node
/// numbering is globally sequential and racks are contiguous blocks of
/// exactly `nodes_per_rack` nodes; it silently mis-assigns racks if the
/// site renumbers. Known limitation of the naming convention itself.
#[derive(Debug, Clone)]
pub struct BlockDecoder {
    pub nodes_per_rack: u32,
}

impl Default for BlockDecoder {
    fn default() -> Self {
        Self {
            nodes_per_rack: DEFAULT_NODES_PER_RACK,
        }
    }
}

impl RackDecoder for BlockDecoder {
    fn decode(&self, hostname: &str) -> RackResult<Location> {
        let suffix = hostname.rsplit('-').next().unwrap_or(hostname);
        let nodeid: u32 = suffix
            .parse()
            .map_err(|_| RackError::NonNumericNodeId(hostname.to_string()))?;
        if nodeid == 0 {
            // Node ids are 1-based; 0 would wrap the block arithmetic.
            return Err(RackError::NonNumericNodeId(hostname.to_string()));
        }
        let rack = (nodeid - 1) / self.nodes_per_rack + 1;
        Ok(Location {
            rack: rack.to_string(),
            u_loc: None,
            chassis_loc: None,
        })
    }
}

/// Positional four-field decoder for `PREFIX-RACK-ULOC-CHASSIS` hostnames,
/// e.g. `cpu-h21a5-u7-svn2` decodes to rack `h21a5`, u_loc `u7`,
/// chassis_loc `svn2`.
#[derive(Debug, Clone, Default)]
pub struct FieldDecoder;

impl RackDecoder for FieldDecoder {
    fn decode(&self, hostname: &str) -> RackResult<Location> {
        let fields: Vec<&str> = hostname.split('-').collect();
        let &[_prefix, rack, u_loc, chassis_loc] = fields.as_slice() else {
            return Err(RackError::BadHostnameShape(hostname.to_string()));
        };
        Ok(Location {
            rack: rack.to_string(),
            u_loc: Some(u_loc.to_string()),
            chassis_loc: Some(chassis_loc.to_string()),
        })
    }
}
