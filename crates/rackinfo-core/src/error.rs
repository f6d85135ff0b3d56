//! Error handling for the rack inventory tooling.

use thiserror::Error;

/// Result type for inventory operations.
pub type RackResult<T> = Result<T, RackError>;

/// Errors that can occur while querying and reporting the inventory.
///
/// All of these are fatal: the tool never retries, and nothing is printed
/// after the first failure.
#[derive(Error, Debug)]
pub enum RackError {
    /// An inventory line aggregated more than one node despite per-node
    /// query mode. Indicates a wrong sinfo invocation or version mismatch.
    #[error("inventory line reports {count} nodes, expected 1 per line (wrong sinfo mode?): {line}")]
    MultiNodeLine { count: String, line: String },

    /// An inventory line did not split into HOSTNAME NODES PARTITION STATE.
    #[error("malformed inventory line, expected HOSTNAME NODES PARTITION STATE: {0}")]
    MalformedLine(String),

    /// Block-arithmetic decoding needs a 1-based numeric suffix.
    #[error("hostname does not end in a positive numeric node id: {0}")]
    NonNumericNodeId(String),

    /// Positional decoding needs exactly four dash-separated fields.
    #[error("hostname does not match the PREFIX-RACK-ULOC-CHASSIS convention: {0}")]
    BadHostnameShape(String),

    /// External command (sinfo, scontrol) failed to spawn or exited nonzero.
    #[error("{command} command failed: {message}")]
    CommandError { command: String, message: String },

    /// Invalid configuration value.
    #[error("configuration error: {0}")]
    Config(String),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
