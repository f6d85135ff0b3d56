//! Wrapper around scontrol's hostlist range compaction.

use std::process::Stdio;

use tokio::process::Command;
use tracing::debug;

use crate::error::{RackError, RackResult};

/// Client for `scontrol show hostlist`.
///
/// Treated as a pure function over an ordered hostname list; the compaction
/// algorithm itself belongs to Slurm.
pub struct HostlistClient {
    /// Comma-join instead of shelling out (for testing).
    mock_mode: bool,
}

impl HostlistClient {
    pub fn new() -> Self {
        Self { mock_mode: false }
    }

    /// Create a client that comma-joins instead of shelling out (for
    /// testing).
    pub fn mock() -> Self {
        Self { mock_mode: true }
    }

    /// Compact a hostname list into a range expression such as
    /// `cpu-e-[1-4,7]`.
    pub async fn compact(&self, hostnames: &[String]) -> RackResult<String> {
        let joined = hostnames.join(",");
        if self.mock_mode {
            return Ok(joined);
        }

        debug!(count = hostnames.len(), "compacting hostlist");

        let output = Command::new("scontrol")
            .args(["show", "hostlist", &joined])
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .output()
            .await
            .map_err(|e| RackError::CommandError {
                command: "scontrol".to_string(),
                message: e.to_string(),
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(RackError::CommandError {
                command: "scontrol".to_string(),
                message: stderr.trim().to_string(),
            });
        }

        Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
    }
}

impl Default for HostlistClient {
    fn default() -> Self {
        Self::new()
    }
}
