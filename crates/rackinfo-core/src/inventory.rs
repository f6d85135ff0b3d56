//! Inventory reader: invokes sinfo and parses its per-node output.

use std::process::Stdio;

use tokio::process::Command;
use tracing::debug;

use crate::error::{RackError, RackResult};
use crate::location::RackDecoder;
use crate::node::Node;

/// Parse `sinfo --Node --noheader` output into node records.
///
/// Each line carries `HOSTNAME NODES PARTITION STATE`, whitespace separated.
/// Parsing stops at the first empty line. A line aggregating more than one
/// node means sinfo ran without `--Node` (or against an incompatible
/// version) and aborts the run: filtering an aggregated inventory would
/// silently produce wrong counts.
pub fn parse_inventory(output: &str, decoder: &dyn RackDecoder) -> RackResult<Vec<Node>> {
    let mut nodes = Vec::new();

    for line in output.lines() {
        if line.trim().is_empty() {
            break;
        }

        let fields: Vec<&str> = line.split_whitespace().collect();
        let &[hostname, count, partition, state] = fields.as_slice() else {
            return Err(RackError::MalformedLine(line.to_string()));
        };

        if count != "1" {
            return Err(RackError::MultiNodeLine {
                count: count.to_string(),
                line: line.to_string(),
            });
        }

        let location = decoder.decode(hostname)?;
        nodes.push(Node {
            hostname: hostname.to_string(),
            rack: location.rack,
            u_loc: location.u_loc,
            chassis_loc: location.chassis_loc,
            partition: partition.to_string(),
            state: state.to_string(),
        });
    }

    debug!("parsed {} nodes from inventory", nodes.len());
    Ok(nodes)
}

/// Client for the scheduler's node-inventory query.
pub struct SinfoClient {
    /// Restrict the query to one partition when set.
    partition: Option<String>,
    /// Canned output used instead of shelling out (for testing).
    mock_output: Option<String>,
}

impl SinfoClient {
    /// Query the whole cluster, or a single partition when given.
    pub fn new(partition: Option<&str>) -> Self {
        Self {
            partition: partition.map(str::to_string),
            mock_output: None,
        }
    }

    /// Create a client that returns canned output (for testing).
    pub fn mock(output: impl Into<String>) -> Self {
        Self {
            partition: None,
            mock_output: Some(output.into()),
        }
    }

    /// Fetch the node inventory, one record per node, in sinfo order.
    /// No deduplication is performed.
    pub async fn fetch(&self, decoder: &dyn RackDecoder) -> RackResult<Vec<Node>> {
        let output = match &self.mock_output {
            Some(canned) => canned.clone(),
            None => self.run_sinfo().await?,
        };
        parse_inventory(&output, decoder)
    }

    /// Run the sinfo command in per-node mode.
    async fn run_sinfo(&self) -> RackResult<String> {
        let mut cmd = Command::new("sinfo");
        cmd.args(["--Node", "--noheader"]);
        if let Some(partition) = &self.partition {
            cmd.arg(format!("--partition={partition}"));
        }

        debug!(partition = ?self.partition, "querying node inventory");

        let output = cmd
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .output()
            .await
            .map_err(|e| RackError::CommandError {
                command: "sinfo".to_string(),
                message: e.to_string(),
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(RackError::CommandError {
                command: "sinfo".to_string(),
                message: stderr.trim().to_string(),
            });
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::location::{BlockDecoder, FieldDecoder};

    #[test]
    fn test_parse_inventory_order_and_fields() {
        let output = "\
cpu-q-1 1 cclake* idle
cpu-q-2 1 cclake alloc
cpu-q-57 1 icelake idle*
";
        let nodes = parse_inventory(output, &BlockDecoder::default()).unwrap();
        assert_eq!(nodes.len(), 3);
        assert_eq!(nodes[0].hostname, "cpu-q-1");
        assert_eq!(nodes[0].rack, "1");
        assert_eq!(nodes[0].partition, "cclake*");
        assert_eq!(nodes[0].state, "idle");
        assert_eq!(nodes[1].state, "alloc");
        assert_eq!(nodes[2].rack, "2");
        assert_eq!(nodes[2].state, "idle*");
    }

    #[test]
    fn test_parse_inventory_stops_at_blank_line() {
        let output = "cpu-q-1 1 cclake idle\n\ncpu-q-2 1 cclake idle\n";
        let nodes = parse_inventory(output, &BlockDecoder::default()).unwrap();
        assert_eq!(nodes.len(), 1);
    }

    #[test]
    fn test_parse_inventory_multi_node_line_is_fatal() {
        let output = "node01 3 cclake idle\n";
        let err = parse_inventory(output, &BlockDecoder::default()).unwrap_err();
        match err {
            RackError::MultiNodeLine { count, line } => {
                assert_eq!(count, "3");
                assert_eq!(line, "node01 3 cclake idle");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_parse_inventory_malformed_line_is_fatal() {
        let output = "cpu-q-1 1 cclake\n";
        assert!(matches!(
            parse_inventory(output, &BlockDecoder::default()),
            Err(RackError::MalformedLine(_))
        ));

        let output = "cpu-q-1 1 cclake idle extra\n";
        assert!(matches!(
            parse_inventory(output, &BlockDecoder::default()),
            Err(RackError::MalformedLine(_))
        ));
    }

    #[test]
    fn test_parse_inventory_empty_output() {
        let nodes = parse_inventory("", &FieldDecoder).unwrap();
        assert!(nodes.is_empty());
    }

    #[tokio::test]
    async fn test_mock_client_feeds_parser() {
        let client = SinfoClient::mock("cpu-h21a5-u7-svn2 1 cclake* idle\n");
        let nodes = client.fetch(&FieldDecoder).await.unwrap();
        assert_eq!(nodes.len(), 1);
        assert_eq!(nodes[0].rack, "h21a5");
        assert_eq!(nodes[0].u_loc.as_deref(), Some("u7"));
        assert_eq!(nodes[0].chassis_loc.as_deref(), Some("svn2"));
    }

    #[tokio::test]
    async fn test_mock_client_propagates_decode_errors() {
        let client = SinfoClient::mock("weirdhost 1 cclake idle\n");
        assert!(client.fetch(&FieldDecoder).await.is_err());
    }
}
