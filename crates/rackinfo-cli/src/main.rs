//! Rackinfo Command-Line Interface
//!
//! Queries the Slurm node inventory, classifies nodes by physical rack,
//! and reports rack-level occupancy and node-state information.

#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

use clap::{Parser, Subcommand};
use console::style;
use tracing_subscriber::EnvFilter;

mod commands;

use commands::{nodes, racks, version};

/// Rackinfo - rack-level occupancy reports from the Slurm node inventory
#[derive(Parser)]
#[command(name = "rackinfo")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List filtered nodes as a csv/exclude/row/count projection
    Nodes {
        /// Comma-separated node states to match (exact, suffixes like `*`
        /// included), or `any`
        #[arg(long, default_value = "idle")]
        states: String,

        /// Comma-separated rack ids to keep, or `all`
        #[arg(long, default_value = "all")]
        racks: String,

        /// Comma-separated partition names to keep, or `default` for the
        /// default-marked partition
        #[arg(long, default_value = "default")]
        partitions: String,

        /// Keep only nodes on racks with exactly this many nodes left after
        /// the other filters; -1 disables
        #[arg(long, default_value = "-1", allow_hyphen_values = true)]
        numnodes: String,

        /// Rendering format (csv, exclude, row, count)
        #[arg(long, default_value = "csv")]
        format: String,

        /// Node attribute to project (hostname, rack, u_loc, chassis_loc,
        /// partition, state)
        #[arg(long, default_value = "hostname")]
        output: String,

        /// Deduplicate projected values (yes, no)
        #[arg(long, default_value = "no")]
        unique: String,

        /// Hostname decoding strategy (fields, blocks)
        #[arg(long, default_value = "fields")]
        decoder: String,

        /// Rack block size for the blocks decoder
        #[arg(long, default_value = "56")]
        nodes_per_rack: u32,
    },

    /// Per-rack occupancy summary with compact hostlists
    Racks {
        /// Comma-separated node states to count as usable
        #[arg(long, default_value = "idle,available,alloc")]
        states: String,

        /// Restrict the inventory query to one partition
        #[arg(long)]
        partition: Option<String>,

        /// Hostname decoding strategy (blocks, fields)
        #[arg(long, default_value = "blocks")]
        decoder: String,

        /// Rack block size for the blocks decoder
        #[arg(long, default_value = "56")]
        nodes_per_rack: u32,
    },

    /// Show version information
    Version,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Setup logging
    let filter = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .with_target(false)
        .init();

    // Execute command
    let result = match cli.command {
        Commands::Nodes {
            states,
            racks,
            partitions,
            numnodes,
            format,
            output,
            unique,
            decoder,
            nodes_per_rack,
        } => {
            nodes::execute(
                &states,
                &racks,
                &partitions,
                &numnodes,
                &format,
                &output,
                &unique,
                &decoder,
                nodes_per_rack,
            )
            .await
        }

        Commands::Racks {
            states,
            partition,
            decoder,
            nodes_per_rack,
        } => racks::execute(&states, partition.as_deref(), &decoder, nodes_per_rack).await,

        Commands::Version => {
            version::execute();
            Ok(())
        }
    };

    // Handle errors
    if let Err(e) = result {
        eprintln!("{} {}", style("Error:").red().bold(), e);
        std::process::exit(1);
    }

    Ok(())
}
