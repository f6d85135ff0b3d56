//! Version command implementation.

use console::style;

/// Execute the version command.
pub fn execute() {
    let version = env!("CARGO_PKG_VERSION");

    println!(
        "{} {} - rack-level occupancy reports from the Slurm node inventory",
        style("Rackinfo").cyan().bold(),
        style(format!("v{version}")).yellow()
    );
    println!();
    println!("Components:");
    println!("  rackinfo-core  Inventory parsing, rack decoding, filtering");
    println!("  rackinfo-cli   Command-line interface");
    println!();
    println!(
        "Repository: {}",
        style("https://github.com/csd3-ops/rackinfo").underlined()
    );
    println!("License:    {}", style("Apache-2.0").dim());
}
