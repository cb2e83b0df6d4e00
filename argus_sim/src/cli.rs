// argus_sim/src/cli.rs

use bevy::prelude::Resource;
use clap::Parser;
use std::path::PathBuf;

/// Argus: a LiDAR scan-station simulator.
///
/// This struct defines the command-line arguments that can be passed to any
/// binary application that uses the Argus simulation library.
#[derive(Parser, Debug, Resource, Clone)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// The path to the scenario TOML file to run.
    #[arg(short, long, default_value = "assets/scenarios/scan_yard.toml")]
    pub scenario: PathBuf,

    /// Overrides the scan output directory from the scenario file.
    #[arg(long)]
    pub output_dir: Option<PathBuf>,
}
