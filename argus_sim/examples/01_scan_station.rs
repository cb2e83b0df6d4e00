// argus_sim/examples/01_scan_station.rs

//! An interactive scan-station session in the procedural scan yard.
//!
//! This example demonstrates how to:
//! 1. Load a scan scenario from a TOML file (path from the command line).
//! 2. Set up the core Bevy application and the Avian3D physics plugins.
//! 3. Add the main `ArgusSimulationPlugin` which contains the whole station.
//!
//! Controls: left click captures the pointer, Escape releases it. WASD and
//! Q/E fly the rig, Space runs a sweep, Enter saves the cloud.
//!
//! To run this example:
//! `cargo run --example 01_scan_station -- --scenario assets/scenarios/scan_yard.toml`

// --- Bevy Imports ---
use avian3d::prelude::*;
use bevy::{log::LogPlugin, prelude::*};
use clap::Parser;

// --- Project-Specific Imports ---
use argus_sim::cli::Cli;
use argus_sim::prelude::AppState;
use argus_sim::simulation::core::config::load_scenario;
use argus_sim::ArgusSimulationPlugin;

fn main() {
    // --- 1. Load the Scenario ---
    let cli = Cli::parse();
    println!("Loading scenario from: {}", cli.scenario.display());

    let config = load_scenario(&cli.scenario).unwrap_or_else(|err| {
        panic!(
            "Could not load scenario '{}': {}",
            cli.scenario.display(),
            err
        );
    });

    let mut app = App::new();

    // --- 2. Add Core Bevy Plugins & Resources ---
    app.add_plugins(DefaultPlugins.set(LogPlugin {
        level: bevy::log::Level::INFO,
        // A good filter for focusing on our crates' logs during development.
        filter: "info,wgpu_core=error,wgpu_hal=error,argus_sim=debug,argus_core=debug".to_string(),
        ..default()
    }))
    // The Avian3D physics plugins back the spatial queries the scanner casts.
    .add_plugins(PhysicsPlugins::default())
    // Both resources must be in place before the simulation plugin builds.
    .insert_resource(config)
    .insert_resource(cli);

    app.init_state::<AppState>();

    // --- 3. Add the Main Argus Simulation Plugin ---
    // This single line brings in the whole station: setup, world, operator,
    // scanner, point display, and HUD.
    app.add_plugins(ArgusSimulationPlugin);

    // --- 4. Run the App ---
    println!("Starting the scan station...");
    app.run();
}
