// argus_sim/src/lib.rs

use bevy::prelude::*;

// Import the plugins defined within the simulation crate.
use crate::simulation::core::simulation_setup::SimulationSetupPlugin;
use crate::simulation::plugins::debugging::hud::HudPlugin;
use crate::simulation::plugins::operator::OperatorPlugin;
use crate::simulation::plugins::rendering::PointDisplayPlugin;
use crate::simulation::plugins::sensors::lidar::ScanStationPlugin;
use crate::simulation::plugins::world::ScanYardPlugin;

// This prelude is for convenience for other files WITHIN the argus_sim crate.
pub mod prelude;

// This module contains all the simulation-specific logic.
pub mod cli;
pub mod simulation;

/// The main plugin that brings together all the simulation parts.
/// Your `main.rs` will just add this one plugin to the Bevy App.
pub struct ArgusSimulationPlugin;

impl Plugin for ArgusSimulationPlugin {
    fn build(&self, app: &mut App) {
        app.add_plugins((
            // Core setup (PRNG, events, system set ordering, state flow).
            SimulationSetupPlugin,
            // Spawns the scan yard geometry, lighting, and colliders.
            ScanYardPlugin,
            // The free-fly operator rig that carries the sensor head.
            OperatorPlugin,
            // The scan station: triggers, the avian-backed oracle, saving.
            ScanStationPlugin,
            // The live per-slot point display.
            PointDisplayPlugin,
            // On-screen readout of pose, capture state, and scan results.
            HudPlugin,
        ));
    }
}
