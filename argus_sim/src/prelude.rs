// argus_sim/src/prelude.rs

// Re-export the entire Bevy prelude for convenience.
pub use bevy::prelude::*;

// Re-export the entire argus_core prelude so you can easily access
// pure types like `ScanEngine`, `SensorPose`, `RayOracle`, etc.
pub use argus_core::prelude::*;

// Re-export common simulation-specific types for easy access in other plugins.
pub use crate::simulation::core::app_state::{AppState, SceneBuildSet, SimulationSet};
pub use crate::simulation::core::config::ScenarioConfig;
pub use crate::simulation::core::events::{SaveRequested, ScanRequested};
pub use crate::simulation::core::prng::SimulationRng;
pub use crate::simulation::plugins::operator::{InputCapture, OperatorRig};
