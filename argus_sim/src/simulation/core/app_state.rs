// argus_sim/src/simulation/core/app_state.rs

use bevy::{ecs::schedule::SystemSet, prelude::States};

/// Defines the major phases of the application's lifecycle.
#[derive(States, Debug, Clone, Eq, PartialEq, Hash, Default)]
pub enum AppState {
    /// The initial state. The scene (yard, operator, scan station) is being
    /// built from the scenario config.
    #[default]
    SceneBuilding,

    /// The scene is built. The main simulation loop is now running.
    Running,
}

/// System sets to control the order of execution during the SceneBuilding state.
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub enum SceneBuildSet {
    /// Pass 1: Spawn the static scan yard (ground, walls, obstacles, lights).
    World,

    /// Pass 2: Spawn the operator camera rig that carries the sensor head.
    Operator,

    /// Pass 3: Attach the scan station to the rig and set up scan output.
    Sensors,

    /// Pass 4: Final bookkeeping, then hand over to the Running state.
    Cleanup,
}

// =========================================================================
// == Main Simulation Sets (The "Data Flow Graph") ==
// =========================================================================

#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub enum SimulationSet {
    /// Pointer capture, look/move input, and scan/save key triggers.
    Input,

    /// The scan station: running sweeps against the physics scene and
    /// persisting point clouds.
    Sensors,

    /// Per-frame presentation: the slot point display and the HUD.
    Visualization,
}
