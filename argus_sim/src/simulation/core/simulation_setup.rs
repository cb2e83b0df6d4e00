// argus_sim/src/simulation/core/simulation_setup.rs

use crate::prelude::*;
use rand::{rngs::OsRng, SeedableRng};
use rand_chacha::ChaCha8Rng;

// =========================================================================
// == Simulation Setup Plugin ==
// =========================================================================

/// Owns the pieces every other plugin relies on: the seeded RNG, the shared
/// events, and the ordering of the scene-build and per-frame system sets.
pub struct SimulationSetupPlugin;

impl Plugin for SimulationSetupPlugin {
    fn build(&self, app: &mut App) {
        // 1. The scenario must already be loaded. Fail loudly if it is not.
        let config = app
            .world()
            .get_resource::<ScenarioConfig>()
            .expect("ScenarioConfig not found! Insert it before adding ArgusSimulationPlugin.");

        // 2. Seed the RNG from the scenario, or from the OS for a fresh run.
        let rng = match config.simulation.seed {
            Some(seed) => {
                info!("[SETUP] Seeding simulation RNG deterministically: {}", seed);
                ChaCha8Rng::seed_from_u64(seed)
            }
            None => {
                info!("[SETUP] Seeding simulation RNG from the OS.");
                ChaCha8Rng::from_rng(&mut OsRng).expect("OS RNG failed")
            }
        };
        app.insert_resource(SimulationRng(rng));

        // 3. Events shared between the operator, sensor, and output systems.
        app.add_event::<ScanRequested>();
        app.add_event::<SaveRequested>();

        // 4. Scene building runs once, in a fixed order, when the app enters
        //    the SceneBuilding state.
        app.configure_sets(
            OnEnter(AppState::SceneBuilding),
            (
                SceneBuildSet::World,
                SceneBuildSet::Operator,
                SceneBuildSet::Sensors,
                SceneBuildSet::Cleanup,
            )
                .chain(),
        );

        // 5. The per-frame pipeline: input first, then sensing, then drawing.
        app.configure_sets(
            Update,
            (
                SimulationSet::Input,
                SimulationSet::Sensors,
                SimulationSet::Visualization,
            )
                .chain()
                .run_if(in_state(AppState::Running)),
        );

        // 6. Once every build pass has run, hand control to the main loop.
        app.add_systems(
            OnEnter(AppState::SceneBuilding),
            transition_to_running.in_set(SceneBuildSet::Cleanup),
        );
    }
}

fn transition_to_running(mut next_state: ResMut<NextState<AppState>>) {
    info!("[SETUP] Scene build complete. Entering Running state.");
    next_state.set(AppState::Running);
}
