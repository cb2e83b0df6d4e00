// argus_sim/src/simulation/core/prng.rs

use bevy::prelude::Resource;
use rand_chacha::ChaCha8Rng;

/// A newtype wrapper around `ChaCha8Rng` to make it a Bevy Resource.
/// World layout and sensor noise both draw from this one stream, so a
/// scenario with a fixed seed replays identically.
#[derive(Resource)]
pub struct SimulationRng(pub ChaCha8Rng);
