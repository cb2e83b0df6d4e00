// argus_sim/src/simulation/plugins/debugging/mod.rs

pub mod hud;
