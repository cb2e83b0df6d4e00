// argus_sim/src/simulation/mod.rs

pub mod core;
pub mod plugins;
pub mod utils;
