// argus_sim/src/simulation/plugins/mod.rs

pub mod debugging;
pub mod operator;
pub mod rendering;
pub mod sensors;
pub mod world;
