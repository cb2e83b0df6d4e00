// argus_sim/src/simulation/core/config.rs

use argus_core::color::ColorRamp;
use bevy::prelude::Resource;
use figment::{
    providers::{Format, Toml},
    Figment,
};
use nalgebra::Vector3;
use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::simulation::utils::serde_helpers;

// =========================================================================
// == Top-Level Configuration Resource ==
// =========================================================================

/// # ScenarioConfig
/// The primary Bevy resource holding all configuration for a simulation run.
/// This struct is the root of the data parsed from a scenario TOML file.
#[derive(Resource, Debug, Deserialize, Default)]
#[serde(deny_unknown_fields)] // Fail if the TOML has fields not in our struct
pub struct ScenarioConfig {
    #[serde(default)] // Use default if the [simulation] section is missing
    pub simulation: Simulation,

    #[serde(default)]
    pub world: WorldSettings,

    #[serde(default)]
    pub operator: OperatorSettings,

    #[serde(default)]
    pub sensor: LidarSettings,

    #[serde(default)]
    pub output: OutputSettings,
}

/// Loads a scenario file from disk into a [`ScenarioConfig`].
pub fn load_scenario(path: &Path) -> Result<ScenarioConfig, figment::Error> {
    Figment::new().merge(Toml::file(path)).extract()
}

// =========================================================================
// == Configuration Sub-Structs ==
// These map directly to the sections in your scenario TOML file.
// =========================================================================

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Simulation {
    /// Optional seed for the pseudo-random number generator for determinism.
    /// The scan yard layout is sampled from this generator, so a fixed seed
    /// reproduces the same yard.
    pub seed: Option<u64>,
}

impl Default for Simulation {
    fn default() -> Self {
        Self { seed: None }
    }
}

/// Parameters of the procedurally generated scan yard.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct WorldSettings {
    /// Half of the yard's side length in meters; walls sit at this distance.
    pub half_extent: f32,
    pub wall_height: f32,
    pub pillar_count: u32,
    pub crate_count: u32,
    /// Overhead beams give the upward-sweeping fan something to hit.
    pub beam_count: u32,
}

impl Default for WorldSettings {
    fn default() -> Self {
        Self {
            half_extent: 20.0,
            wall_height: 3.0,
            pillar_count: 6,
            crate_count: 10,
            beam_count: 3,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct OperatorSettings {
    /// Initial position of the sensor head in world space.
    #[serde(with = "serde_helpers::vec3_f64_from_f32_array", default)]
    pub position: Vector3<f64>,

    /// Initial facing, degrees of azimuth (0 looks along world +Z).
    pub yaw_deg: f32,
    /// Initial view tilt, degrees up from the horizon (clamped to [0, 90]).
    pub pitch_deg: f32,

    pub move_speed: f32,
    pub boost_multiplier: f32,
    pub mouse_sensitivity: f32,
}

impl Default for OperatorSettings {
    fn default() -> Self {
        Self {
            position: Vector3::new(0.0, 1.8, 0.0),
            yaw_deg: 0.0,
            pitch_deg: 0.0,
            move_speed: 6.0,
            boost_multiplier: 3.0,
            mouse_sensitivity: 0.002,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LidarSettings {
    /// Number of vertical rings in the scan pattern.
    pub vertical_resolution: u32,
    /// Number of azimuth steps per ring.
    pub horizontal_resolution: u32,
    /// Vertical field of view in degrees, swept up from the horizon.
    pub vertical_fov_deg: f32,
    /// Maximum ray reach in meters.
    pub max_range: f64,
    /// Continuous re-scan rate in Hz. Zero disables the timer; scans then
    /// run only when requested by key press.
    pub rate: f32,
    /// Standard deviation of Gaussian range noise in meters. Zero keeps the
    /// oracle exact (and scans deterministic).
    pub range_noise_stddev: f64,
    /// Radius of the displayed slot points in meters.
    pub point_radius: f32,
    /// Distance-to-color mapping for displayed points.
    #[serde(default)]
    pub color: ColorRamp,
}

impl Default for LidarSettings {
    fn default() -> Self {
        Self {
            vertical_resolution: 24,
            horizontal_resolution: 96,
            vertical_fov_deg: 90.0,
            max_range: 40.0,
            rate: 0.0,
            range_noise_stddev: 0.0,
            point_radius: 0.05,
            color: ColorRamp::default(),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct OutputSettings {
    /// Directory scan files are written into (created if missing).
    pub directory: PathBuf,
    /// Filename prefix; files are named `<prefix>_0000.txt`, `_0001`, ...
    pub prefix: String,
}

impl Default for OutputSettings {
    fn default() -> Self {
        Self {
            directory: PathBuf::from("scans"),
            prefix: "scan".to_string(),
        }
    }
}
