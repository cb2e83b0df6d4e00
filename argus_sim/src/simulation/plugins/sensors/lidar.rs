// argus_sim/src/simulation/plugins/sensors/lidar.rs
use avian3d::prelude::{SpatialQuery, SpatialQueryFilter};
use bevy::prelude::*;
use nalgebra::Point3;
use rand_chacha::ChaCha8Rng;
use rand_distr::{Distribution, Normal};
use std::path::{Path, PathBuf};
use std::time::Duration;
use walkdir::WalkDir;

use crate::cli::Cli;
use crate::prelude::*;
use crate::simulation::core::transforms::{
    bevy_vec3_to_point, point_to_bevy_vec3, vector_to_bevy_vec3,
};
use crate::simulation::plugins::rendering::PointSlotStore;

// =========================================================================
// == Components & Resources ==
// =========================================================================

/// The scan head riding on the operator camera.
#[derive(Component)]
pub struct LidarRig {
    pub engine: ScanEngine,
    /// Repeating trigger for scenarios with a nonzero scan rate.
    pub cadence: Option<Timer>,
    /// Gaussian range noise, or `None` for ideal returns.
    pub noise: Option<Normal<f64>>,
    /// Pose captured by the most recent sweep, written into save headers.
    pub last_pose: Option<SensorPose>,
}

/// Where numbered scan files land and which index comes next.
#[derive(Resource, Debug)]
pub struct ScanOutput {
    pub directory: PathBuf,
    pub prefix: String,
    pub next_index: u32,
}

impl ScanOutput {
    pub fn next_path(&self) -> PathBuf {
        self.directory
            .join(format!("{}_{:04}.txt", self.prefix, self.next_index))
    }
}

/// What the HUD shows about the latest sweep and save.
#[derive(Resource, Debug, Default)]
pub struct ScanTelemetry {
    pub last_summary: Option<ScanSummary>,
    pub last_save: Option<String>,
}

pub struct ScanStationPlugin;

impl Plugin for ScanStationPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<ScanTelemetry>();
        app.add_systems(
            OnEnter(AppState::SceneBuilding),
            (init_scan_output, spawn_scan_station).in_set(SceneBuildSet::Sensors),
        );
        app.add_systems(Update, scan_triggers.in_set(SimulationSet::Input));
        app.add_systems(
            Update,
            (run_requested_scans, save_requested_clouds)
                .chain()
                .in_set(SimulationSet::Sensors),
        );
    }
}

// =========================================================================
// == Scene Building Systems ==
// =========================================================================

/// Resolves the output directory and picks up the scan numbering where the
/// last session left off.
fn init_scan_output(mut commands: Commands, cli: Option<Res<Cli>>, config: Res<ScenarioConfig>) {
    let override_dir = cli.and_then(|cli| cli.output_dir.clone());
    let directory = override_dir.unwrap_or_else(|| config.output.directory.clone());

    if let Err(error) = std::fs::create_dir_all(&directory) {
        warn!(
            "[SAVE] Could not create output directory '{}': {}",
            directory.display(),
            error
        );
    }

    let next_index = next_scan_index(&directory, &config.output.prefix);
    info!(
        "[SAVE] Scan output -> '{}', next index {:04}",
        directory.display(),
        next_index
    );

    commands.insert_resource(ScanOutput {
        directory,
        prefix: config.output.prefix.clone(),
        next_index,
    });
}

/// Scans `directory` for files named `<prefix>_NNNN.txt` and returns one past
/// the highest index found, so a fresh session never overwrites old captures.
pub fn next_scan_index(directory: &Path, prefix: &str) -> u32 {
    let mut next_index = 0;
    for entry in WalkDir::new(directory)
        .min_depth(1)
        .max_depth(1)
        .into_iter()
        .filter_map(Result::ok)
    {
        let path = entry.path();
        if path.extension().and_then(|ext| ext.to_str()) != Some("txt") {
            continue;
        }
        let Some(stem) = path.file_stem().and_then(|stem| stem.to_str()) else {
            continue;
        };
        let Some(digits) = stem
            .strip_prefix(prefix)
            .and_then(|rest| rest.strip_prefix('_'))
        else {
            continue;
        };
        if let Ok(index) = digits.parse::<u32>() {
            next_index = next_index.max(index.saturating_add(1));
        }
    }
    next_index
}

/// Mounts the scan engine on the operator camera.
fn spawn_scan_station(
    mut commands: Commands,
    config: Res<ScenarioConfig>,
    mut slot_store: ResMut<PointSlotStore>,
    camera_query: Query<Entity, With<OperatorRig>>,
) {
    let Ok(camera_entity) = camera_query.single() else {
        warn!("[SPAWN] No operator rig found; the scan station has nowhere to mount.");
        return;
    };

    let sensor = &config.sensor;
    let pattern = RayPattern::new(
        sensor.vertical_resolution,
        sensor.horizontal_resolution,
        (sensor.vertical_fov_deg as f64).to_radians(),
    );
    slot_store.reset(pattern.len());

    let cadence = if sensor.rate > 0.0 {
        Some(Timer::new(
            Duration::from_secs_f32(1.0 / sensor.rate),
            TimerMode::Repeating,
        ))
    } else {
        None
    };

    let noise = if sensor.range_noise_stddev > 0.0 {
        match Normal::new(0.0, sensor.range_noise_stddev) {
            Ok(normal) => Some(normal),
            Err(error) => {
                warn!("[SPAWN] Ignoring invalid range noise: {}", error);
                None
            }
        }
    } else {
        None
    };

    info!(
        "[SPAWN] Scan station: {}x{} rays, fov {:.1} deg, max range {:.1} m",
        sensor.vertical_resolution,
        sensor.horizontal_resolution,
        sensor.vertical_fov_deg,
        sensor.max_range
    );

    commands.entity(camera_entity).insert(LidarRig {
        engine: ScanEngine::new(pattern, sensor.max_range, sensor.color),
        cadence,
        noise,
        last_pose: None,
    });
}

// =========================================================================
// == Runtime Systems ==
// =========================================================================

/// Space sweeps, Enter saves, and a nonzero scan rate sweeps on its own.
fn scan_triggers(
    keyboard: Res<ButtonInput<KeyCode>>,
    time: Res<Time>,
    mut rig_query: Query<&mut LidarRig>,
    mut scan_writer: EventWriter<ScanRequested>,
    mut save_writer: EventWriter<SaveRequested>,
) {
    if keyboard.just_pressed(KeyCode::Space) {
        scan_writer.write(ScanRequested);
    }
    if keyboard.just_pressed(KeyCode::Enter) {
        save_writer.write(SaveRequested { path: None });
    }

    let Ok(mut rig) = rig_query.single_mut() else {
        return;
    };
    if let Some(cadence) = rig.cadence.as_mut() {
        if cadence.tick(time.delta()).just_finished() {
            scan_writer.write(ScanRequested);
        }
    }
}

/// Casts rays against the physics scene, one spatial query per ray.
struct SceneRayOracle<'a, 'w, 's> {
    spatial: &'a SpatialQuery<'w, 's>,
    names: &'a Query<'w, 's, &'static Name>,
    filter: SpatialQueryFilter,
    noise: Option<Normal<f64>>,
    rng: &'a mut ChaCha8Rng,
}

impl RayOracle for SceneRayOracle<'_, '_, '_> {
    fn query(
        &mut self,
        origin: &Point3<f64>,
        target: &Point3<f64>,
    ) -> Result<Option<RayHit>, OracleError> {
        let offset = target - origin;
        let distance = offset.norm();
        let direction = Dir3::new(vector_to_bevy_vec3(&offset))
            .map_err(|_| OracleError::new("degenerate ray direction"))?;

        let Some(hit) = self.spatial.cast_ray(
            point_to_bevy_vec3(origin),
            direction,
            distance as f32,
            true,
            &self.filter,
        ) else {
            return Ok(None);
        };

        let mut measured = hit.distance as f64;
        if let Some(noise) = self.noise {
            measured = (measured + noise.sample(&mut *self.rng)).clamp(0.0, distance);
        }
        let position = origin + (offset / distance) * measured;

        let label = self
            .names
            .get(hit.entity)
            .ok()
            .and_then(|name| sanitize_label(name.as_str()));

        Ok(Some(RayHit::new(position, label)))
    }
}

/// Scene names become point labels. The save format is whitespace-delimited,
/// so inner spaces collapse to underscores; empty names drop to `None` and
/// take the engine's unknown sentinel downstream.
fn sanitize_label(name: &str) -> Option<String> {
    let joined = name.split_whitespace().collect::<Vec<_>>().join("_");
    if joined.is_empty() {
        None
    } else {
        Some(joined)
    }
}

/// Runs one sweep for any frame that requested at least one.
fn run_requested_scans(
    mut scan_events: EventReader<ScanRequested>,
    spatial_query: SpatialQuery,
    names: Query<&Name>,
    mut rig_query: Query<(&mut LidarRig, &OperatorRig, &Transform)>,
    mut slot_store: ResMut<PointSlotStore>,
    mut rng: ResMut<SimulationRng>,
    mut telemetry: ResMut<ScanTelemetry>,
) {
    if scan_events.is_empty() {
        return;
    }
    // Several requests in one frame still mean one sweep.
    scan_events.clear();

    let Ok((mut rig, operator, transform)) = rig_query.single_mut() else {
        return;
    };

    let pose = SensorPose::new(
        bevy_vec3_to_point(transform.translation),
        operator.yaw as f64,
        operator.pitch as f64,
    );

    let mut oracle = SceneRayOracle {
        spatial: &spatial_query,
        names: &names,
        filter: SpatialQueryFilter::default(),
        noise: rig.noise,
        rng: &mut rng.0,
    };

    let summary = rig.engine.run_scan(&pose, &mut oracle, &mut *slot_store);
    rig.last_pose = Some(pose);
    telemetry.last_summary = Some(summary);

    info!(
        "[SCAN] {} rays: {} hits, {} misses ({} faulted)",
        summary.slots, summary.hits, summary.misses, summary.faults
    );
}

/// Writes the latest cloud wherever each save request points.
fn save_requested_clouds(
    mut save_events: EventReader<SaveRequested>,
    mut output: ResMut<ScanOutput>,
    mut telemetry: ResMut<ScanTelemetry>,
    rig_query: Query<&LidarRig>,
) {
    let Ok(rig) = rig_query.single() else {
        save_events.clear();
        return;
    };

    for request in save_events.read() {
        let auto_numbered = request.path.is_none();
        let path = request.path.clone().unwrap_or_else(|| output.next_path());
        let pose = rig.last_pose.unwrap_or_default();

        match save_point_cloud(&path, rig.engine.cloud(), &pose) {
            Ok(SaveOutcome::Written { points }) => {
                info!("[SAVE] Wrote {} points to '{}'", points, path.display());
                telemetry.last_save = Some(format!("{} pts -> {}", points, path.display()));
                if auto_numbered {
                    output.next_index += 1;
                }
            }
            Ok(SaveOutcome::NothingToSave) => {
                info!("[SAVE] Nothing to save yet; run a scan first.");
            }
            Err(error) => {
                // A failed save never takes the session down.
                warn!("[SAVE] {}", error);
            }
        }
    }
}

// --- Unit Test Module ---
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_labels_collapse_to_single_tokens() {
        assert_eq!(sanitize_label("crate_03"), Some("crate_03".to_string()));
        assert_eq!(
            sanitize_label("  north wall  "),
            Some("north_wall".to_string())
        );
        assert_eq!(sanitize_label("   "), None);
        assert_eq!(sanitize_label(""), None);
    }

    #[test]
    fn test_scan_numbering_resumes_after_existing_files() {
        let dir = std::env::temp_dir().join(format!("argus_scan_index_{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(dir.join("scan_0000.txt"), "x").unwrap();
        std::fs::write(dir.join("scan_0007.txt"), "x").unwrap();
        std::fs::write(dir.join("scan_abcd.txt"), "x").unwrap();
        std::fs::write(dir.join("other_0042.txt"), "x").unwrap();
        std::fs::write(dir.join("scan_0003.log"), "x").unwrap();

        assert_eq!(next_scan_index(&dir, "scan"), 8);
        assert_eq!(next_scan_index(&dir, "other"), 43);
        assert_eq!(next_scan_index(&dir, "missing"), 0);

        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_scan_numbering_saturates_at_the_index_ceiling() {
        let dir = std::env::temp_dir().join(format!("argus_scan_ceiling_{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(dir.join(format!("scan_{}.txt", u32::MAX)), "x").unwrap();

        assert_eq!(next_scan_index(&dir, "scan"), u32::MAX);

        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_scan_numbering_starts_at_zero() {
        let dir = std::env::temp_dir().join(format!("argus_scan_empty_{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        assert_eq!(next_scan_index(&dir, "scan"), 0);
        std::fs::remove_dir_all(&dir).ok();

        // A directory that does not exist yet behaves the same way.
        assert_eq!(next_scan_index(Path::new("no/such/dir"), "scan"), 0);
    }

    #[test]
    fn test_next_path_is_zero_padded() {
        let output = ScanOutput {
            directory: PathBuf::from("scans"),
            prefix: "scan".to_string(),
            next_index: 12,
        };
        assert_eq!(output.next_path(), PathBuf::from("scans/scan_0012.txt"));
    }
}
