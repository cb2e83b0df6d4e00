// argus_core/src/scan/mod.rs

pub mod oracle;
pub mod sink;

pub use oracle::{OracleError, RayHit, RayOracle, UNKNOWN_LABEL};
pub use sink::{parked_position, RendererSink};

use crate::cloud::{PointCloud, PointCloudEntry};
use crate::color::{ColorRamp, Rgba};
use crate::pattern::RayPattern;
use crate::pose::SensorPose;

/// Tally of one completed sweep.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ScanSummary {
    /// Slots visited, always the pattern's full V x H.
    pub slots: usize,
    pub hits: usize,
    /// Rays that reached nothing, including faulted queries.
    pub misses: usize,
    /// Oracle queries that failed outright.
    pub faults: usize,
}

/// Drives one full sweep: pattern x pose -> oracle queries -> point cloud
/// entries and sink records.
///
/// The engine owns the point cloud. Each [`ScanEngine::run_scan`] clears it
/// and rebuilds it from scratch; between scans it holds the previous sweep's
/// hits for the serializer and anyone else who wants to read them.
#[derive(Debug)]
pub struct ScanEngine {
    pattern: RayPattern,
    max_range: f64,
    ramp: ColorRamp,
    cloud: PointCloud,
}

impl ScanEngine {
    pub fn new(pattern: RayPattern, max_range: f64, ramp: ColorRamp) -> Self {
        let slots = pattern.len();
        Self {
            pattern,
            max_range,
            ramp,
            cloud: PointCloud::with_capacity(slots),
        }
    }

    pub fn pattern(&self) -> &RayPattern {
        &self.pattern
    }

    pub fn max_range(&self) -> f64 {
        self.max_range
    }

    /// The hits of the most recent sweep, in sweep order.
    pub fn cloud(&self) -> &PointCloud {
        &self.cloud
    }

    /// Runs one sweep from `pose` and reports the tally.
    ///
    /// The pose is read once, up front; whatever moves the sensor mid-sweep
    /// is invisible to this scan. The sweep's basis is yaw-only, so the fan
    /// covers the same hemisphere regardless of the operator's pitch. Every
    /// pattern slot produces exactly one oracle query and one sink record:
    /// hits push a cloud entry and a colored record at the hit position in
    /// the sink's frame; misses and failed queries park their slot,
    /// transparent, off scene. A failed query never aborts the sweep.
    pub fn run_scan(
        &mut self,
        pose: &SensorPose,
        oracle: &mut dyn RayOracle,
        sink: &mut dyn RendererSink,
    ) -> ScanSummary {
        self.cloud.clear();

        let origin = pose.position;
        let basis = pose.yaw_basis();
        let to_sink = sink.frame().inverse();

        let mut summary = ScanSummary {
            slots: self.pattern.len(),
            ..Default::default()
        };

        for (slot, local_direction) in self.pattern.directions() {
            let world_direction = basis * local_direction;
            let target = origin + world_direction * self.max_range;

            match oracle.query(&origin, &target) {
                Ok(Some(hit)) => {
                    let distance = (hit.position - origin).norm();
                    let color = self.ramp.color_for(distance);
                    let label = hit.label.unwrap_or_else(|| UNKNOWN_LABEL.to_string());
                    self.cloud.push(PointCloudEntry::new(hit.position, label));
                    sink.set_slot(slot, to_sink * hit.position, color);
                    summary.hits += 1;
                }
                Ok(None) => {
                    sink.set_slot(slot, parked_position(), Rgba::TRANSPARENT);
                    summary.misses += 1;
                }
                Err(_) => {
                    // A faulted query is a miss for this ray only.
                    sink.set_slot(slot, parked_position(), Rgba::TRANSPARENT);
                    summary.misses += 1;
                    summary.faults += 1;
                }
            }
        }

        summary
    }
}
