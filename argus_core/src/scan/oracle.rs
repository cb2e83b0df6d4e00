// argus_core/src/scan/oracle.rs

use nalgebra::Point3;
use thiserror::Error;

/// The label applied to hits whose surface has no resolvable name.
pub const UNKNOWN_LABEL: &str = "Unknown";

/// The nearest surface struck along one ray.
#[derive(Debug, Clone, PartialEq)]
pub struct RayHit {
    /// Hit position in world space.
    pub position: Point3<f64>,
    /// What the surface calls itself, if the scene can say. `None` becomes
    /// [`UNKNOWN_LABEL`] in the point cloud.
    pub label: Option<String>,
}

impl RayHit {
    pub fn new(position: Point3<f64>, label: Option<String>) -> Self {
        Self { position, label }
    }
}

/// A failed intersection query. The sweep downgrades it to a miss for that
/// ray alone and keeps going; nothing here is fatal.
#[derive(Debug, Clone, Error)]
#[error("intersection query failed: {reason}")]
pub struct OracleError {
    pub reason: String,
}

impl OracleError {
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

/// The ray/scene intersection service the scan engine queries once per ray.
///
/// `origin` and `target` are both world-space points; the segment between
/// them is the ray at its maximum range. Implementations return the nearest
/// surface on that segment, or `Ok(None)` when it reaches nothing.
pub trait RayOracle {
    fn query(
        &mut self,
        origin: &Point3<f64>,
        target: &Point3<f64>,
    ) -> Result<Option<RayHit>, OracleError>;
}
