// argus_core/src/pose.rs

use nalgebra::{Point3, UnitQuaternion, Vector3};
use std::f64::consts::FRAC_PI_2;

/// The sensor's pose at one instant: where it sits, which way its scan head
/// faces (yaw, about the world up axis +Y), and where the operator is looking
/// (pitch, about the head's lateral axis).
///
/// Pitch is clamped to [0, π/2] on every path that sets it: the head looks
/// anywhere from the horizon to straight up, never below. It shapes the
/// operator's view and the saved metadata only; the scan sweep is built from
/// yaw alone (see [`SensorPose::yaw_basis`]).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SensorPose {
    pub position: Point3<f64>,
    pub yaw: f64,
    pitch: f64,
}

impl SensorPose {
    pub fn new(position: Point3<f64>, yaw: f64, pitch: f64) -> Self {
        Self {
            position,
            yaw,
            pitch: clamp_pitch(pitch),
        }
    }

    pub fn pitch(&self) -> f64 {
        self.pitch
    }

    /// Sets the pitch, clamped to [0, π/2].
    pub fn set_pitch(&mut self, pitch: f64) {
        self.pitch = clamp_pitch(pitch);
    }

    /// The world-frame rotation the sweep runs under: yaw only.
    ///
    /// Ray directions from the pattern are rotated by this quaternion, so the
    /// fan always covers the full hemisphere above the horizon no matter how
    /// far up the operator has pitched the view.
    pub fn yaw_basis(&self) -> UnitQuaternion<f64> {
        UnitQuaternion::from_axis_angle(&Vector3::y_axis(), self.yaw)
    }

    /// The direction the operator is looking, yaw and pitch combined. Used by
    /// the view camera and readouts, never by the sweep.
    pub fn view_direction(&self) -> Vector3<f64> {
        let (sin_yaw, cos_yaw) = self.yaw.sin_cos();
        let (sin_pitch, cos_pitch) = self.pitch.sin_cos();
        Vector3::new(cos_pitch * sin_yaw, sin_pitch, cos_pitch * cos_yaw)
    }
}

impl Default for SensorPose {
    fn default() -> Self {
        Self::new(Point3::origin(), 0.0, 0.0)
    }
}

fn clamp_pitch(pitch: f64) -> f64 {
    pitch.clamp(0.0, FRAC_PI_2)
}
