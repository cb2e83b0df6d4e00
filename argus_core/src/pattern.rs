// argus_core/src/pattern.rs

use nalgebra::Vector3;
use std::f64::consts::TAU;

/// The fixed hemispherical fan a scan sweeps through, in the sensor's local
/// frame (+Z forward, +Y up).
///
/// Rays are indexed by (vertical ring `i`, horizontal step `j`). Ring 0 lies
/// on the horizon and successive rings tilt up by `vertical_fov / V` each, so
/// the fan covers [0, vertical_fov) without ever dipping below the horizon.
/// Every ring spans the full azimuth in `H` equal steps. Directions are pure
/// arithmetic on the indices: the same `(i, j)` always produces the same unit
/// vector, bit for bit.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RayPattern {
    vertical_resolution: u32,
    horizontal_resolution: u32,
    vertical_fov: f64,
}

impl RayPattern {
    /// `vertical_fov` is in radians. A resolution of zero on either axis
    /// collapses the pattern to nothing (zero angle steps, no rays).
    pub fn new(vertical_resolution: u32, horizontal_resolution: u32, vertical_fov: f64) -> Self {
        Self {
            vertical_resolution,
            horizontal_resolution,
            vertical_fov,
        }
    }

    pub fn vertical_resolution(&self) -> u32 {
        self.vertical_resolution
    }

    pub fn horizontal_resolution(&self) -> u32 {
        self.horizontal_resolution
    }

    pub fn vertical_fov(&self) -> f64 {
        self.vertical_fov
    }

    /// Total slot count, V x H.
    pub fn len(&self) -> usize {
        self.vertical_resolution as usize * self.horizontal_resolution as usize
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The stable slot index for ray `(i, j)`: vertical-major, `i * H + j`.
    pub fn slot(&self, vertical_index: u32, horizontal_index: u32) -> usize {
        vertical_index as usize * self.horizontal_resolution as usize + horizontal_index as usize
    }

    /// The unit direction of ray `(i, j)` in sensor-local space.
    ///
    /// vertical angle = i * (fov / V), up from the horizon;
    /// horizontal angle = j * (2 pi / H), a full turn of azimuth;
    /// direction = (cos v * sin h, sin v, cos v * cos h), normalized.
    pub fn direction(&self, vertical_index: u32, horizontal_index: u32) -> Vector3<f64> {
        let vertical_step = if self.vertical_resolution == 0 {
            0.0
        } else {
            self.vertical_fov / self.vertical_resolution as f64
        };
        let horizontal_step = if self.horizontal_resolution == 0 {
            0.0
        } else {
            TAU / self.horizontal_resolution as f64
        };

        let vertical_angle = vertical_index as f64 * vertical_step;
        let horizontal_angle = horizontal_index as f64 * horizontal_step;

        let (sin_v, cos_v) = vertical_angle.sin_cos();
        let (sin_h, cos_h) = horizontal_angle.sin_cos();

        Vector3::new(cos_v * sin_h, sin_v, cos_v * cos_h).normalize()
    }

    /// All rays in slot order: vertical-major, each ring swept through its
    /// full azimuth before the next ring starts.
    pub fn directions(&self) -> impl Iterator<Item = (usize, Vector3<f64>)> + '_ {
        (0..self.vertical_resolution).flat_map(move |i| {
            (0..self.horizontal_resolution)
                .map(move |j| (self.slot(i, j), self.direction(i, j)))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use std::f64::consts::FRAC_PI_2;

    const EPSILON: f64 = 1e-9;

    fn assert_direction_approx_eq(actual: &Vector3<f64>, expected: &Vector3<f64>) {
        assert_abs_diff_eq!(actual.x, expected.x, epsilon = EPSILON);
        assert_abs_diff_eq!(actual.y, expected.y, epsilon = EPSILON);
        assert_abs_diff_eq!(actual.z, expected.z, epsilon = EPSILON);
    }

    #[test]
    fn every_direction_is_a_unit_vector() {
        let pattern = RayPattern::new(16, 32, FRAC_PI_2);
        let mut seen = 0;
        for (_, direction) in pattern.directions() {
            assert_abs_diff_eq!(direction.norm(), 1.0, epsilon = EPSILON);
            seen += 1;
        }
        assert_eq!(seen, pattern.len());
    }

    #[test]
    fn directions_are_deterministic() {
        let pattern = RayPattern::new(8, 24, FRAC_PI_2);
        for i in 0..8 {
            for j in 0..24 {
                let first = pattern.direction(i, j);
                let second = pattern.direction(i, j);
                // Stateless arithmetic: identical to the bit.
                assert_eq!(first, second);
            }
        }
    }

    #[test]
    fn horizon_ring_and_quarter_turns() {
        // V = 2 over a 90 degree fov puts ring 0 on the horizon and ring 1
        // at 45 degrees up.
        let pattern = RayPattern::new(2, 4, FRAC_PI_2);

        assert_direction_approx_eq(&pattern.direction(0, 0), &Vector3::new(0.0, 0.0, 1.0));
        assert_direction_approx_eq(&pattern.direction(0, 1), &Vector3::new(1.0, 0.0, 0.0));
        assert_direction_approx_eq(&pattern.direction(0, 2), &Vector3::new(0.0, 0.0, -1.0));
        assert_direction_approx_eq(&pattern.direction(0, 3), &Vector3::new(-1.0, 0.0, 0.0));

        assert_direction_approx_eq(
            &pattern.direction(1, 0),
            &Vector3::new(
                0.0,
                std::f64::consts::FRAC_1_SQRT_2,
                std::f64::consts::FRAC_1_SQRT_2,
            ),
        );
    }

    #[test]
    fn fan_never_dips_below_horizon() {
        let pattern = RayPattern::new(12, 20, FRAC_PI_2);
        for (_, direction) in pattern.directions() {
            assert!(direction.y >= -EPSILON);
        }
    }

    #[test]
    fn slots_are_vertical_major_and_contiguous() {
        let pattern = RayPattern::new(3, 5, FRAC_PI_2);
        let slots: Vec<usize> = pattern.directions().map(|(slot, _)| slot).collect();
        let expected: Vec<usize> = (0..15).collect();
        assert_eq!(slots, expected);
        assert_eq!(pattern.slot(2, 4), 14);
    }

    #[test]
    fn zero_resolution_collapses_to_empty() {
        let no_rings = RayPattern::new(0, 8, FRAC_PI_2);
        assert!(no_rings.is_empty());
        assert_eq!(no_rings.directions().count(), 0);

        let no_steps = RayPattern::new(8, 0, FRAC_PI_2);
        assert!(no_steps.is_empty());
        assert_eq!(no_steps.directions().count(), 0);
    }
}
