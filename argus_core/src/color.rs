// argus_core/src/color.rs

use serde::{Deserialize, Serialize};

/// An engine-neutral RGBA color, channels in [0, 1].
///
/// Serializes as a `[r, g, b, a]` array so scenario files can write colors
/// compactly.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "[f32; 4]", into = "[f32; 4]")]
pub struct Rgba {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Rgba {
    pub const TRANSPARENT: Rgba = Rgba::new(0.0, 0.0, 0.0, 0.0);
    pub const GREEN: Rgba = Rgba::new(0.0, 1.0, 0.0, 1.0);
    pub const RED: Rgba = Rgba::new(1.0, 0.0, 0.0, 1.0);

    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Channel-wise linear interpolation toward `other`; `t` in [0, 1].
    pub fn lerp(&self, other: &Rgba, t: f32) -> Rgba {
        Rgba::new(
            self.r + (other.r - self.r) * t,
            self.g + (other.g - self.g) * t,
            self.b + (other.b - self.b) * t,
            self.a + (other.a - self.a) * t,
        )
    }
}

impl From<[f32; 4]> for Rgba {
    fn from(channels: [f32; 4]) -> Self {
        Rgba::new(channels[0], channels[1], channels[2], channels[3])
    }
}

impl From<Rgba> for [f32; 4] {
    fn from(color: Rgba) -> Self {
        [color.r, color.g, color.b, color.a]
    }
}

/// Maps a hit distance onto a color gradient.
///
/// Distance is remapped from [min_distance, max_distance] to t in [0, 1] and
/// CLAMPED at both ends: anything nearer than `min_distance` reads as the
/// near color, anything farther than `max_distance` saturates at the far
/// color. A degenerate range (min == max, or inverted) always yields t = 0.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields, default)]
pub struct ColorRamp {
    pub near: Rgba,
    pub far: Rgba,
    pub min_distance: f64,
    pub max_distance: f64,
}

impl ColorRamp {
    pub fn new(near: Rgba, far: Rgba, min_distance: f64, max_distance: f64) -> Self {
        Self {
            near,
            far,
            min_distance,
            max_distance,
        }
    }

    pub fn color_for(&self, distance: f64) -> Rgba {
        let span = self.max_distance - self.min_distance;
        let t = if span <= 0.0 {
            0.0
        } else {
            ((distance - self.min_distance) / span).clamp(0.0, 1.0)
        };
        self.near.lerp(&self.far, t as f32)
    }
}

impl Default for ColorRamp {
    fn default() -> Self {
        // Green up close shading to red at 50 m, the classic range legend.
        Self::new(Rgba::GREEN, Rgba::RED, 0.0, 50.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    const EPSILON: f32 = 1e-6;

    #[test]
    fn endpoints_map_to_near_and_far() {
        let ramp = ColorRamp::new(Rgba::GREEN, Rgba::RED, 2.0, 10.0);
        assert_eq!(ramp.color_for(2.0), Rgba::GREEN);
        assert_eq!(ramp.color_for(10.0), Rgba::RED);
    }

    #[test]
    fn midpoint_blends_evenly() {
        let ramp = ColorRamp::new(Rgba::GREEN, Rgba::RED, 0.0, 10.0);
        let mid = ramp.color_for(5.0);
        assert_abs_diff_eq!(mid.r, 0.5, epsilon = EPSILON);
        assert_abs_diff_eq!(mid.g, 0.5, epsilon = EPSILON);
        assert_abs_diff_eq!(mid.b, 0.0, epsilon = EPSILON);
        assert_abs_diff_eq!(mid.a, 1.0, epsilon = EPSILON);
    }

    #[test]
    fn out_of_range_distances_clamp() {
        let ramp = ColorRamp::new(Rgba::GREEN, Rgba::RED, 5.0, 15.0);
        assert_eq!(ramp.color_for(-100.0), Rgba::GREEN);
        assert_eq!(ramp.color_for(0.0), Rgba::GREEN);
        assert_eq!(ramp.color_for(1e9), Rgba::RED);
    }

    #[test]
    fn red_rises_and_green_falls_with_distance() {
        let ramp = ColorRamp::default();
        let mut previous = ramp.color_for(0.0);
        for step in 1..=100 {
            let color = ramp.color_for(step as f64 * 0.5);
            assert!(color.r >= previous.r);
            assert!(color.g <= previous.g);
            previous = color;
        }
    }

    #[test]
    fn degenerate_range_reads_as_near() {
        let collapsed = ColorRamp::new(Rgba::GREEN, Rgba::RED, 7.0, 7.0);
        assert_eq!(collapsed.color_for(0.0), Rgba::GREEN);
        assert_eq!(collapsed.color_for(7.0), Rgba::GREEN);
        assert_eq!(collapsed.color_for(100.0), Rgba::GREEN);

        let inverted = ColorRamp::new(Rgba::GREEN, Rgba::RED, 9.0, 3.0);
        assert_eq!(inverted.color_for(6.0), Rgba::GREEN);
    }
}
