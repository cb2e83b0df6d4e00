// argus_sim/src/simulation/core/transforms.rs

use bevy::prelude::Vec3 as BevyVec3;
use nalgebra::{Point3, Vector3};

// =========================================================================
// == Bevy <-> nalgebra Conversion Helpers ==
// =========================================================================
// The core crate does all its geometry in nalgebra f64; Bevy renders and
// raycasts in f32. Both share the same axes (+Y up, +X east), so conversion
// is a precision change, never an axis swap.

/// Converts a core world-space point into a Bevy `Vec3`.
pub fn point_to_bevy_vec3(point: &Point3<f64>) -> BevyVec3 {
    BevyVec3::new(point.x as f32, point.y as f32, point.z as f32)
}

/// Converts a Bevy `Vec3` into a core world-space point.
pub fn bevy_vec3_to_point(vec: BevyVec3) -> Point3<f64> {
    Point3::new(vec.x as f64, vec.y as f64, vec.z as f64)
}

/// Converts a core direction vector into a Bevy `Vec3`.
pub fn vector_to_bevy_vec3(vector: &Vector3<f64>) -> BevyVec3 {
    BevyVec3::new(vector.x as f32, vector.y as f32, vector.z as f32)
}

/// Converts a Bevy `Vec3` into a core direction vector.
pub fn bevy_vec3_to_vector(vec: BevyVec3) -> Vector3<f64> {
    Vector3::new(vec.x as f64, vec.y as f64, vec.z as f64)
}
