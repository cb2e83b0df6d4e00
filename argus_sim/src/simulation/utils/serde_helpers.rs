// argus_sim/src/simulation/utils/serde_helpers.rs

//! Custom (de)serializers so scenario TOML stays terse. Authors write plain
//! f32 arrays like `position = [0.0, 1.8, 0.0]` while the simulation keeps
//! full f64 precision internally.

/// Maps a `Vector3<f64>` to and from a `[f32; 3]` array.
///
/// Use with `#[serde(with = "serde_helpers::vec3_f64_from_f32_array")]`.
pub mod vec3_f64_from_f32_array {
    use nalgebra::Vector3;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(vector: &Vector3<f64>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_seq(vector.iter().map(|&component| component as f32))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Vector3<f64>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let arr: [f32; 3] = Deserialize::deserialize(deserializer)?;
        Ok(Vector3::new(arr[0] as f64, arr[1] as f64, arr[2] as f64))
    }
}
