// argus_core/src/scan/sink.rs

use crate::color::Rgba;
use nalgebra::{Isometry3, Point3};

/// Where miss records park their slot, in the sink's local frame: far below
/// any plausible scene, so even a renderer that ignores alpha shows nothing.
pub fn parked_position() -> Point3<f64> {
    Point3::new(0.0, -10_000.0, 0.0)
}

/// Consumer of per-slot visualization records.
///
/// The engine calls `set_slot` exactly once per pattern slot on every scan,
/// in increasing slot order, overwriting whatever the previous scan left in
/// that slot. Hit positions arrive already transformed into the sink's local
/// frame; miss records arrive at [`parked_position`] with a fully
/// transparent color.
pub trait RendererSink {
    /// The sink's anchor pose in world space.
    fn frame(&self) -> Isometry3<f64>;

    fn set_slot(&mut self, slot: usize, local_position: Point3<f64>, color: Rgba);
}
