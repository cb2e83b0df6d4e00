// argus_sim/src/simulation/plugins/rendering/mod.rs
use bevy::prelude::*;
use nalgebra::{Isometry3, Point3};

use crate::prelude::*;
use crate::simulation::core::transforms::point_to_bevy_vec3;

/// One display slot per pattern ray.
#[derive(Debug, Clone, Copy)]
pub struct SlotVisual {
    pub position: Vec3,
    pub color: Rgba,
}

/// Fixed-size buffer of point visuals, one slot per ray in the pattern.
///
/// The scan engine writes every slot exactly once per sweep through the
/// [`RendererSink`] impl; the draw system shows whatever is there, skipping
/// transparent (parked) slots. The display anchors at the world origin, so
/// the sink frame and the world frame coincide here.
#[derive(Resource, Debug)]
pub struct PointSlotStore {
    anchor: Isometry3<f64>,
    slots: Vec<SlotVisual>,
}

impl Default for PointSlotStore {
    fn default() -> Self {
        Self {
            anchor: Isometry3::identity(),
            slots: Vec::new(),
        }
    }
}

impl PointSlotStore {
    /// Drops every stored point and resizes the buffer for a new pattern.
    pub fn reset(&mut self, len: usize) {
        self.slots.clear();
        self.slots.resize(
            len,
            SlotVisual {
                position: Vec3::ZERO,
                color: Rgba::TRANSPARENT,
            },
        );
    }

    pub fn slots(&self) -> &[SlotVisual] {
        &self.slots
    }
}

impl RendererSink for PointSlotStore {
    fn frame(&self) -> Isometry3<f64> {
        self.anchor
    }

    fn set_slot(&mut self, slot: usize, local_position: Point3<f64>, color: Rgba) {
        if let Some(visual) = self.slots.get_mut(slot) {
            visual.position = point_to_bevy_vec3(&local_position);
            visual.color = color;
        }
    }
}

// =========================================================================
// == Point Display Plugin ==
// =========================================================================

pub struct PointDisplayPlugin;

impl Plugin for PointDisplayPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<PointSlotStore>();
        app.add_systems(Update, draw_scan_points.in_set(SimulationSet::Visualization));
    }
}

/// Draws one gizmo sphere per live slot.
fn draw_scan_points(mut gizmos: Gizmos, store: Res<PointSlotStore>, config: Res<ScenarioConfig>) {
    let radius = config.sensor.point_radius;
    for visual in store.slots() {
        if visual.color.a <= 0.0 {
            continue;
        }
        gizmos.sphere(
            Isometry3d::from_translation(visual.position),
            radius,
            Color::srgba(
                visual.color.r,
                visual.color.g,
                visual.color.b,
                visual.color.a,
            ),
        );
    }
}
