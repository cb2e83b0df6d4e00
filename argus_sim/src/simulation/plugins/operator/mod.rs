// argus_sim/src/simulation/plugins/operator/mod.rs

use crate::prelude::*;
use crate::simulation::core::transforms::vector_to_bevy_vec3;
use bevy::input::mouse::MouseMotion;
use bevy::window::{CursorGrabMode, PrimaryWindow};
use std::f32::consts::{FRAC_PI_2, PI};

/// Whether the primary window currently owns the pointer.
///
/// Mouse look and flight only respond while `Captured`; the scan hotkeys work
/// in either state so a run can be triggered with the cursor free.
#[derive(Resource, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InputCapture {
    #[default]
    Released,
    Captured,
}

/// The operator's view state. Yaw and pitch are kept here, not read back from
/// the `Transform`, so the scan systems snapshot exactly what the input
/// systems wrote.
#[derive(Component, Debug)]
pub struct OperatorRig {
    /// Azimuth of the scan head in radians. Zero looks along world +Z.
    pub yaw: f32,
    /// Elevation of the view in radians, clamped to [0, pi/2].
    pub pitch: f32,
    pub move_speed: f32,
    pub boost_multiplier: f32,
    pub mouse_sensitivity: f32,
}

/// Builds the camera rotation for a rig. The scan head's zero azimuth is
/// world +Z while a Bevy camera looks down its local -Z, so the camera yaw
/// leads the rig yaw by half a turn.
pub fn rig_rotation(rig: &OperatorRig) -> Quat {
    Quat::from_euler(EulerRot::YXZ, rig.yaw + PI, rig.pitch, 0.0)
}

/// Level flight axes (forward, right) for a rig. Derived from yaw alone:
/// at the straight-up pitch stop the camera forward flattens to rounding
/// noise, so the heading must come from the rig state, not the transform.
pub fn planar_axes(rig: &OperatorRig) -> (Vec3, Vec3) {
    let forward = Vec3::new(rig.yaw.sin(), 0.0, rig.yaw.cos());
    let right = Vec3::new(-rig.yaw.cos(), 0.0, rig.yaw.sin());
    (forward, right)
}

// =========================================================================
// == Operator Plugin ==
// =========================================================================

pub struct OperatorPlugin;

impl Plugin for OperatorPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<InputCapture>();
        app.add_systems(
            OnEnter(AppState::SceneBuilding),
            spawn_operator.in_set(SceneBuildSet::Operator),
        );
        app.add_systems(
            Update,
            (
                capture_pointer.run_if(resource_equals(InputCapture::Released)),
                release_pointer.run_if(resource_equals(InputCapture::Captured)),
                (operator_look, operator_move)
                    .chain()
                    .run_if(resource_equals(InputCapture::Captured)),
            )
                .in_set(SimulationSet::Input),
        );
    }
}

// =========================================================================
// == Systems ==
// =========================================================================

/// Spawns the camera entity that doubles as the scan head.
fn spawn_operator(mut commands: Commands, config: Res<ScenarioConfig>) {
    let operator = &config.operator;
    let rig = OperatorRig {
        yaw: operator.yaw_deg.to_radians(),
        pitch: operator.pitch_deg.to_radians().clamp(0.0, FRAC_PI_2),
        move_speed: operator.move_speed,
        boost_multiplier: operator.boost_multiplier,
        mouse_sensitivity: operator.mouse_sensitivity,
    };
    let transform = Transform::from_translation(vector_to_bevy_vec3(&operator.position))
        .with_rotation(rig_rotation(&rig));

    info!(
        "[SPAWN] Operator rig at {:?} (yaw {:.1} deg, pitch {:.1} deg)",
        transform.translation, operator.yaw_deg, operator.pitch_deg
    );

    commands.spawn((Name::new("operator"), Camera3d::default(), rig, transform));
}

/// Left click locks the pointer to the window and hands it to mouse look.
fn capture_pointer(
    mouse: Res<ButtonInput<MouseButton>>,
    mut capture: ResMut<InputCapture>,
    mut windows: Query<&mut Window, With<PrimaryWindow>>,
) {
    if !mouse.just_pressed(MouseButton::Left) {
        return;
    }
    let Ok(mut window) = windows.single_mut() else {
        return;
    };
    window.cursor_options.grab_mode = CursorGrabMode::Locked;
    window.cursor_options.visible = false;
    *capture = InputCapture::Captured;
    info!("[INPUT] Pointer captured.");
}

/// Escape gives the pointer back to the desktop.
fn release_pointer(
    keyboard: Res<ButtonInput<KeyCode>>,
    mut capture: ResMut<InputCapture>,
    mut windows: Query<&mut Window, With<PrimaryWindow>>,
) {
    if !keyboard.just_pressed(KeyCode::Escape) {
        return;
    }
    let Ok(mut window) = windows.single_mut() else {
        return;
    };
    window.cursor_options.grab_mode = CursorGrabMode::None;
    window.cursor_options.visible = true;
    *capture = InputCapture::Released;
    info!("[INPUT] Pointer released.");
}

/// Turns the rig from accumulated mouse motion.
fn operator_look(
    mut motion: EventReader<MouseMotion>,
    mut query: Query<(&mut OperatorRig, &mut Transform)>,
) {
    let Ok((mut rig, mut transform)) = query.single_mut() else {
        return;
    };

    let mut delta = Vec2::ZERO;
    for event in motion.read() {
        delta += event.delta;
    }
    if delta == Vec2::ZERO {
        return;
    }

    rig.yaw -= delta.x * rig.mouse_sensitivity;
    // The rig never looks below the horizon; the upward fan covers the rest.
    rig.pitch = (rig.pitch - delta.y * rig.mouse_sensitivity).clamp(0.0, FRAC_PI_2);
    transform.rotation = rig_rotation(&rig);
}

/// WASD flight with E/Q for height and Shift for a speed boost.
fn operator_move(
    keyboard: Res<ButtonInput<KeyCode>>,
    time: Res<Time>,
    mut query: Query<(&OperatorRig, &mut Transform)>,
) {
    let Ok((rig, mut transform)) = query.single_mut() else {
        return;
    };

    // Planar heading keeps flight level no matter how far the view is pitched.
    let (forward, right) = planar_axes(rig);

    let mut direction = Vec3::ZERO;
    if keyboard.pressed(KeyCode::KeyW) {
        direction += forward;
    }
    if keyboard.pressed(KeyCode::KeyS) {
        direction -= forward;
    }
    if keyboard.pressed(KeyCode::KeyD) {
        direction += right;
    }
    if keyboard.pressed(KeyCode::KeyA) {
        direction -= right;
    }
    if keyboard.pressed(KeyCode::KeyE) {
        direction += Vec3::Y;
    }
    if keyboard.pressed(KeyCode::KeyQ) {
        direction -= Vec3::Y;
    }

    let mut speed = rig.move_speed;
    if keyboard.pressed(KeyCode::ShiftLeft) {
        speed *= rig.boost_multiplier;
    }

    transform.translation += direction.normalize_or_zero() * speed * time.delta_secs();
}

// --- Unit Test Module ---
#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use nalgebra::Point3;

    const F32_EPSILON: f32 = 1e-5;

    fn test_rig(yaw: f32, pitch: f32) -> OperatorRig {
        OperatorRig {
            yaw,
            pitch,
            move_speed: 6.0,
            boost_multiplier: 3.0,
            mouse_sensitivity: 0.002,
        }
    }

    fn camera_forward(rig: &OperatorRig) -> Vec3 {
        rig_rotation(rig) * Vec3::NEG_Z
    }

    #[test]
    fn test_zero_yaw_looks_along_world_plus_z() {
        let forward = camera_forward(&test_rig(0.0, 0.0));
        assert_abs_diff_eq!(forward.x, 0.0, epsilon = F32_EPSILON);
        assert_abs_diff_eq!(forward.y, 0.0, epsilon = F32_EPSILON);
        assert_abs_diff_eq!(forward.z, 1.0, epsilon = F32_EPSILON);
    }

    #[test]
    fn test_quarter_turn_yaw_looks_along_world_plus_x() {
        let forward = camera_forward(&test_rig(FRAC_PI_2, 0.0));
        assert_abs_diff_eq!(forward.x, 1.0, epsilon = F32_EPSILON);
        assert_abs_diff_eq!(forward.y, 0.0, epsilon = F32_EPSILON);
        assert_abs_diff_eq!(forward.z, 0.0, epsilon = F32_EPSILON);
    }

    #[test]
    fn test_positive_pitch_looks_up() {
        let forward = camera_forward(&test_rig(0.0, 0.5));
        assert_abs_diff_eq!(forward.y, 0.5f32.sin(), epsilon = F32_EPSILON);
        assert!(forward.z > 0.0);
    }

    #[test]
    fn test_camera_rotation_agrees_with_sensor_pose() {
        // The rendered view and the scan snapshot share one convention.
        let rig = test_rig(1.1, 0.6);
        let forward = camera_forward(&rig);
        let pose = SensorPose::new(Point3::origin(), rig.yaw as f64, rig.pitch as f64);
        let view = pose.view_direction();
        assert_abs_diff_eq!(forward.x, view.x as f32, epsilon = F32_EPSILON);
        assert_abs_diff_eq!(forward.y, view.y as f32, epsilon = F32_EPSILON);
        assert_abs_diff_eq!(forward.z, view.z as f32, epsilon = F32_EPSILON);
    }

    #[test]
    fn test_flight_axes_agree_with_the_camera_below_the_stop() {
        let rig = test_rig(0.8, 0.6);
        let (forward, right) = planar_axes(&rig);

        let mut flattened = camera_forward(&rig);
        flattened.y = 0.0;
        let flattened = flattened.normalize();
        assert_abs_diff_eq!(forward.x, flattened.x, epsilon = F32_EPSILON);
        assert_abs_diff_eq!(forward.z, flattened.z, epsilon = F32_EPSILON);

        let camera_right = rig_rotation(&rig) * Vec3::X;
        assert_abs_diff_eq!(right.x, camera_right.x, epsilon = F32_EPSILON);
        assert_abs_diff_eq!(right.z, camera_right.z, epsilon = F32_EPSILON);
    }

    #[test]
    fn test_flight_heading_survives_the_straight_up_stop() {
        // Looking straight up, the camera forward has no planar component
        // left, but W/S must still track the rig's azimuth.
        let rig = test_rig(0.8, FRAC_PI_2);
        let (forward, right) = planar_axes(&rig);

        let heading = Vec3::new((0.8f64).sin() as f32, 0.0, (0.8f64).cos() as f32);
        assert_abs_diff_eq!(forward.dot(heading), 1.0, epsilon = F32_EPSILON);
        assert_abs_diff_eq!(forward.length(), 1.0, epsilon = F32_EPSILON);
        assert_abs_diff_eq!(forward.dot(right), 0.0, epsilon = F32_EPSILON);
        assert_abs_diff_eq!(forward.y, 0.0, epsilon = F32_EPSILON);
    }
}
