// argus_sim/src/simulation/plugins/debugging/hud.rs
use bevy::prelude::*;

use crate::prelude::*;
use crate::simulation::plugins::sensors::lidar::{LidarRig, ScanOutput, ScanTelemetry};

/// Marks the single HUD text node.
#[derive(Component)]
pub struct HudReadout;

/// Top-left overlay with the key bindings, the rig pose, and the result of
/// the latest sweep and save.
pub struct HudPlugin;

impl Plugin for HudPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(
            OnEnter(AppState::SceneBuilding),
            spawn_hud.in_set(SceneBuildSet::Cleanup),
        );
        app.add_systems(Update, update_hud.in_set(SimulationSet::Visualization));
    }
}

fn spawn_hud(mut commands: Commands) {
    commands.spawn((
        HudReadout,
        Text::new("argus"),
        TextFont {
            font_size: 14.0,
            ..default()
        },
        TextColor(Color::srgb(0.9, 0.9, 0.9)),
        Node {
            position_type: PositionType::Absolute,
            top: Val::Px(8.0),
            left: Val::Px(8.0),
            ..default()
        },
    ));
}

/// Rewrites the readout every frame.
fn update_hud(
    capture: Res<InputCapture>,
    telemetry: Res<ScanTelemetry>,
    output: Option<Res<ScanOutput>>,
    rig_query: Query<(&OperatorRig, &Transform), With<LidarRig>>,
    mut text_query: Query<&mut Text, With<HudReadout>>,
) {
    let Ok(mut text) = text_query.single_mut() else {
        return;
    };

    let mut lines = vec![
        "LMB capture | Esc release | WASD/QE move | Space scan | Enter save".to_string(),
        format!(
            "pointer: {}",
            match *capture {
                InputCapture::Captured => "captured",
                InputCapture::Released => "released",
            }
        ),
    ];

    if let Ok((rig, transform)) = rig_query.single() {
        let position = transform.translation;
        lines.push(format!(
            "pose: ({:.1}, {:.1}, {:.1})  yaw {:.0} deg  pitch {:.0} deg",
            position.x,
            position.y,
            position.z,
            rig.yaw.to_degrees().rem_euclid(360.0),
            rig.pitch.to_degrees(),
        ));
    }

    match telemetry.last_summary {
        Some(summary) => lines.push(format!(
            "scan: {} hits / {} rays ({} faulted)",
            summary.hits, summary.slots, summary.faults
        )),
        None => lines.push("scan: none yet".to_string()),
    }

    match &telemetry.last_save {
        Some(saved) => lines.push(format!("saved: {}", saved)),
        None => {
            if let Some(output) = output {
                lines.push(format!("next save: {}", output.next_path().display()));
            }
        }
    }

    text.0 = lines.join("\n");
}
