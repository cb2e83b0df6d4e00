// argus_sim/src/simulation/plugins/world/mod.rs
use avian3d::prelude::*;
use bevy::prelude::*;
use rand::Rng;

use crate::prelude::*;

/// Builds the scan yard: a walled square of ground strewn with pillars,
/// crates, and overhead beams. Every solid carries a single-token `Name`
/// so scan returns come back labeled.
pub struct ScanYardPlugin;

impl Plugin for ScanYardPlugin {
    fn build(&self, app: &mut App) {
        app.insert_resource(AmbientLight {
            brightness: 300.0,
            ..default()
        });
        app.add_systems(
            OnEnter(AppState::SceneBuilding),
            (spawn_ground_and_walls, spawn_obstacles, spawn_lighting).in_set(SceneBuildSet::World),
        );
    }
}

// =========================================================================
// == Spawning Systems ==
// =========================================================================

/// Floor slab plus the four perimeter walls.
fn spawn_ground_and_walls(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    config: Res<ScenarioConfig>,
) {
    let world = &config.world;
    let side = world.half_extent * 2.0;

    info!(
        "[SPAWN] Scan yard: {:.0}x{:.0} m, {} pillars, {} crates, {} beams",
        side, side, world.pillar_count, world.crate_count, world.beam_count
    );

    // --- Ground ---
    let ground_material = materials.add(StandardMaterial {
        base_color: Color::srgb(0.3, 0.5, 0.3),
        ..default()
    });
    commands.spawn((
        Mesh3d(meshes.add(Plane3d::default().mesh().size(side, side))),
        MeshMaterial3d(ground_material),
        Transform::from_xyz(0.0, 0.0, 0.0),
        RigidBody::Static,
        Collider::cuboid(side, 0.01, side),
        Name::new("ground"),
    ));

    // --- Perimeter Walls ---
    // North is +Z, matching the rig's zero azimuth.
    let wall_material = materials.add(StandardMaterial {
        base_color: Color::srgb(0.55, 0.55, 0.6),
        ..default()
    });
    let thickness = 0.3;
    let height = world.wall_height;
    let offset = world.half_extent;
    let walls = [
        (
            "wall_north",
            Vec3::new(0.0, height / 2.0, offset),
            Vec3::new(side, height, thickness),
        ),
        (
            "wall_south",
            Vec3::new(0.0, height / 2.0, -offset),
            Vec3::new(side, height, thickness),
        ),
        (
            "wall_east",
            Vec3::new(offset, height / 2.0, 0.0),
            Vec3::new(thickness, height, side),
        ),
        (
            "wall_west",
            Vec3::new(-offset, height / 2.0, 0.0),
            Vec3::new(thickness, height, side),
        ),
    ];
    for (name, center, size) in walls {
        commands.spawn((
            Mesh3d(meshes.add(Cuboid::new(size.x, size.y, size.z))),
            MeshMaterial3d(wall_material.clone()),
            Transform::from_translation(center),
            RigidBody::Static,
            Collider::cuboid(size.x, size.y, size.z),
            Name::new(name),
        ));
    }
}

/// Pillars, crates, and overhead beams, placed by the seeded RNG.
fn spawn_obstacles(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    config: Res<ScenarioConfig>,
    mut rng: ResMut<SimulationRng>,
) {
    let world = &config.world;
    let rng = &mut rng.0;
    // Stay inside the walls with a little margin.
    let placement_extent = (world.half_extent - 2.0).max(1.0);

    let pillar_material = materials.add(StandardMaterial {
        base_color: Color::srgb(0.7, 0.6, 0.4),
        ..default()
    });
    for index in 0..world.pillar_count {
        let radius = rng.gen_range(0.3..0.6);
        let height = rng.gen_range(2.0..world.wall_height.max(2.5));
        let (x, z) = sample_clear_spot(rng, placement_extent);
        commands.spawn((
            Mesh3d(meshes.add(Cylinder::new(radius, height))),
            MeshMaterial3d(pillar_material.clone()),
            Transform::from_xyz(x, height / 2.0, z),
            RigidBody::Static,
            Collider::cylinder(radius, height),
            Name::new(format!("pillar_{:02}", index)),
        ));
    }

    let crate_material = materials.add(StandardMaterial {
        base_color: Color::srgb(0.5, 0.35, 0.2),
        ..default()
    });
    for index in 0..world.crate_count {
        let size = rng.gen_range(0.6..1.6);
        let yaw = rng.gen_range(0.0..std::f32::consts::TAU);
        let (x, z) = sample_clear_spot(rng, placement_extent);
        commands.spawn((
            Mesh3d(meshes.add(Cuboid::new(size, size, size))),
            MeshMaterial3d(crate_material.clone()),
            Transform::from_xyz(x, size / 2.0, z).with_rotation(Quat::from_rotation_y(yaw)),
            RigidBody::Static,
            Collider::cuboid(size, size, size),
            Name::new(format!("crate_{:02}", index)),
        ));
    }

    // Overhead beams give the upward-sweeping fan something to return from.
    let beam_material = materials.add(StandardMaterial {
        base_color: Color::srgb(0.6, 0.3, 0.25),
        ..default()
    });
    for index in 0..world.beam_count {
        let length = world.half_extent * 2.0 * rng.gen_range(0.5..0.9);
        let elevation = world.wall_height + rng.gen_range(0.5..2.5);
        let offset = rng.gen_range(-placement_extent..placement_extent);
        let (size, position) = if index % 2 == 0 {
            (
                Vec3::new(0.4, 0.3, length),
                Vec3::new(offset, elevation, 0.0),
            )
        } else {
            (
                Vec3::new(length, 0.3, 0.4),
                Vec3::new(0.0, elevation, offset),
            )
        };
        commands.spawn((
            Mesh3d(meshes.add(Cuboid::new(size.x, size.y, size.z))),
            MeshMaterial3d(beam_material.clone()),
            Transform::from_translation(position),
            RigidBody::Static,
            Collider::cuboid(size.x, size.y, size.z),
            Name::new(format!("beam_{:02}", index)),
        ));
    }
}

/// One strong sun so the yard reads clearly on screen.
fn spawn_lighting(mut commands: Commands) {
    commands.spawn((
        DirectionalLight {
            shadows_enabled: true,
            illuminance: 15_000.0,
            ..default()
        },
        Transform::from_rotation(Quat::from_euler(EulerRot::XYZ, -0.8, -0.5, 0.0)),
        Name::new("sun"),
    ));
}

/// Samples a ground position away from the operator's default spot at the
/// origin. Gives up after a few tries on tiny yards.
fn sample_clear_spot(rng: &mut impl Rng, extent: f32) -> (f32, f32) {
    for _ in 0..8 {
        let x = rng.gen_range(-extent..extent);
        let z = rng.gen_range(-extent..extent);
        if x * x + z * z > 4.0 {
            return (x, z);
        }
    }
    (extent * 0.5, extent * 0.5)
}

// --- Unit Test Module ---
#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_clear_spots_avoid_the_operator_origin() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        for _ in 0..100 {
            let (x, z) = sample_clear_spot(&mut rng, 18.0);
            assert!(x * x + z * z > 4.0);
            assert!(x.abs() <= 18.0 && z.abs() <= 18.0);
        }
    }

    #[test]
    fn test_clear_spots_are_deterministic_for_a_seed() {
        let mut a = ChaCha8Rng::seed_from_u64(42);
        let mut b = ChaCha8Rng::seed_from_u64(42);
        for _ in 0..10 {
            assert_eq!(
                sample_clear_spot(&mut a, 10.0),
                sample_clear_spot(&mut b, 10.0)
            );
        }
    }
}
