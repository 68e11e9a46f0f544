use bevy::prelude::*;

use super::components::{
    Collider, Globe, Highlight, Interactable, LightSwitch, Plaque, StaticGeometry,
};
use super::{ROOM_DEPTH, ROOM_HEIGHT, ROOM_WIDTH, WALL_THICKNESS};
use crate::config::CharacterConfig;
use crate::player::{Player, PlayerCamera, Stance, Velocity};

/// Spawns a box of level geometry that also blocks interaction rays.
fn spawn_slab(
    commands: &mut Commands,
    meshes: &mut Assets<Mesh>,
    material: Handle<StandardMaterial>,
    name: &'static str,
    size: Vec3,
    translation: Vec3,
) {
    commands.spawn((
        Name::new(name),
        StaticGeometry,
        Mesh3d(meshes.add(Cuboid::from_size(size))),
        MeshMaterial3d(material),
        Transform::from_translation(translation),
        Collider::cuboid(size.x, size.y, size.z),
    ));
}

pub fn setup_world(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    config: Res<CharacterConfig>,
) {
    // Materials
    let floor_material = materials.add(StandardMaterial {
        base_color: Color::srgb(0.4, 0.35, 0.3),
        ..default()
    });
    let wall_material = materials.add(StandardMaterial {
        base_color: Color::srgb(0.8, 0.75, 0.7),
        ..default()
    });
    let ceiling_material = materials.add(StandardMaterial {
        base_color: Color::srgb(0.9, 0.9, 0.9),
        ..default()
    });
    let crate_material = materials.add(StandardMaterial {
        base_color: Color::srgb(0.55, 0.4, 0.2),
        ..default()
    });

    let half_height = ROOM_HEIGHT / 2.0;
    let shell = [
        (
            "Floor",
            floor_material,
            Vec3::new(ROOM_WIDTH, WALL_THICKNESS, ROOM_DEPTH),
            Vec3::new(0.0, -WALL_THICKNESS / 2.0, 0.0),
        ),
        (
            "Ceiling",
            ceiling_material,
            Vec3::new(ROOM_WIDTH, WALL_THICKNESS, ROOM_DEPTH),
            Vec3::new(0.0, ROOM_HEIGHT + WALL_THICKNESS / 2.0, 0.0),
        ),
        (
            "Back wall",
            wall_material.clone(),
            Vec3::new(ROOM_WIDTH, ROOM_HEIGHT, WALL_THICKNESS),
            Vec3::new(0.0, half_height, -ROOM_DEPTH / 2.0),
        ),
        (
            "Front wall",
            wall_material.clone(),
            Vec3::new(ROOM_WIDTH, ROOM_HEIGHT, WALL_THICKNESS),
            Vec3::new(0.0, half_height, ROOM_DEPTH / 2.0),
        ),
        (
            "Left wall",
            wall_material.clone(),
            Vec3::new(WALL_THICKNESS, ROOM_HEIGHT, ROOM_DEPTH),
            Vec3::new(-ROOM_WIDTH / 2.0, half_height, 0.0),
        ),
        (
            "Right wall",
            wall_material,
            Vec3::new(WALL_THICKNESS, ROOM_HEIGHT, ROOM_DEPTH),
            Vec3::new(ROOM_WIDTH / 2.0, half_height, 0.0),
        ),
    ];
    for (name, material, size, translation) in shell {
        spawn_slab(&mut commands, &mut meshes, material, name, size, translation);
    }

    // Ceiling light, toggled by the switch below
    let light = commands
        .spawn((
            Name::new("Ceiling light"),
            PointLight {
                shadows_enabled: false,
                intensity: 2_000_000.0,
                range: 20.0,
                ..default()
            },
            Transform::from_xyz(0.0, ROOM_HEIGHT - 0.5, 0.0),
        ))
        .id();

    // Dim fill so the room is not pitch black with the light off
    commands.insert_resource(AmbientLight {
        color: Color::WHITE,
        brightness: 80.0,
    });

    let switch_color = Color::srgb(0.2, 0.2, 0.25);
    let switch_size = Vec3::new(0.3, 0.4, 0.1);
    commands.spawn((
        Name::new("Light switch"),
        Mesh3d(meshes.add(Cuboid::from_size(switch_size))),
        MeshMaterial3d(materials.add(StandardMaterial {
            base_color: switch_color,
            ..default()
        })),
        Transform::from_xyz(1.5, 1.4, -ROOM_DEPTH / 2.0 + WALL_THICKNESS / 2.0 + 0.05),
        Collider::cuboid(switch_size.x, switch_size.y, switch_size.z),
        Highlight {
            hover_color: Color::srgb(0.9, 0.8, 0.2),
            normal_color: switch_color,
        },
        Interactable::new(LightSwitch { light, on: true }),
    ));

    let plaque_color = Color::srgb(0.7, 0.55, 0.25);
    let plaque_size = Vec3::new(0.05, 0.5, 0.8);
    commands.spawn((
        Name::new("Plaque"),
        Mesh3d(meshes.add(Cuboid::from_size(plaque_size))),
        MeshMaterial3d(materials.add(StandardMaterial {
            base_color: plaque_color,
            ..default()
        })),
        Transform::from_xyz(-ROOM_WIDTH / 2.0 + WALL_THICKNESS / 2.0 + 0.03, 1.6, -1.0),
        Collider::cuboid(plaque_size.x, plaque_size.y, plaque_size.z),
        Highlight {
            hover_color: Color::srgb(1.0, 0.85, 0.45),
            normal_color: plaque_color,
        },
        Interactable::new(Plaque::new("Look around. The body will follow.")),
    ));

    // Blocks rays but has no interaction
    commands.spawn((
        Name::new("Crate"),
        Mesh3d(meshes.add(Cuboid::new(0.8, 0.8, 0.8))),
        MeshMaterial3d(crate_material),
        Transform::from_xyz(2.5, 0.4, 0.5).with_rotation(Quat::from_rotation_y(0.4)),
        Collider::cuboid(0.8, 0.8, 0.8),
    ));

    let globe_color = Color::srgb(0.2, 0.45, 0.7);
    let globe_radius = 0.2;
    commands.spawn((
        Name::new("Globe"),
        Mesh3d(meshes.add(Sphere::new(globe_radius))),
        MeshMaterial3d(materials.add(StandardMaterial {
            base_color: globe_color,
            ..default()
        })),
        Transform::from_xyz(2.5, 0.8 + globe_radius, 0.5),
        Collider::sphere(globe_radius),
        Highlight {
            hover_color: Color::srgb(0.35, 0.7, 1.0),
            normal_color: globe_color,
        },
        Interactable::new(Globe { step_degrees: 45.0 }),
    ));

    // Player body with the camera at eye height
    commands
        .spawn((
            Name::new("Player"),
            Player,
            Velocity::default(),
            Stance::default(),
            Transform::from_xyz(0.0, 0.0, 3.0),
            Visibility::default(),
            Collider::cuboid(0.6, 1.8, 0.6).with_offset(Vec3::Y * 0.9),
        ))
        .with_children(|parent| {
            parent.spawn((
                PlayerCamera,
                Camera3d::default(),
                Transform::from_xyz(0.0, config.movement.stand_eye_height, 0.0),
            ));
        });
}
