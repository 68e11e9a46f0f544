use bevy::prelude::*;

/// Marker for the player's body entity.
#[derive(Component)]
pub struct Player;

/// Marker for the first-person camera, a child of the [`Player`].
#[derive(Component)]
pub struct PlayerCamera;

/// Velocity component for kinematic movement.
#[derive(Component, Debug, Default)]
pub struct Velocity(pub Vec3);

/// Standing or crouched.
#[derive(Component, Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Stance {
    pub crouching: bool,
}

/// Feet rest on this plane.
pub const GROUND_LEVEL: f32 = 0.0;

/// Slack for treating the player as grounded.
pub const GROUND_TOLERANCE: f32 = 0.01;

pub fn is_grounded(transform: &Transform) -> bool {
    transform.translation.y <= GROUND_LEVEL + GROUND_TOLERANCE
}
