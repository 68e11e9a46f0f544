use bevy::prelude::*;

use super::components::{is_grounded, Player, PlayerCamera, Stance, Velocity, GROUND_LEVEL};
use crate::actions::{CrouchAction, JumpAction, MoveAction};
use crate::camera::GazeRig;
use crate::config::CharacterConfig;
use crate::world::{ROOM_HALF_DEPTH, ROOM_HALF_WIDTH};

/// World-space direction for a move axis, relative to a view yaw in degrees.
/// Pitch never tilts movement.
pub fn movement_direction(view_yaw: f32, axis: Vec2) -> Vec3 {
    let rotation = Quat::from_rotation_y(view_yaw.to_radians());
    let forward = rotation * Vec3::NEG_Z;
    let right = rotation * Vec3::X;

    (forward * axis.y + right * axis.x).clamp_length_max(1.0)
}

pub fn apply_move_input(
    mut moves: EventReader<MoveAction>,
    config: Res<CharacterConfig>,
    mut query: Query<(&GazeRig, &Stance, &mut Velocity), With<Player>>,
) {
    let axis = moves.read().last().map(|m| m.0).unwrap_or(Vec2::ZERO);

    let Ok((rig, stance, mut velocity)) = query.get_single_mut() else {
        return;
    };

    let speed = if stance.crouching {
        config.movement.crouch_speed
    } else {
        config.movement.walk_speed
    };
    let direction = movement_direction(rig.view.yaw, axis);

    velocity.0.x = direction.x * speed;
    velocity.0.z = direction.z * speed;
}

pub fn handle_jump(
    mut jumps: EventReader<JumpAction>,
    config: Res<CharacterConfig>,
    mut query: Query<(&Transform, &mut Velocity), With<Player>>,
) {
    if jumps.read().count() == 0 {
        return;
    }

    let Ok((transform, mut velocity)) = query.get_single_mut() else {
        return;
    };

    if is_grounded(transform) {
        velocity.0.y = config.movement.jump_velocity;
    } else {
        debug!("Jump ignored while airborne");
    }
}

pub fn toggle_crouch(
    mut crouches: EventReader<CrouchAction>,
    mut query: Query<&mut Stance, With<Player>>,
) {
    let presses = crouches.read().count();
    if presses == 0 {
        return;
    }

    let Ok(mut stance) = query.get_single_mut() else {
        return;
    };

    for _ in 0..presses {
        stance.crouching = !stance.crouching;
    }
    info!(
        "Player is now {}",
        if stance.crouching { "crouching" } else { "standing" }
    );
}

pub fn apply_gravity(
    time: Res<Time>,
    config: Res<CharacterConfig>,
    mut query: Query<(&Transform, &mut Velocity), With<Player>>,
) {
    for (transform, mut velocity) in query.iter_mut() {
        if !is_grounded(transform) {
            velocity.0.y -= config.movement.gravity * time.delta_secs();
        }
    }
}

pub fn apply_velocity(
    time: Res<Time>,
    mut query: Query<(&mut Transform, &mut Velocity), With<Player>>,
) {
    for (mut transform, mut velocity) in query.iter_mut() {
        transform.translation += velocity.0 * time.delta_secs();

        // Ground collision
        if transform.translation.y < GROUND_LEVEL {
            transform.translation.y = GROUND_LEVEL;
            velocity.0.y = 0.0;
        }

        // Keep the player inside the room
        transform.translation.x = transform.translation.x.clamp(-ROOM_HALF_WIDTH, ROOM_HALF_WIDTH);
        transform.translation.z = transform.translation.z.clamp(-ROOM_HALF_DEPTH, ROOM_HALF_DEPTH);
    }
}

/// Blends the camera's height toward the eye height of the current stance.
pub fn update_eye_height(
    time: Res<Time>,
    config: Res<CharacterConfig>,
    players: Query<(&Stance, &Children), With<Player>>,
    mut cameras: Query<&mut Transform, With<PlayerCamera>>,
) {
    let movement = &config.movement;
    let blend = (time.delta_secs() * movement.eye_blend_speed).min(1.0);

    for (stance, children) in players.iter() {
        let target = if stance.crouching {
            movement.crouch_eye_height
        } else {
            movement.stand_eye_height
        };

        for &child in children.iter() {
            if let Ok(mut eye) = cameras.get_mut(child) {
                eye.translation.y += (target - eye.translation.y) * blend;
            }
        }
    }
}
