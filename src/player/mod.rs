pub mod components;
pub mod systems;

use bevy::prelude::*;

pub use components::{Player, PlayerCamera, Stance, Velocity};

use crate::game_state::{AppState, GameplaySet};
use systems::{
    apply_gravity, apply_move_input, apply_velocity, handle_jump, toggle_crouch, update_eye_height,
};

pub struct PlayerPlugin;

impl Plugin for PlayerPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(
            Update,
            (apply_move_input, handle_jump, toggle_crouch)
                .in_set(GameplaySet::Act)
                .run_if(in_state(AppState::Playing)),
        )
        .add_systems(
            Update,
            (apply_gravity, apply_velocity)
                .chain()
                .in_set(GameplaySet::Advance)
                .run_if(in_state(AppState::Playing)),
        )
        .add_systems(Update, update_eye_height.in_set(GameplaySet::Sync));
    }
}
