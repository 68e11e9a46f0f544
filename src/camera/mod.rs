pub mod orientation;
pub mod systems;

use bevy::prelude::*;

pub use orientation::GazeRig;

use crate::game_state::{AppState, GameplaySet};
use systems::{
    apply_look_input, attach_gaze_rig, follow_body, grab_cursor, release_cursor,
    sync_rig_transforms, toggle_pause,
};

pub struct CameraPlugin;

impl Plugin for CameraPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(OnEnter(AppState::Playing), grab_cursor)
            .add_systems(OnEnter(AppState::Paused), release_cursor)
            .add_systems(Update, toggle_pause)
            .add_systems(Update, attach_gaze_rig.in_set(GameplaySet::Input))
            .add_systems(
                Update,
                apply_look_input
                    .in_set(GameplaySet::Act)
                    .run_if(in_state(AppState::Playing)),
            )
            // The body keeps catching up while paused.
            .add_systems(Update, follow_body.in_set(GameplaySet::Advance))
            .add_systems(Update, sync_rig_transforms.in_set(GameplaySet::Sync));
    }
}
