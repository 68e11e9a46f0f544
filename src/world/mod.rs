pub mod components;
pub mod crosshair;
pub mod interaction;
pub mod raycast;
pub mod setup;

use bevy::prelude::*;

use crate::camera::systems::apply_look_input;
use crate::game_state::{AppState, GameplaySet};
use crosshair::setup_crosshair;
use interaction::{
    draw_interaction_traces, handle_interact, highlight_interactables, log_interactions,
    tint_crosshair, update_looking_at, Interacted, InteractionTraces, LookingAt,
};
use setup::setup_world;

// Room dimensions
pub const ROOM_WIDTH: f32 = 10.0;
pub const ROOM_DEPTH: f32 = 10.0;
pub const ROOM_HEIGHT: f32 = 4.0;
pub const WALL_THICKNESS: f32 = 0.2;

// Room bounds for collision (slightly less than actual size to account for walls)
pub const ROOM_HALF_WIDTH: f32 = 4.6;
pub const ROOM_HALF_DEPTH: f32 = 4.6;

pub struct WorldPlugin;

impl Plugin for WorldPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<LookingAt>()
            .init_resource::<InteractionTraces>()
            .add_event::<Interacted>()
            .add_systems(Startup, (setup_world, setup_crosshair))
            .add_systems(
                Update,
                handle_interact
                    .in_set(GameplaySet::Act)
                    .after(apply_look_input)
                    .run_if(in_state(AppState::Playing)),
            )
            .add_systems(
                Update,
                (
                    (update_looking_at, (highlight_interactables, tint_crosshair)).chain(),
                    draw_interaction_traces,
                    log_interactions,
                )
                    .in_set(GameplaySet::Sync),
            );
    }
}
