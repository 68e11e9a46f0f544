pub mod systems;

use bevy::prelude::*;

use crate::game_state::{AppState, GameplaySet};
use systems::{read_key_actions, read_look_action};

/// Move axis for this frame. `y` is forward, `x` is right.
#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub struct MoveAction(pub Vec2);

/// Accumulated look input for this frame, already scaled by sensitivity.
/// `y` is up.
#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub struct LookAction(pub Vec2);

#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct JumpAction;

#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct CrouchAction;

#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct InteractAction;

/// Keyboard layout for the character actions.
#[derive(Resource, Debug, Clone, PartialEq)]
pub struct ActionBindings {
    pub forward: KeyCode,
    pub back: KeyCode,
    pub left: KeyCode,
    pub right: KeyCode,
    pub jump: KeyCode,
    pub crouch: KeyCode,
    pub interact: KeyCode,
}

impl Default for ActionBindings {
    fn default() -> Self {
        Self {
            forward: KeyCode::KeyW,
            back: KeyCode::KeyS,
            left: KeyCode::KeyA,
            right: KeyCode::KeyD,
            jump: KeyCode::Space,
            crouch: KeyCode::KeyC,
            interact: KeyCode::KeyE,
        }
    }
}

/// Resolves keyboard and mouse into character actions.
pub struct ActionsPlugin;

impl Plugin for ActionsPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<ActionBindings>()
            .add_event::<MoveAction>()
            .add_event::<LookAction>()
            .add_event::<JumpAction>()
            .add_event::<CrouchAction>()
            .add_event::<InteractAction>()
            .add_systems(
                Update,
                (read_key_actions, read_look_action)
                    .in_set(GameplaySet::Input)
                    .run_if(in_state(AppState::Playing)),
            );
    }
}
