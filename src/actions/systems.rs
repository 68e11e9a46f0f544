use bevy::{input::mouse::MouseMotion, prelude::*};

use super::{ActionBindings, CrouchAction, InteractAction, JumpAction, LookAction, MoveAction};
use crate::config::CharacterConfig;

/// Combines the held movement keys into one axis, normalizing diagonals.
pub fn move_axis(keys: &ButtonInput<KeyCode>, bindings: &ActionBindings) -> Vec2 {
    let mut axis = Vec2::ZERO;

    if keys.pressed(bindings.forward) {
        axis.y += 1.0;
    }
    if keys.pressed(bindings.back) {
        axis.y -= 1.0;
    }
    if keys.pressed(bindings.right) {
        axis.x += 1.0;
    }
    if keys.pressed(bindings.left) {
        axis.x -= 1.0;
    }

    axis.normalize_or_zero()
}

/// Turns raw mouse motion into look units. Screen y grows downward, so it
/// is flipped to make moving the mouse up look up.
pub fn look_from_mouse(delta: Vec2, sensitivity: f32) -> Vec2 {
    Vec2::new(delta.x, -delta.y) * sensitivity
}

pub fn read_key_actions(
    keys: Res<ButtonInput<KeyCode>>,
    bindings: Res<ActionBindings>,
    mut moves: EventWriter<MoveAction>,
    mut jumps: EventWriter<JumpAction>,
    mut crouches: EventWriter<CrouchAction>,
    mut interacts: EventWriter<InteractAction>,
) {
    let axis = move_axis(&keys, &bindings);
    if axis != Vec2::ZERO {
        moves.send(MoveAction(axis));
    }

    if keys.just_pressed(bindings.jump) {
        jumps.send(JumpAction);
    }
    if keys.just_pressed(bindings.crouch) {
        crouches.send(CrouchAction);
    }
    if keys.just_pressed(bindings.interact) {
        interacts.send(InteractAction);
    }
}

pub fn read_look_action(
    mut mouse_motion: EventReader<MouseMotion>,
    config: Res<CharacterConfig>,
    mut looks: EventWriter<LookAction>,
) {
    let delta: Vec2 = mouse_motion.read().map(|event| event.delta).sum();
    if delta != Vec2::ZERO {
        looks.send(LookAction(look_from_mouse(
            delta,
            config.camera.look_sensitivity,
        )));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_move_axis_from_held_keys() {
        let bindings = ActionBindings::default();
        let mut keys = ButtonInput::<KeyCode>::default();
        assert_eq!(move_axis(&keys, &bindings), Vec2::ZERO);

        keys.press(KeyCode::KeyW);
        assert_eq!(move_axis(&keys, &bindings), Vec2::Y);

        keys.press(KeyCode::KeyD);
        let axis = move_axis(&keys, &bindings);
        assert!((axis.length() - 1.0).abs() < 1.0e-5);
        assert!(axis.x > 0.0 && axis.y > 0.0);

        keys.press(KeyCode::KeyS);
        keys.press(KeyCode::KeyA);
        assert_eq!(move_axis(&keys, &bindings), Vec2::ZERO);
    }

    #[test]
    fn test_look_flips_screen_y() {
        let look = look_from_mouse(Vec2::new(10.0, -5.0), 0.5);
        assert_eq!(look, Vec2::new(5.0, 2.5));
    }

    #[test]
    fn test_key_presses_become_actions() {
        let mut app = App::new();
        app.init_resource::<ButtonInput<KeyCode>>()
            .init_resource::<ActionBindings>()
            .add_event::<MoveAction>()
            .add_event::<JumpAction>()
            .add_event::<CrouchAction>()
            .add_event::<InteractAction>()
            .add_systems(Update, read_key_actions);

        {
            let mut keys = app.world_mut().resource_mut::<ButtonInput<KeyCode>>();
            keys.press(KeyCode::KeyW);
            keys.press(KeyCode::KeyE);
        }
        app.update();

        let moves = app.world().resource::<Events<MoveAction>>();
        let moved: Vec<_> = moves.get_cursor().read(moves).copied().collect();
        assert_eq!(moved, vec![MoveAction(Vec2::Y)]);

        let interacts = app.world().resource::<Events<InteractAction>>();
        assert_eq!(interacts.len(), 1);
        assert!(app.world().resource::<Events<JumpAction>>().is_empty());
    }
}
