use bevy::{
    prelude::*,
    window::{CursorGrabMode, PrimaryWindow},
};

use super::orientation::{yaw_of, GazeRig};
use crate::actions::LookAction;
use crate::config::CharacterConfig;
use crate::game_state::AppState;
use crate::player::{Player, PlayerCamera};

fn set_cursor_grabbed(window: &mut Window, grabbed: bool) {
    if grabbed {
        window.cursor_options.grab_mode = CursorGrabMode::Confined;
        window.cursor_options.visible = false;
    } else {
        window.cursor_options.grab_mode = CursorGrabMode::None;
        window.cursor_options.visible = true;
    }
}

pub fn grab_cursor(mut windows: Query<&mut Window, With<PrimaryWindow>>) {
    if let Ok(mut window) = windows.get_single_mut() {
        set_cursor_grabbed(&mut window, true);
    }
}

pub fn release_cursor(mut windows: Query<&mut Window, With<PrimaryWindow>>) {
    if let Ok(mut window) = windows.get_single_mut() {
        set_cursor_grabbed(&mut window, false);
    }
}

pub fn toggle_pause(
    keyboard_input: Res<ButtonInput<KeyCode>>,
    state: Res<State<AppState>>,
    mut next_state: ResMut<NextState<AppState>>,
) {
    if !keyboard_input.just_pressed(KeyCode::Escape) {
        return;
    }

    let next = match state.get() {
        AppState::Playing => AppState::Paused,
        AppState::Paused => AppState::Playing,
    };
    info!("Switching to {:?}", next);
    next_state.set(next);
}

/// Gives newly spawned players their camera/body frames, facing the
/// yaw they spawned with.
pub fn attach_gaze_rig(
    mut commands: Commands,
    config: Res<CharacterConfig>,
    query: Query<(Entity, &Transform), (With<Player>, Without<GazeRig>)>,
) {
    for (entity, transform) in query.iter() {
        let initial_yaw = yaw_of(transform.rotation);
        info!("Player {:?} spawned facing yaw {:.1}", entity, initial_yaw);
        commands
            .entity(entity)
            .insert(GazeRig::new(initial_yaw, config.camera.limits()));
    }
}

pub fn apply_look_input(
    mut looks: EventReader<LookAction>,
    mut query: Query<&mut GazeRig, With<Player>>,
) {
    let Ok(mut rig) = query.get_single_mut() else {
        looks.clear();
        return;
    };

    for look in looks.read() {
        rig.apply_look(look.0.x, look.0.y);
    }
}

pub fn follow_body(time: Res<Time>, mut query: Query<&mut GazeRig>) {
    let dt = time.delta_secs();
    for mut rig in query.iter_mut() {
        if rig.advance(dt) {
            debug!(
                "Body following camera: body yaw {:.1}, delta {:.1}",
                rig.body.0,
                rig.delta_yaw()
            );
        }
    }
}

/// Body yaw goes on the player, the rest of the view on its camera child.
pub fn sync_rig_transforms(
    mut players: Query<(&GazeRig, &mut Transform, &Children), (With<Player>, Without<PlayerCamera>)>,
    mut cameras: Query<&mut Transform, (With<PlayerCamera>, Without<Player>)>,
) {
    for (rig, mut body, children) in players.iter_mut() {
        body.rotation = rig.body_rotation();

        for &child in children.iter() {
            if let Ok(mut eye) = cameras.get_mut(child) {
                eye.rotation = rig.view_rotation_local();
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;

    const EPS: f32 = 1.0e-3;

    fn test_app() -> App {
        let mut app = App::new();
        app.init_resource::<CharacterConfig>()
            .init_resource::<Time>()
            .add_event::<LookAction>()
            .add_systems(
                Update,
                (attach_gaze_rig, apply_look_input, follow_body, sync_rig_transforms).chain(),
            );
        app
    }

    fn spawn_player(app: &mut App, yaw: f32) -> (Entity, Entity) {
        let mut camera = Entity::PLACEHOLDER;
        let player = app
            .world_mut()
            .spawn((
                Player,
                Transform::from_rotation(Quat::from_rotation_y(yaw.to_radians())),
            ))
            .with_children(|parent| {
                camera = parent.spawn((PlayerCamera, Transform::default())).id();
            })
            .id();
        (player, camera)
    }

    #[test]
    fn test_rig_captures_spawn_yaw() {
        let mut app = test_app();
        let (player, _) = spawn_player(&mut app, 40.0);
        app.update();

        let rig = app.world().get::<GazeRig>(player).unwrap();
        assert!((rig.initial_yaw - 40.0).abs() < EPS);
        assert!((rig.body.0 - 40.0).abs() < EPS);
        assert!((rig.view.yaw - 40.0).abs() < EPS);
    }

    #[test]
    fn test_look_is_clamped_and_synced() {
        let mut app = test_app();
        let (player, camera) = spawn_player(&mut app, 0.0);
        app.update();

        app.world_mut().send_event(LookAction(Vec2::new(-120.0, 90.0)));
        app.update();

        let rig = *app.world().get::<GazeRig>(player).unwrap();
        assert!((rig.view.yaw - 90.0).abs() < EPS);
        assert!((rig.view.pitch - 60.0).abs() < EPS);
        // No time has passed, so the body has not moved.
        assert!(rig.body.0.abs() < EPS);

        let eye = app.world().get::<Transform>(camera).unwrap();
        assert!((yaw_of(eye.rotation) - 90.0).abs() < EPS);
    }

    #[test]
    fn test_body_follows_over_frames() {
        let mut app = test_app();
        let (player, _) = spawn_player(&mut app, 0.0);
        app.update();

        app.world_mut().send_event(LookAction(Vec2::new(-90.0, 0.0)));
        app.update();

        app.world_mut()
            .resource_mut::<Time>()
            .advance_by(Duration::from_millis(50));
        app.update();

        let rig = *app.world().get::<GazeRig>(player).unwrap();
        assert!(rig.body.0 > 0.0 && rig.body.0 < 90.0);

        let body = app.world().get::<Transform>(player).unwrap();
        assert!((yaw_of(body.rotation) - rig.body.0).abs() < EPS);
    }
}
