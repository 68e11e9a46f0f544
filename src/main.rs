mod actions;
mod camera;
mod config;
mod game_state;
mod player;
mod world;

use bevy::{
    diagnostic::{FrameTimeDiagnosticsPlugin, LogDiagnosticsPlugin},
    prelude::*,
    window::PresentMode,
};

use actions::ActionsPlugin;
use camera::CameraPlugin;
use config::ConfigPlugin;
use game_state::GameStatePlugin;
use player::PlayerPlugin;
use world::WorldPlugin;

fn main() {
    App::new()
        .add_plugins(
            DefaultPlugins.set(WindowPlugin {
                primary_window: Some(Window {
                    title: "WoX".to_string(),
                    present_mode: PresentMode::AutoNoVsync,
                    ..default()
                }),
                ..default()
            }),
        )
        .add_plugins((
            FrameTimeDiagnosticsPlugin::default(),
            LogDiagnosticsPlugin::default(),
        ))
        .add_plugins((ConfigPlugin, GameStatePlugin))
        .add_plugins((ActionsPlugin, PlayerPlugin, CameraPlugin, WorldPlugin))
        .run();
}
