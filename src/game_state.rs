use bevy::prelude::*;

/// Top-level play state. Escape toggles between the two.
#[derive(States, Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum AppState {
    #[default]
    Playing,
    Paused,
}

/// Frame ordering for gameplay systems in `Update`.
#[derive(SystemSet, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GameplaySet {
    /// Devices resolved into actions.
    Input,
    /// Actions applied to the character.
    Act,
    /// Body follow and other per-frame steps.
    Advance,
    /// Character state written back to transforms.
    Sync,
}

/// Registers [`AppState`] and chains the [`GameplaySet`]s. Needs the
/// states plugin (part of `DefaultPlugins`) to be added first.
pub struct GameStatePlugin;

impl Plugin for GameStatePlugin {
    fn build(&self, app: &mut App) {
        app.init_state::<AppState>().configure_sets(
            Update,
            (
                GameplaySet::Input,
                GameplaySet::Act,
                GameplaySet::Advance,
                GameplaySet::Sync,
            )
                .chain(),
        );
    }
}
