use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::camera::orientation::GazeLimits;

/// Default location of the character config, relative to the working directory.
pub const DEFAULT_CONFIG_PATH: &str = "config/character.json";

/// Environment variable that overrides [`DEFAULT_CONFIG_PATH`].
pub const CONFIG_PATH_ENV: &str = "WOX_CONFIG";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to parse config {path:?}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Tunables for the first-person character. Every section falls back to
/// its defaults when missing from the file.
#[derive(Resource, Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CharacterConfig {
    pub camera: CameraSettings,
    pub movement: MovementSettings,
    pub interaction: InteractionSettings,
}

/// Angles are in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraSettings {
    pub min_yaw: f32,
    pub max_yaw: f32,
    pub min_pitch: f32,
    pub max_pitch: f32,
    pub body_follow_speed: f32,
    /// Look input units per pixel of mouse motion.
    pub look_sensitivity: f32,
}

impl Default for CameraSettings {
    fn default() -> Self {
        let limits = GazeLimits::default();
        Self {
            min_yaw: limits.min_yaw,
            max_yaw: limits.max_yaw,
            min_pitch: limits.min_pitch,
            max_pitch: limits.max_pitch,
            body_follow_speed: limits.body_follow_speed,
            look_sensitivity: 0.2,
        }
    }
}

impl CameraSettings {
    pub fn limits(&self) -> GazeLimits {
        GazeLimits {
            min_yaw: self.min_yaw,
            max_yaw: self.max_yaw,
            min_pitch: self.min_pitch,
            max_pitch: self.max_pitch,
            body_follow_speed: self.body_follow_speed,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MovementSettings {
    pub walk_speed: f32,
    pub crouch_speed: f32,
    pub jump_velocity: f32,
    pub gravity: f32,
    pub stand_eye_height: f32,
    pub crouch_eye_height: f32,
    /// How fast the eye height blends between stances.
    pub eye_blend_speed: f32,
}

impl Default for MovementSettings {
    fn default() -> Self {
        Self {
            walk_speed: 5.0,
            crouch_speed: 2.5,
            jump_velocity: 8.0,
            gravity: 20.0,
            stand_eye_height: 1.7,
            crouch_eye_height: 1.0,
            eye_blend_speed: 12.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InteractionSettings {
    /// Interaction ray length. Non-positive values fall back to the built-in default.
    pub distance: f32,
    /// Seconds a debug trace stays on screen.
    pub trace_lifetime: f32,
    pub draw_traces: bool,
}

impl Default for InteractionSettings {
    fn default() -> Self {
        Self {
            distance: crate::world::interaction::DEFAULT_INTERACT_DISTANCE,
            trace_lifetime: 1.0,
            draw_traces: true,
        }
    }
}

impl CharacterConfig {
    pub fn from_json(path: &Path, text: &str) -> Result<Self, ConfigError> {
        serde_json::from_str(text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(path, &text)
    }

    /// Loads the config, logging and falling back to defaults on any failure.
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        match Self::load(path) {
            Ok(config) => {
                info!("Loaded character config");
                config
            }
            Err(ConfigError::Io { path, source }) if source.kind() == io::ErrorKind::NotFound => {
                info!("No character config at {:?}, using defaults", path);
                Self::default()
            }
            Err(e) => {
                warn!("{}; using defaults", e);
                Self::default()
            }
        }
    }
}

/// Loads [`CharacterConfig`] into the app. Add after `DefaultPlugins` so
/// the load is logged.
pub struct ConfigPlugin;

impl Plugin for ConfigPlugin {
    fn build(&self, app: &mut App) {
        app.insert_resource(CharacterConfig::load_or_default(config_path()));
    }
}

/// Resolves the config path from [`CONFIG_PATH_ENV`], or the default path.
pub fn config_path() -> PathBuf {
    std::env::var_os(CONFIG_PATH_ENV)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH))
}
