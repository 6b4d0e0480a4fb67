//! Player tuning and spawn settings
//!
//! Loaded from a JSON document. Collision and gravity constants live in
//! `consts` and are not part of this file.

use std::path::Path;

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Errors from loading or validating settings
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SettingsError {
    #[error("IO error: {0}")]
    Io(String),
    #[error("Parse error: {0}")]
    Parse(String),
    #[error("Serialization error: {0}")]
    Serialize(String),
    #[error("Invalid setting `{field}`: {reason}")]
    Invalid {
        field: &'static str,
        reason: &'static str,
    },
}

/// Player settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Start and respawn position
    pub spawn: Vec3,
    /// Collision sphere radius (also the rendered sphere radius)
    pub player_radius: f32,
    /// Distance walked per frame along each input axis
    pub move_speed: f32,
    /// Upward nudge per frame while jump is held
    pub jump_lift: f32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            spawn: DEFAULT_SPAWN,
            player_radius: DEFAULT_PLAYER_RADIUS,
            move_speed: DEFAULT_MOVE_SPEED,
            jump_lift: DEFAULT_JUMP_LIFT,
        }
    }
}

impl Settings {
    /// Parse and validate a JSON settings document; missing fields take defaults
    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        let settings: Self =
            serde_json::from_str(json).map_err(|e| SettingsError::Parse(e.to_string()))?;
        settings.validate()?;
        Ok(settings)
    }

    /// Load settings from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|e| SettingsError::Io(e.to_string()))?;
        let settings = Self::from_json(&json)?;
        log::info!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    pub fn to_json(&self) -> Result<String, SettingsError> {
        serde_json::to_string_pretty(self).map_err(|e| SettingsError::Serialize(e.to_string()))
    }

    pub fn validate(&self) -> Result<(), SettingsError> {
        if !self.spawn.is_finite() {
            return Err(SettingsError::Invalid {
                field: "spawn",
                reason: "must be finite",
            });
        }
        if !(self.player_radius.is_finite() && self.player_radius > 0.0) {
            return Err(SettingsError::Invalid {
                field: "player_radius",
                reason: "must be positive and finite",
            });
        }
        if !self.move_speed.is_finite() {
            return Err(SettingsError::Invalid {
                field: "move_speed",
                reason: "must be finite",
            });
        }
        if !self.jump_lift.is_finite() {
            return Err(SettingsError::Invalid {
                field: "jump_lift",
                reason: "must be finite",
            });
        }
        Ok(())
    }
}
