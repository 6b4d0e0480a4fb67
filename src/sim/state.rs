//! Player and simulation state
//!
//! Everything that changes between frames lives in `SimState`. The terrain
//! mesh is passed alongside it by reference and never mutated.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use super::geometry::Sphere;
use crate::settings::Settings;

/// The player's collision body
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Player {
    /// Sphere center, also where the player is drawn
    pub position: Vec3,
    /// Vertical velocity in units per frame (positive is up)
    pub velocity: f32,
    /// Collision radius
    pub radius: f32,
}

impl Player {
    pub fn new(position: Vec3, radius: f32) -> Self {
        Self {
            position,
            velocity: 0.0,
            radius,
        }
    }

    /// Collision sphere at the current position
    #[inline]
    pub fn sphere(&self) -> Sphere {
        Sphere::new(self.position, self.radius)
    }
}

/// Simulation context threaded through every frame
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimState {
    pub player: Player,
    /// Where the player starts and respawns
    pub spawn: Vec3,
    /// Frames simulated so far
    pub frame: u64,
}

impl SimState {
    pub fn new(settings: &Settings) -> Self {
        Self {
            player: Player::new(settings.spawn, settings.player_radius),
            spawn: settings.spawn,
            frame: 0,
        }
    }

    /// Put the player back at the spawn point with no vertical velocity
    pub fn respawn(&mut self) {
        log::debug!("Respawn at {:?} (frame {})", self.spawn, self.frame);
        self.player.position = self.spawn;
        self.player.velocity = 0.0;
    }
}
