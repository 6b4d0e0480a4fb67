//! Sphere Terrain - a player sphere rolling over a static triangle mesh
//!
//! Core modules:
//! - `sim`: Per-frame simulation (sphere/triangle test, terrain resolution, player state)
//! - `settings`: Data-driven spawn and movement tuning

pub mod settings;
pub mod sim;

pub use settings::{Settings, SettingsError};

use glam::Vec3;

/// Simulation constants
///
/// The collision and gravity figures are part of the resting behavior and are
/// kept out of `Settings` on purpose.
pub mod consts {
    use glam::Vec3;

    /// Triangles whose plane is further than this behind the sphere center are skipped
    pub const PLANE_BIAS: f32 = 0.25;
    /// Added to the signed plane distance when pushing the sphere out of a triangle
    pub const PUSH_OUT_MARGIN: f32 = 1.0;
    /// Vertical velocity lost every frame (fixed frame rate assumed)
    pub const GRAVITY_STEP: f32 = 0.01;
    /// Contacts with a steeper normal than this count as floor
    pub const FLOOR_MIN_NORMAL_Y: f32 = 0.5;

    /// Player defaults
    pub const DEFAULT_SPAWN: Vec3 = Vec3::new(0.0, 5.0, 5.0);
    pub const DEFAULT_PLAYER_RADIUS: f32 = 1.0;
    pub const DEFAULT_MOVE_SPEED: f32 = 0.2;
    pub const DEFAULT_JUMP_LIFT: f32 = 0.35;
}

/// Project a direction onto the XZ plane and normalize it (zero if vertical)
#[inline]
pub fn flatten_xz(dir: Vec3) -> Vec3 {
    Vec3::new(dir.x, 0.0, dir.z).normalize_or_zero()
}
