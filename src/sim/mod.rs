//! Deterministic per-frame simulation
//!
//! All collision logic lives here. This module must be pure and deterministic:
//! - Fixed frame step only
//! - Mesh faces visited in storage order
//! - No rendering or platform dependencies

pub mod collision;
pub mod geometry;
pub mod mesh;
pub mod state;
pub mod tick;

pub use collision::{Contact, sphere_triangle, sphere_triangle_points};
pub use geometry::{Sphere, Triangle};
pub use mesh::{MeshError, StaticMesh};
pub use state::{Player, SimState};
pub use tick::{FrameReport, TickInput, apply_gravity, resolve_terrain, step_player, tick};
