//! Fixed-rate frame step
//!
//! One call per rendered frame. The step sizes assume a fixed frame rate; no
//! delta time is involved.

use glam::Vec3;

use super::collision::sphere_triangle;
use super::mesh::StaticMesh;
use super::state::{Player, SimState};
use crate::consts::GRAVITY_STEP;
use crate::flatten_xz;
use crate::settings::Settings;

/// Input commands for a single frame
///
/// Movement axes come from the camera already resolved; only their XZ
/// direction is used.
#[derive(Debug, Clone, Copy, Default)]
pub struct TickInput {
    /// Walk direction for positive `throttle`
    pub forward: Vec3,
    /// Walk direction for positive `strafe`
    pub right: Vec3,
    /// Forward/back axis in [-1, 1]
    pub throttle: f32,
    /// Right/left axis in [-1, 1]
    pub strafe: f32,
    /// Jump held this frame
    pub jump: bool,
    /// Return to the spawn point
    pub respawn: bool,
}

/// What happened to the player during terrain resolution
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameReport {
    /// Triangles that reported an intersection
    pub contacts: u32,
    /// A floor-like contact zeroed the vertical velocity
    pub grounded: bool,
}

/// Semi-implicit gravity: move by the current velocity, then slow it down
#[inline]
pub fn apply_gravity(player: &mut Player) {
    player.position.y += player.velocity;
    player.velocity -= GRAVITY_STEP;
}

/// Push the player out of every intersecting terrain triangle
///
/// Triangles are visited in mesh order and each test uses the position as
/// already corrected by earlier triangles this frame, so pushes compound.
/// Any floor-like contact zeroes the vertical velocity.
pub fn resolve_terrain(player: &mut Player, mesh: &StaticMesh) -> FrameReport {
    let mut report = FrameReport::default();

    for (face, tri) in mesh.triangles().enumerate() {
        let Some(contact) = sphere_triangle(&tri, &player.sphere()) else {
            continue;
        };

        report.contacts += 1;
        if contact.is_floor() {
            player.velocity = 0.0;
            report.grounded = true;
        }
        player.position += contact.push_out();

        log::trace!(
            "face {face}: normal {:?} distance {:.4} -> {:?}",
            contact.normal,
            contact.distance,
            player.position
        );
    }

    report
}

/// Gravity followed by terrain resolution
pub fn step_player(player: &mut Player, mesh: &StaticMesh) -> FrameReport {
    apply_gravity(player);
    resolve_terrain(player, mesh)
}

/// Advance the simulation by one frame
pub fn tick(
    state: &mut SimState,
    mesh: &StaticMesh,
    input: &TickInput,
    settings: &Settings,
) -> FrameReport {
    if input.respawn {
        state.respawn();
    }

    let player = &mut state.player;

    // Walk
    let throttle = input.throttle.clamp(-1.0, 1.0);
    let strafe = input.strafe.clamp(-1.0, 1.0);
    player.position += flatten_xz(input.forward) * throttle * settings.move_speed;
    player.position += flatten_xz(input.right) * strafe * settings.move_speed;

    if input.jump {
        player.position.y += settings.jump_lift;
    }

    let report = step_player(player, mesh);

    log::debug!(
        "frame {}: pos {:?} vel {:.3} contacts {} grounded {}",
        state.frame,
        player.position,
        player.velocity,
        report.contacts,
        report.grounded
    );

    state.frame += 1;
    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::*;

    /// Large floor at y = 0 facing +Y, sized so the normal comes out exact
    fn floor_mesh() -> StaticMesh {
        let mut mesh = StaticMesh::empty();
        mesh.push_triangle(
            Vec3::new(-64.0, 0.0, 64.0),
            Vec3::new(64.0, 0.0, 64.0),
            Vec3::new(0.0, 0.0, -64.0),
        );
        mesh
    }

    #[test]
    fn test_apply_gravity() {
        let mut player = Player::new(Vec3::new(0.0, 5.0, 0.0), 1.0);
        player.velocity = 0.1;
        apply_gravity(&mut player);
        assert!((player.position.y - 5.1).abs() < 1e-6);
        assert!((player.velocity - (0.1 - GRAVITY_STEP)).abs() < 1e-6);
    }

    #[test]
    fn test_drop_onto_floor_lands_at_radius() {
        let mesh = floor_mesh();
        let mut player = Player::new(Vec3::new(0.0, 0.5, 0.0), 1.0);

        let report = step_player(&mut player, &mesh);

        assert!((player.position.y - 1.0).abs() < 1e-6);
        assert_eq!(player.position.x, 0.0);
        assert_eq!(player.position.z, 0.0);
        assert_eq!(player.velocity, 0.0);
        assert_eq!(
            report,
            FrameReport {
                contacts: 1,
                grounded: true
            }
        );
    }

    #[test]
    fn test_resting_is_stable() {
        let mesh = floor_mesh();
        let mut player = Player::new(Vec3::new(2.0, 1.0, -3.0), 1.0);

        for _ in 0..10 {
            let before = player;
            let report = step_player(&mut player, &mesh);
            assert!(report.grounded);
            assert!((player.position - before.position).length() < 1e-6);
            assert_eq!(player.velocity, 0.0);
        }
    }

    #[test]
    fn test_clear_of_terrain_only_gravity() {
        let mesh = floor_mesh();
        let mut player = Player::new(Vec3::new(0.0, 10.0, 0.0), 1.0);
        player.velocity = -0.2;

        let report = step_player(&mut player, &mesh);

        assert_eq!(report, FrameReport::default());
        assert!((player.position.y - 9.8).abs() < 1e-6);
        assert!((player.velocity - (-0.2 - GRAVITY_STEP)).abs() < 1e-6);
    }

    #[test]
    fn test_empty_mesh_only_gravity() {
        let mesh = StaticMesh::empty();
        let mut player = Player::new(Vec3::new(0.0, 0.5, 0.0), 1.0);
        let report = step_player(&mut player, &mesh);
        assert_eq!(report.contacts, 0);
        assert_eq!(player.position, Vec3::new(0.0, 0.5, 0.0));
        assert_eq!(player.velocity, -GRAVITY_STEP);
    }

    #[test]
    fn test_falls_and_settles() {
        let mesh = floor_mesh();
        let mut player = Player::new(Vec3::new(0.0, 3.0, 0.0), 1.0);

        let mut landed = false;
        for _ in 0..100 {
            landed |= step_player(&mut player, &mesh).grounded;
        }

        assert!(landed);
        assert_eq!(player.velocity, 0.0);
        assert!((player.position.y - 1.0).abs() < 1e-5);
    }

    #[test]
    fn test_corrections_compound_across_triangles() {
        // The same floor twice: the second face sees the already corrected
        // position and adds nothing.
        let mut mesh = floor_mesh();
        mesh.push_triangle(
            Vec3::new(-64.0, 0.0, 64.0),
            Vec3::new(64.0, 0.0, 64.0),
            Vec3::new(0.0, 0.0, -64.0),
        );
        let mut player = Player::new(Vec3::new(0.0, 0.25, 0.0), 0.5);

        let report = resolve_terrain(&mut player, &mesh);

        assert_eq!(report.contacts, 1);
        assert!((player.position.y - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_wall_pushes_without_grounding() {
        let mut mesh = StaticMesh::empty();
        // Wall facing +Z
        mesh.push_triangle(
            Vec3::new(-8.0, 0.0, 0.0),
            Vec3::new(8.0, 0.0, 0.0),
            Vec3::new(0.0, 8.0, 0.0),
        );
        let mut player = Player::new(Vec3::new(0.0, 2.0, 0.5), 1.0);
        player.velocity = -0.3;

        let report = resolve_terrain(&mut player, &mesh);

        assert_eq!(
            report,
            FrameReport {
                contacts: 1,
                grounded: false
            }
        );
        assert_eq!(player.velocity, -0.3);
        assert!((player.position - Vec3::new(0.0, 2.0, 1.0)).length() < 1e-6);
    }

    #[test]
    fn test_floor_after_wall_grounds() {
        let mut mesh = StaticMesh::empty();
        mesh.push_triangle(
            Vec3::new(-8.0, 0.0, 0.0),
            Vec3::new(8.0, 0.0, 0.0),
            Vec3::new(0.0, 8.0, 0.0),
        );
        mesh.push_triangle(
            Vec3::new(-64.0, 0.0, 64.0),
            Vec3::new(64.0, 0.0, 64.0),
            Vec3::new(0.0, 0.0, -64.0),
        );
        let mut player = Player::new(Vec3::new(0.0, 0.5, 0.5), 1.0);
        player.velocity = -0.3;

        let report = resolve_terrain(&mut player, &mesh);

        assert_eq!(report.contacts, 2);
        assert!(report.grounded);
        assert_eq!(player.velocity, 0.0);
        assert!((player.position - Vec3::new(0.0, 1.0, 1.0)).length() < 1e-6);
    }

    #[test]
    fn test_back_face_is_passed_through() {
        // Floor facing down; the player sits just above it
        let mut mesh = StaticMesh::empty();
        mesh.push_triangle(
            Vec3::new(-64.0, 0.0, 64.0),
            Vec3::new(0.0, 0.0, -64.0),
            Vec3::new(64.0, 0.0, 64.0),
        );
        let mut player = Player::new(Vec3::new(0.0, 0.5, 0.0), 1.0);
        let report = resolve_terrain(&mut player, &mesh);
        assert_eq!(report.contacts, 0);
        assert_eq!(player.position, Vec3::new(0.0, 0.5, 0.0));
    }

    #[test]
    fn test_tick_walks_on_flattened_axes() {
        let mesh = floor_mesh();
        let settings = Settings {
            spawn: Vec3::new(0.0, 1.0, 0.0),
            ..Default::default()
        };
        let mut state = SimState::new(&settings);

        let input = TickInput {
            forward: Vec3::new(0.0, -5.0, -3.0),
            right: Vec3::new(2.0, 1.0, 0.0),
            throttle: 1.0,
            strafe: -1.0,
            ..Default::default()
        };
        let report = tick(&mut state, &mesh, &input, &settings);

        assert!(report.grounded);
        let expected = Vec3::new(-DEFAULT_MOVE_SPEED, 1.0, -DEFAULT_MOVE_SPEED);
        assert!((state.player.position - expected).length() < 1e-5);
        assert_eq!(state.frame, 1);
    }

    #[test]
    fn test_tick_jump_lifts_off() {
        let mesh = floor_mesh();
        let settings = Settings {
            spawn: Vec3::new(0.0, 1.0, 0.0),
            ..Default::default()
        };
        let mut state = SimState::new(&settings);

        let jump = TickInput {
            jump: true,
            ..Default::default()
        };
        let report = tick(&mut state, &mesh, &jump, &settings);

        assert!(!report.grounded);
        assert!((state.player.position.y - (1.0 + DEFAULT_JUMP_LIFT)).abs() < 1e-6);
        assert!((state.player.velocity + GRAVITY_STEP).abs() < 1e-6);
    }

    #[test]
    fn test_tick_respawn() {
        let mesh = StaticMesh::empty();
        let settings = Settings::default();
        let mut state = SimState::new(&settings);
        state.player.position = Vec3::new(40.0, -100.0, 3.0);
        state.player.velocity = -2.0;

        let input = TickInput {
            respawn: true,
            ..Default::default()
        };
        tick(&mut state, &mesh, &input, &settings);

        // Respawn happens before gravity
        assert_eq!(state.player.position, settings.spawn);
        assert_eq!(state.player.velocity, -GRAVITY_STEP);
    }

    #[test]
    fn test_determinism() {
        let mut mesh = floor_mesh();
        mesh.push_quad(
            Vec3::new(-4.0, 0.0, -4.0),
            Vec3::new(4.0, 0.0, -4.0),
            Vec3::new(4.0, 3.0, -10.0),
            Vec3::new(-4.0, 3.0, -10.0),
        );
        let settings = Settings::default();
        let mut s1 = SimState::new(&settings);
        let mut s2 = SimState::new(&settings);

        let input = TickInput {
            forward: Vec3::NEG_Z,
            throttle: 1.0,
            ..Default::default()
        };
        for _ in 0..200 {
            let r1 = tick(&mut s1, &mesh, &input, &settings);
            let r2 = tick(&mut s2, &mesh, &input, &settings);
            assert_eq!(r1, r2);
        }
        assert_eq!(s1.player, s2.player);
    }
}
