//! Sphere Terrain headless demo
//!
//! Runs the per-frame loop against a terrain mesh with a scripted input
//! sequence and logs where the player ends up. Set `RUST_LOG=debug` for a
//! line per frame, `trace` for every contact.
//!
//! Usage: `sphere-terrain [settings.json] [mesh.json]`

use std::process::ExitCode;

use glam::Vec3;

use sphere_terrain::Settings;
use sphere_terrain::sim::{SimState, StaticMesh, TickInput, tick};

/// Frames to simulate
const DEMO_FRAMES: u64 = 300;

fn main() -> ExitCode {
    env_logger::init();
    log::info!("Sphere Terrain (headless) starting...");

    let mut args = std::env::args().skip(1);

    let settings = match args.next() {
        Some(path) => match Settings::load(&path) {
            Ok(settings) => settings,
            Err(e) => {
                log::error!("Failed to load settings {path}: {e}");
                return ExitCode::FAILURE;
            }
        },
        None => {
            log::info!("Using default settings");
            Settings::default()
        }
    };

    let mesh = match args.next() {
        Some(path) => match StaticMesh::load(&path) {
            Ok(mesh) => mesh,
            Err(e) => {
                log::error!("Failed to load mesh {path}: {e}");
                return ExitCode::FAILURE;
            }
        },
        None => playground(),
    };
    if mesh.is_empty() {
        log::warn!("Terrain has no faces; the player will fall forever");
    } else {
        log::info!("Terrain: {} faces", mesh.face_count());
    }

    let mut state = SimState::new(&settings);
    let mut grounded_frames = 0;

    for frame in 0..DEMO_FRAMES {
        let input = scripted_input(frame);
        let report = tick(&mut state, &mesh, &input, &settings);
        if report.grounded {
            grounded_frames += 1;
        }

        if frame % 30 == 0 {
            log::info!(
                "frame {frame:3}: pos ({:7.3}, {:7.3}, {:7.3}) vel {:6.3} grounded {}",
                state.player.position.x,
                state.player.position.y,
                state.player.position.z,
                state.player.velocity,
                report.grounded
            );
        }
    }

    if !state.player.position.is_finite() {
        log::warn!("Player position is no longer finite (degenerate terrain faces?)");
    }

    log::info!(
        "Done: {} frames, grounded on {}, final position {:?}",
        state.frame,
        grounded_frames,
        state.player.position
    );
    ExitCode::SUCCESS
}

/// Walk toward the ramp, hop, wander into the wall, then respawn
fn scripted_input(frame: u64) -> TickInput {
    let mut input = TickInput {
        forward: Vec3::NEG_Z,
        right: Vec3::X,
        ..Default::default()
    };

    match frame {
        0..60 => {}
        60..150 => input.throttle = 1.0,
        150..160 => {
            input.throttle = 1.0;
            input.jump = true;
        }
        160..240 => input.strafe = 1.0,
        240 => input.respawn = true,
        _ => {}
    }
    input
}

/// Floor, a ramp climbing toward -Z, and a wall on the +X side
fn playground() -> StaticMesh {
    let mut mesh = StaticMesh::empty();

    // Floor
    mesh.push_quad(
        Vec3::new(-20.0, 0.0, 20.0),
        Vec3::new(20.0, 0.0, 20.0),
        Vec3::new(20.0, 0.0, -20.0),
        Vec3::new(-20.0, 0.0, -20.0),
    );

    // Ramp
    mesh.push_quad(
        Vec3::new(-4.0, 0.0, -4.0),
        Vec3::new(4.0, 0.0, -4.0),
        Vec3::new(4.0, 4.0, -14.0),
        Vec3::new(-4.0, 4.0, -14.0),
    );

    // Wall facing -X
    mesh.push_quad(
        Vec3::new(10.0, 0.0, -20.0),
        Vec3::new(10.0, 0.0, 20.0),
        Vec3::new(10.0, 6.0, 20.0),
        Vec3::new(10.0, 6.0, -20.0),
    );

    mesh
}
