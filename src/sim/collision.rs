//! Sphere vs. triangle narrow phase
//!
//! The test runs in sphere space (triangle translated so the sphere center is
//! the origin) and tries seven separating conditions cheapest-first: the
//! triangle plane, the three vertex regions, then the three edge regions.
//! The first one that proves separation ends the test. Everything after the
//! initial normalize is compared in scaled form, so no divisions happen.
//!
//! Based on <http://realtimecollisiondetection.net/blog/?p=103>.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use super::geometry::{Sphere, Triangle};
use crate::consts::{FLOOR_MIN_NORMAL_Y, PLANE_BIAS, PUSH_OUT_MARGIN};

/// Result of a positive sphere/triangle test (the "collision packet")
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Contact {
    /// Triangle face normal, unit length for non-degenerate triangles
    pub normal: Vec3,
    /// Signed distance along `normal` from the sphere center to the triangle plane.
    /// Negative when the center is on the front side.
    pub distance: f32,
}

impl Contact {
    /// Positional correction for this contact
    ///
    /// Overshoots the plane distance by `PUSH_OUT_MARGIN`, so a unit sphere
    /// lands exactly touching the surface.
    #[inline]
    pub fn push_out(&self) -> Vec3 {
        self.normal * (self.distance + PUSH_OUT_MARGIN)
    }

    /// Floor or ramp (as opposed to a wall or ceiling)
    #[inline]
    pub fn is_floor(&self) -> bool {
        self.normal.y > FLOOR_MIN_NORMAL_Y
    }
}

/// Test a sphere against a triangle
///
/// Returns the contact when they intersect. Triangles whose plane lies more
/// than `PLANE_BIAS` behind the sphere center (seen from the front face) are
/// ignored, which lets the sphere pass through back faces.
pub fn sphere_triangle(tri: &Triangle, sphere: &Sphere) -> Option<Contact> {
    sphere_triangle_points(tri.a, tri.b, tri.c, sphere.center, sphere.radius)
}

/// [`sphere_triangle`] on raw points: triangle `a, b, c`, sphere at `p` with radius `r`
pub fn sphere_triangle_points(a: Vec3, b: Vec3, c: Vec3, p: Vec3, r: f32) -> Option<Contact> {
    // Sphere space
    let a = a - p;
    let b = b - p;
    let c = c - p;

    // Plane
    let rr = r * r;
    let v = (b - a).cross(c - a).normalize();
    let d = a.dot(v);

    if d > PLANE_BIAS {
        return None;
    }

    let e = v.dot(v);
    if d * d > rr * e {
        return None;
    }

    // Vertices
    let aa = a.dot(a);
    let ab = a.dot(b);
    let ac = a.dot(c);
    if vertex_separates(aa, ab, ac, rr) {
        return None;
    }

    let bb = b.dot(b);
    let bc = b.dot(c);
    if vertex_separates(bb, ab, bc, rr) {
        return None;
    }

    let cc = c.dot(c);
    if vertex_separates(cc, ac, bc, rr) {
        return None;
    }

    // Edges
    if edge_separates(a, b - a, ab - aa, c, rr) {
        return None;
    }
    if edge_separates(b, c - b, bc - bb, a, rr) {
        return None;
    }
    if edge_separates(c, a - c, ac - cc, b, rr) {
        return None;
    }

    Some(Contact {
        normal: v,
        distance: d,
    })
}

/// Vertex region check: the vertex is outside the sphere and both neighbours
/// lie further along the vertex direction, so the vertex is the closest feature.
///
/// `vv` is the vertex's squared length; `v1`/`v2` its dot products with the
/// other two vertices.
#[inline]
fn vertex_separates(vv: f32, v1: f32, v2: f32, rr: f32) -> bool {
    vv > rr && v1 > vv && v2 > vv
}

/// Edge region check for the edge starting at `start` with delta `edge`
///
/// `t` is `dot(start, edge)`; `opposite` is the vertex not on the edge. `q` is
/// the closest point on the edge line scaled by the squared edge length `e`.
/// Separated when that point is further than `r` and the opposite vertex is
/// on the far side of it.
#[inline]
fn edge_separates(start: Vec3, edge: Vec3, t: f32, opposite: Vec3, rr: f32) -> bool {
    let e = edge.dot(edge);
    let q = start * e - edge * t;
    let qc = opposite * e - q;
    q.dot(q) > rr * e * e && q.dot(qc) > 0.0
}
