//! Collision primitives: world-space triangles and the player's sphere
//!
//! Triangles carry no stored normal. It is derived from the winding every
//! time it is needed, so a triangle is just its three corners.

use glam::Vec3;
use serde::{Deserialize, Serialize};

/// A triangle in world space
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Triangle {
    pub a: Vec3,
    pub b: Vec3,
    pub c: Vec3,
}

impl Triangle {
    pub fn new(a: Vec3, b: Vec3, c: Vec3) -> Self {
        Self { a, b, c }
    }

    /// Unit face normal from the winding `(b - a) x (c - a)`
    ///
    /// Zero-area triangles produce a non-finite normal.
    #[inline]
    pub fn face_normal(&self) -> Vec3 {
        (self.b - self.a).cross(self.c - self.a).normalize()
    }
}

/// Vertex-order helpers for tests
#[cfg(test)]
impl Triangle {
    /// Same triangle moved by `offset`
    #[inline]
    pub(crate) fn translated(&self, offset: Vec3) -> Self {
        Self {
            a: self.a + offset,
            b: self.b + offset,
            c: self.c + offset,
        }
    }

    /// Rotate the vertex order (A, B, C) -> (B, C, A), keeping the winding
    #[inline]
    pub(crate) fn cycled(&self) -> Self {
        Self {
            a: self.b,
            b: self.c,
            c: self.a,
        }
    }

    /// Reverse the winding, flipping the face normal
    #[inline]
    pub(crate) fn flipped(&self) -> Self {
        Self {
            a: self.a,
            b: self.c,
            c: self.b,
        }
    }
}

/// The player's collision volume
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Sphere {
    pub center: Vec3,
    pub radius: f32,
}

impl Sphere {
    pub fn new(center: Vec3, radius: f32) -> Self {
        Self { center, radius }
    }
}
