//! Static triangle mesh used as collision terrain
//!
//! Flat vertex buffer plus an index buffer read in triples. Face order is the
//! storage order and the resolution loop depends on it, so nothing here
//! reorders or deduplicates faces.

use std::path::Path;

use glam::Vec3;
use serde::{Deserialize, Serialize};

use super::geometry::Triangle;

/// Errors from building or loading a mesh
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum MeshError {
    #[error("Index buffer length {0} is not a multiple of 3")]
    RaggedIndices(usize),
    #[error("Face {face} references vertex {index}, but the mesh has {vertex_count} vertices")]
    IndexOutOfRange {
        face: usize,
        index: u32,
        vertex_count: usize,
    },
    #[error("IO error: {0}")]
    Io(String),
    #[error("Parse error: {0}")]
    Parse(String),
}

/// Mesh document as it comes off the wire, before index checks
#[derive(Debug, Clone, Deserialize)]
struct RawMesh {
    vertices: Vec<Vec3>,
    indices: Vec<u32>,
}

/// Immutable collision mesh
///
/// Every index addresses a vertex and the index buffer holds whole faces;
/// deserialization goes through the same checks as `new`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawMesh")]
pub struct StaticMesh {
    vertices: Vec<Vec3>,
    indices: Vec<u32>,
}

impl TryFrom<RawMesh> for StaticMesh {
    type Error = MeshError;

    fn try_from(raw: RawMesh) -> Result<Self, Self::Error> {
        Self::new(raw.vertices, raw.indices)
    }
}

impl StaticMesh {
    /// Build a mesh from its buffers, checking every index
    ///
    /// Degenerate (zero-area) faces are accepted as-is.
    pub fn new(vertices: Vec<Vec3>, indices: Vec<u32>) -> Result<Self, MeshError> {
        let mesh = Self { vertices, indices };
        mesh.validate()?;
        Ok(mesh)
    }

    /// Mesh with no faces
    pub fn empty() -> Self {
        Self::default()
    }

    /// Parse a JSON mesh document (`{"vertices": [[x,y,z], ...], "indices": [...]}`)
    pub fn from_json(json: &str) -> Result<Self, MeshError> {
        let raw: RawMesh =
            serde_json::from_str(json).map_err(|e| MeshError::Parse(e.to_string()))?;
        Self::try_from(raw)
    }

    /// Load a JSON mesh document from disk
    pub fn load(path: impl AsRef<Path>) -> Result<Self, MeshError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|e| MeshError::Io(e.to_string()))?;
        let mesh = Self::from_json(&json)?;
        log::info!(
            "Loaded mesh {}: {} vertices, {} faces",
            path.display(),
            mesh.vertices.len(),
            mesh.face_count()
        );
        Ok(mesh)
    }

    fn validate(&self) -> Result<(), MeshError> {
        if self.indices.len() % 3 != 0 {
            return Err(MeshError::RaggedIndices(self.indices.len()));
        }
        let vertex_count = self.vertices.len();
        for (i, &index) in self.indices.iter().enumerate() {
            if index as usize >= vertex_count {
                return Err(MeshError::IndexOutOfRange {
                    face: i / 3,
                    index,
                    vertex_count,
                });
            }
        }
        Ok(())
    }

    /// Number of triangles
    #[inline]
    pub fn face_count(&self) -> usize {
        self.indices.len() / 3
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    /// All triangles in storage order
    pub fn triangles(&self) -> impl Iterator<Item = Triangle> + '_ {
        self.indices.chunks_exact(3).map(|face| {
            Triangle::new(
                self.vertices[face[0] as usize],
                self.vertices[face[1] as usize],
                self.vertices[face[2] as usize],
            )
        })
    }

    /// Append a triangle (front face follows the `a, b, c` winding)
    pub fn push_triangle(&mut self, a: Vec3, b: Vec3, c: Vec3) {
        let base = self.vertices.len() as u32;
        self.vertices.extend([a, b, c]);
        self.indices.extend([base, base + 1, base + 2]);
    }

    /// Append a quad `a, b, c, d` as the two faces `a, b, c` and `a, c, d`
    pub fn push_quad(&mut self, a: Vec3, b: Vec3, c: Vec3, d: Vec3) {
        let base = self.vertices.len() as u32;
        self.vertices.extend([a, b, c, d]);
        self.indices
            .extend([base, base + 1, base + 2, base, base + 2, base + 3]);
    }
}
