//! Mesh data for voxel rendering.
//!
//! A [`MeshBatch`] holds the triangle geometry of every exposed face that shares a
//! material, laid out as flat position and texture-coordinate arrays ready to be
//! handed to the graphics boundary in a single submission.

use crate::engine_state::rendering::material::MaterialId;

use super::face::{Face, FACE_UVS};

/// Vertices emitted per face (two triangles).
pub const VERTICES_PER_FACE: usize = 6;

/// Triangle geometry for all faces drawn with one material.
#[derive(Debug, Clone)]
pub struct MeshBatch {
    /// The material every face in this batch is drawn with
    pub material: MaterialId,
    /// One `[x, y, z]` entry per vertex
    pub positions: Vec<[f32; 3]>,
    /// One `[u, v]` entry per vertex
    pub uvs: Vec<[f32; 2]>,
}

impl MeshBatch {
    /// Builds the geometry for a list of faces.
    pub fn from_faces(material: MaterialId, faces: &[Face]) -> Self {
        let mut batch = MeshBatch {
            material,
            positions: Vec::with_capacity(faces.len() * VERTICES_PER_FACE),
            uvs: Vec::with_capacity(faces.len() * VERTICES_PER_FACE),
        };
        for face in faces {
            batch.add_face(face);
        }
        batch
    }

    /// Appends the two triangles of `face`.
    pub fn add_face(&mut self, face: &Face) {
        self.positions.extend_from_slice(&face.triangle_vertices());
        self.uvs.extend_from_slice(&FACE_UVS);
    }

    pub fn face_count(&self) -> usize {
        self.positions.len() / VERTICES_PER_FACE
    }

    /// Vertex positions as a flat `x, y, z, x, y, z, ...` slice.
    pub fn flat_positions(&self) -> &[f32] {
        bytemuck::cast_slice(&self.positions)
    }

    /// Texture coordinates as a flat `u, v, u, v, ...` slice.
    pub fn flat_uvs(&self) -> &[f32] {
        bytemuck::cast_slice(&self.uvs)
    }
}
