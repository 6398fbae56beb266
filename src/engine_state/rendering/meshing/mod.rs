//! # Face Culling
//!
//! Turns the block grid into renderable geometry. Only faces that can be seen are
//! kept: a face is exposed when the cell across it is air or lies outside the
//! world. Blocks buried on all six sides contribute nothing, which keeps the output
//! proportional to the terrain surface rather than its volume.
//!
//! The exposed faces are grouped by material so the renderer issues one submission
//! per material.

use cgmath::Point3;

use crate::engine_state::voxels::{block::block_side::BlockSide, block_grid::BlockGrid};

use super::material::MaterialId;
use mesh::face::Face;

pub mod mesh;
pub mod renderer;

/// All exposed faces that share a material.
#[derive(Debug, Clone)]
pub struct MaterialBatch {
    pub material: MaterialId,
    pub faces: Vec<Face>,
}

/// Determines which faces of the block at `position` are exposed.
///
/// # Returns
/// An array of 6 booleans indexed by `BlockSide`, `true` where the neighbor
/// across that face is air or out of bounds.
pub fn exposed_sides(grid: &BlockGrid, position: Point3<i32>) -> [bool; 6] {
    let mut exposed = [false; 6];
    for side in BlockSide::all() {
        exposed[side as usize] = !grid.is_solid(position + side.normal());
    }
    exposed
}

/// The exposed faces of the block at `position`, in `BlockSide` order.
///
/// Air and out-of-bounds cells yield no faces.
pub fn cell_faces(grid: &BlockGrid, position: Point3<i32>) -> Vec<Face> {
    let Some(material) = grid.get(position).material() else {
        return Vec::new();
    };

    let exposed = exposed_sides(grid, position);
    BlockSide::all()
        .into_iter()
        .filter(|side| exposed[*side as usize])
        .map(|side| Face::new(position, side, material))
        .collect()
}

/// Groups faces by material, keeping their relative order within each group.
///
/// # Returns
/// One batch per material that has at least one face, in `MaterialId` order.
pub fn batch_faces(faces: impl IntoIterator<Item = Face>) -> Vec<MaterialBatch> {
    let mut faces_by_material: [Vec<Face>; MaterialId::COUNT] = Default::default();
    for face in faces {
        faces_by_material[face.material as usize].push(face);
    }

    MaterialId::all()
        .into_iter()
        .zip(faces_by_material)
        .filter(|(_, faces)| !faces.is_empty())
        .map(|(material, faces)| MaterialBatch { material, faces })
        .collect()
}

/// Collects the exposed faces of every solid block, batched by material.
///
/// Within a batch, faces are ordered by block position (x, then y, then z) and
/// then by side, so equal grids always produce equal output.
///
/// # Returns
/// One batch per material that has at least one exposed face, in `MaterialId` order.
pub fn cull_faces(grid: &BlockGrid) -> Vec<MaterialBatch> {
    let mut positions: Vec<Point3<i32>> = grid.iter().map(|(position, _)| position).collect();
    positions.sort_unstable_by_key(|position| (position.x, position.y, position.z));

    batch_faces(
        positions
            .into_iter()
            .flat_map(|position| cell_faces(grid, position)),
    )
}
