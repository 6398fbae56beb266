use cgmath::Point3;

use crate::engine_state::{
    rendering::material::MaterialId, voxels::block::block_side::BlockSide,
};

/// Texture coordinates of the six vertices emitted for every face, matching the
/// vertex order of [`Face::triangle_vertices`].
pub const FACE_UVS: [[f32; 2]; 6] = [
    [0.0, 0.0],
    [1.0, 0.0],
    [1.0, 1.0],
    [0.0, 0.0],
    [1.0, 1.0],
    [0.0, 1.0],
];

/// Represents a single exposed face of a block.
///
/// A face is identified by the block it belongs to and the side it lies on. The
/// material is carried along so faces can be grouped into per-material batches.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Face {
    /// Position of the block this face belongs to
    pub position: Point3<i32>,
    /// Which side of the block this face represents
    pub block_side: BlockSide,
    /// Material used to draw this face
    pub material: MaterialId,
}

impl Face {
    pub fn new(position: Point3<i32>, block_side: BlockSide, material: MaterialId) -> Self {
        Face {
            position,
            block_side,
            material,
        }
    }

    /// The four corners of the face in world space.
    ///
    /// Corners are returned as `[ll, lr, ul, ur]` (lower-left, lower-right,
    /// upper-left, upper-right) as seen from outside the block, so that
    /// `(lr - ll) x (ul - ll)` points along the face normal.
    pub fn corners(&self) -> [Point3<f32>; 4] {
        let x = self.position.x as f32;
        let y = self.position.y as f32;
        let z = self.position.z as f32;

        match self.block_side {
            BlockSide::RIGHT => [
                Point3::new(x + 1.0, y, z + 1.0),
                Point3::new(x + 1.0, y, z),
                Point3::new(x + 1.0, y + 1.0, z + 1.0),
                Point3::new(x + 1.0, y + 1.0, z),
            ],
            BlockSide::LEFT => [
                Point3::new(x, y, z),
                Point3::new(x, y, z + 1.0),
                Point3::new(x, y + 1.0, z),
                Point3::new(x, y + 1.0, z + 1.0),
            ],
            BlockSide::TOP => [
                Point3::new(x, y + 1.0, z + 1.0),
                Point3::new(x + 1.0, y + 1.0, z + 1.0),
                Point3::new(x, y + 1.0, z),
                Point3::new(x + 1.0, y + 1.0, z),
            ],
            BlockSide::BOTTOM => [
                Point3::new(x, y, z),
                Point3::new(x + 1.0, y, z),
                Point3::new(x, y, z + 1.0),
                Point3::new(x + 1.0, y, z + 1.0),
            ],
            BlockSide::FRONT => [
                Point3::new(x, y, z + 1.0),
                Point3::new(x + 1.0, y, z + 1.0),
                Point3::new(x, y + 1.0, z + 1.0),
                Point3::new(x + 1.0, y + 1.0, z + 1.0),
            ],
            BlockSide::BACK => [
                Point3::new(x + 1.0, y, z),
                Point3::new(x, y, z),
                Point3::new(x + 1.0, y + 1.0, z),
                Point3::new(x, y + 1.0, z),
            ],
        }
    }

    /// Positions of the two counter-clockwise triangles covering the face.
    ///
    /// The order is `ll, lr, ur` followed by `ll, ur, ul`, matching [`FACE_UVS`].
    pub fn triangle_vertices(&self) -> [[f32; 3]; 6] {
        let [ll, lr, ul, ur] = self.corners();
        [ll, lr, ur, ll, ur, ul].map(|corner| corner.into())
    }
}
