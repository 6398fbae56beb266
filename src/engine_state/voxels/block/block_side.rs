//! # Block Side Module
//!
//! This module defines the six faces of a voxel block. Faces are shared by the
//! face culler, which tests the neighbor across each face, and the raycaster,
//! which reports the face a ray entered through.

use cgmath::Vector3;

/// Represents the six possible faces of a voxel block.
///
/// Each variant is named after the direction its outward normal points to.
/// The discriminants index per-side arrays and follow the order of [`BlockSide::all`].
#[derive(PartialEq, Eq, Hash, Copy, Clone, Debug)]
pub enum BlockSide {
    /// The face whose normal points along positive X
    RIGHT = 0,

    /// The face whose normal points along negative X
    LEFT = 1,

    /// The face whose normal points along positive Y
    TOP = 2,

    /// The face whose normal points along negative Y
    BOTTOM = 3,

    /// The face whose normal points along positive Z
    FRONT = 4,

    /// The face whose normal points along negative Z
    BACK = 5,
}

impl BlockSide {
    /// Returns an array containing all six block faces in a consistent order.
    ///
    /// The order is: [RIGHT, LEFT, TOP, BOTTOM, FRONT, BACK], i.e. +X, -X, +Y, -Y, +Z, -Z.
    pub fn all() -> [BlockSide; 6] {
        [
            BlockSide::RIGHT,
            BlockSide::LEFT,
            BlockSide::TOP,
            BlockSide::BOTTOM,
            BlockSide::FRONT,
            BlockSide::BACK,
        ]
    }

    /// The unit outward normal of this face in block coordinates.
    pub fn normal(self) -> Vector3<i32> {
        match self {
            BlockSide::RIGHT => Vector3::new(1, 0, 0),
            BlockSide::LEFT => Vector3::new(-1, 0, 0),
            BlockSide::TOP => Vector3::new(0, 1, 0),
            BlockSide::BOTTOM => Vector3::new(0, -1, 0),
            BlockSide::FRONT => Vector3::new(0, 0, 1),
            BlockSide::BACK => Vector3::new(0, 0, -1),
        }
    }

    /// Identifies the face a ray enters through after stepping along one axis.
    ///
    /// # Arguments
    /// * `axis` - The axis that was stepped (0 = x, 1 = y, 2 = z)
    /// * `step` - The direction of travel along that axis (+1 or -1)
    ///
    /// # Returns
    /// The face whose normal points against the direction of travel.
    pub fn entered_through(axis: usize, step: i32) -> BlockSide {
        match (axis, step > 0) {
            (0, true) => BlockSide::LEFT,
            (0, false) => BlockSide::RIGHT,
            (1, true) => BlockSide::BOTTOM,
            (1, false) => BlockSide::TOP,
            (_, true) => BlockSide::BACK,
            (_, false) => BlockSide::FRONT,
        }
    }
}
