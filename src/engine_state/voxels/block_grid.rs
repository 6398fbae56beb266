//! # Block Grid Module
//!
//! Sparse storage for the blocks of a bounded world. Only occupied cells are kept;
//! every other in-bounds coordinate is implicitly air.
//!
//! ## Coordinates
//!
//! The world is centered on the origin in the horizontal plane. For a size `s`
//! the valid x (and z) range is `[-(s / 2), -(s / 2) + s)`, so a world of even size
//! spans `[-s/2, s/2)` and odd sizes keep exactly `s` columns. Heights span `[0, size_y)`.
//!
//! ## Performance Considerations
//!
//! - Lookups and writes are O(1) through a hash map keyed by block position
//! - Memory grows with the number of solid cells only; writing air frees the entry

use std::collections::HashMap;

use cgmath::Point3;

use super::{block::block_type::BlockType, error::WorldError};

/// The validated extent of a world, in blocks.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct WorldDimensions {
    pub size_x: i32,
    pub size_y: i32,
    pub size_z: i32,
}

impl WorldDimensions {
    /// Validates the three world sizes.
    ///
    /// # Errors
    /// Returns `WorldError::InvalidConfiguration` if any size is not positive.
    pub fn new(size_x: i32, size_y: i32, size_z: i32) -> Result<Self, WorldError> {
        if size_x <= 0 || size_y <= 0 || size_z <= 0 {
            return Err(WorldError::InvalidConfiguration(format!(
                "world dimensions must be positive, got {size_x}x{size_y}x{size_z}"
            )));
        }

        Ok(WorldDimensions {
            size_x,
            size_y,
            size_z,
        })
    }

    /// Smallest valid block position.
    pub fn min(&self) -> Point3<i32> {
        Point3::new(-(self.size_x / 2), 0, -(self.size_z / 2))
    }

    /// Largest valid block position plus one along every axis.
    pub fn max_exclusive(&self) -> Point3<i32> {
        let min = self.min();
        Point3::new(min.x + self.size_x, self.size_y, min.z + self.size_z)
    }

    /// Returns `true` if `position` lies inside the world.
    pub fn contains(&self, position: Point3<i32>) -> bool {
        let min = self.min();
        let max = self.max_exclusive();
        (min.x..max.x).contains(&position.x)
            && (min.y..max.y).contains(&position.y)
            && (min.z..max.z).contains(&position.z)
    }

    /// Number of (x, z) columns in the world.
    pub fn column_count(&self) -> u64 {
        self.size_x as u64 * self.size_z as u64
    }
}

/// Sparse block storage mapping occupied positions to their block type.
///
/// # Examples
///
/// ```
/// use cgmath::Point3;
/// use voxel_world::engine_state::voxels::block::block_type::BlockType;
/// use voxel_world::engine_state::voxels::block_grid::{BlockGrid, WorldDimensions};
///
/// # fn main() -> Result<(), voxel_world::engine_state::voxels::error::WorldError> {
/// let dimensions = WorldDimensions::new(16, 8, 16)?;
/// let mut grid = BlockGrid::new(dimensions);
/// grid.set(Point3::new(0, 0, 0), BlockType::DIRT)?;
/// assert!(grid.is_solid(Point3::new(0, 0, 0)));
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct BlockGrid {
    dimensions: WorldDimensions,
    blocks: HashMap<Point3<i32>, BlockType>,
}

impl BlockGrid {
    /// Creates an empty grid; every cell starts as air.
    pub fn new(dimensions: WorldDimensions) -> Self {
        BlockGrid {
            dimensions,
            blocks: HashMap::new(),
        }
    }

    pub fn dimensions(&self) -> &WorldDimensions {
        &self.dimensions
    }

    /// Returns `true` if `position` lies inside the world.
    pub fn contains(&self, position: Point3<i32>) -> bool {
        self.dimensions.contains(position)
    }

    /// Gets the block type at `position`.
    ///
    /// Never fails: absent and out-of-bounds positions read as `AIR`.
    pub fn get(&self, position: Point3<i32>) -> BlockType {
        self.blocks
            .get(&position)
            .copied()
            .unwrap_or(BlockType::AIR)
    }

    /// Writes `block_type` at `position`, overwriting any previous block.
    ///
    /// Writing `AIR` removes the entry so storage stays proportional to the
    /// number of solid cells.
    ///
    /// # Errors
    /// Returns `WorldError::OutOfBounds` and leaves the grid untouched if
    /// `position` lies outside the world.
    pub fn set(&mut self, position: Point3<i32>, block_type: BlockType) -> Result<(), WorldError> {
        if !self.contains(position) {
            return Err(WorldError::OutOfBounds {
                x: position.x,
                y: position.y,
                z: position.z,
            });
        }

        if block_type.is_solid() {
            self.blocks.insert(position, block_type);
        } else {
            self.blocks.remove(&position);
        }

        Ok(())
    }

    /// Returns `true` iff the block at `position` is not air.
    pub fn is_solid(&self, position: Point3<i32>) -> bool {
        self.get(position).is_solid()
    }

    /// Number of occupied cells.
    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    /// Iterates over every occupied cell. The order is unspecified.
    pub fn iter(&self) -> impl Iterator<Item = (Point3<i32>, BlockType)> + '_ {
        self.blocks
            .iter()
            .map(|(position, block_type)| (*position, *block_type))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid() -> BlockGrid {
        BlockGrid::new(WorldDimensions::new(4, 3, 4).unwrap())
    }

    #[test]
    fn rejects_non_positive_dimensions() {
        assert!(matches!(
            WorldDimensions::new(0, 4, 4),
            Err(WorldError::InvalidConfiguration(_))
        ));
        assert!(WorldDimensions::new(4, -1, 4).is_err());
        assert!(WorldDimensions::new(4, 4, 0).is_err());
    }

    #[test]
    fn bounds_are_centered_horizontally() {
        let dimensions = WorldDimensions::new(4, 3, 5).unwrap();
        assert_eq!(dimensions.min(), Point3::new(-2, 0, -2));
        assert_eq!(dimensions.max_exclusive(), Point3::new(2, 3, 3));
        assert!(dimensions.contains(Point3::new(-2, 0, 2)));
        assert!(!dimensions.contains(Point3::new(2, 0, 0)));
        assert!(!dimensions.contains(Point3::new(0, 3, 0)));
        assert!(!dimensions.contains(Point3::new(0, -1, 0)));
    }

    #[test]
    fn set_then_get_round_trips_every_type() {
        let mut grid = grid();
        let position = Point3::new(-1, 2, 1);
        for block_type in BlockType::SOLID_TYPES {
            grid.set(position, block_type).unwrap();
            assert_eq!(grid.get(position), block_type);
        }
        assert_eq!(grid.len(), 1);
    }

    #[test]
    fn writing_air_frees_the_entry() {
        let mut grid = grid();
        let position = Point3::new(0, 0, 0);
        grid.set(position, BlockType::DIRT).unwrap();
        grid.set(position, BlockType::AIR).unwrap();
        assert_eq!(grid.get(position), BlockType::AIR);
        assert!(grid.is_empty());
    }

    #[test]
    fn out_of_bounds_write_fails_and_changes_nothing() {
        let mut grid = grid();
        grid.set(Point3::new(0, 0, 0), BlockType::LOG).unwrap();

        let result = grid.set(Point3::new(2, 0, 0), BlockType::DIRT);

        assert_eq!(result, Err(WorldError::OutOfBounds { x: 2, y: 0, z: 0 }));
        assert_eq!(grid.len(), 1);
        assert_eq!(grid.get(Point3::new(2, 0, 0)), BlockType::AIR);
    }

    #[test]
    fn out_of_bounds_reads_are_air() {
        let grid = grid();
        assert_eq!(grid.get(Point3::new(100, -5, 100)), BlockType::AIR);
        assert!(!grid.is_solid(Point3::new(100, -5, 100)));
    }
}
