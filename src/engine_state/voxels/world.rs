//! # World Module
//!
//! This module provides the `World` struct, the exclusive owner of all block
//! storage, together with the mutation operations driven by player input.
//!
//! ## Lifecycle
//!
//! 1. The world is created empty from validated dimensions
//! 2. Terrain generation populates it once
//! 3. Add/remove requests mutate it for the rest of the session
//!
//! Every successful mutation bumps a revision counter so consumers such as the
//! renderer can tell whether their cached view of the world is stale. Recent
//! edits are also kept in a bounded log, letting those consumers refresh only
//! the cells that changed.

use cgmath::{Point3, Vector3};
use log::{debug, info};

use super::{
    block::block_type::BlockType,
    block_grid::{BlockGrid, WorldDimensions},
    error::WorldError,
    raycast::{cast_ray, RayHit},
    terrain::{TerrainGenerator, TerrainReport, TerrainSettings},
};
use crate::engine_state::camera_state::camera::Camera;

/// Number of single-cell edits remembered before the log starts over.
const EDIT_LOG_CAPACITY: usize = 1024;

/// A bounded voxel world.
///
/// # Examples
///
/// ```
/// use cgmath::Point3;
/// use voxel_world::engine_state::voxels::block::block_type::BlockType;
/// use voxel_world::engine_state::voxels::world::World;
///
/// # fn main() -> Result<(), voxel_world::engine_state::voxels::error::WorldError> {
/// let mut world = World::new(8, 4, 8)?;
/// assert!(world.add_block(BlockType::LOG, Point3::new(0, 1, 0)));
/// assert_eq!(world.get(Point3::new(0, 1, 0)), BlockType::LOG);
/// # Ok(())
/// # }
/// ```
pub struct World {
    grid: BlockGrid,
    revision: u64,
    /// `(revision, position)` of each recent edit, in revision order
    edit_log: Vec<(u64, Point3<i32>)>,
    /// Oldest revision from which `edit_log` holds every later edit
    edit_log_floor: u64,
}

impl World {
    /// Creates a new, empty world.
    ///
    /// # Errors
    /// Returns `WorldError::InvalidConfiguration` if any dimension is not positive.
    pub fn new(size_x: i32, size_y: i32, size_z: i32) -> Result<Self, WorldError> {
        let dimensions = WorldDimensions::new(size_x, size_y, size_z)?;
        Ok(World {
            grid: BlockGrid::new(dimensions),
            revision: 0,
            edit_log: Vec::new(),
            edit_log_floor: 0,
        })
    }

    /// Creates a world and populates it with terrain.
    ///
    /// # Errors
    /// Returns `WorldError::InvalidConfiguration` if any dimension is not positive.
    pub fn generate(
        size_x: i32,
        size_y: i32,
        size_z: i32,
        settings: TerrainSettings,
    ) -> Result<(Self, TerrainReport), WorldError> {
        let mut world = World::new(size_x, size_y, size_z)?;
        let report = world.generate_terrain(&TerrainGenerator::new(settings));
        Ok((world, report))
    }

    /// Populates the world with the given generator.
    pub fn generate_terrain(&mut self, generator: &TerrainGenerator) -> TerrainReport {
        let report = generator.generate(&mut self.grid);
        self.revision += 1;
        self.edit_log.clear();
        self.edit_log_floor = self.revision;
        info!(
            "World {}x{}x{} generated: {} blocks, {} trees",
            self.dimensions().size_x,
            self.dimensions().size_y,
            self.dimensions().size_z,
            self.grid.len(),
            report.tree_positions.len()
        );
        report
    }

    pub fn dimensions(&self) -> &WorldDimensions {
        self.grid.dimensions()
    }

    pub fn grid(&self) -> &BlockGrid {
        &self.grid
    }

    /// Counter bumped by every change to the grid.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn get(&self, position: Point3<i32>) -> BlockType {
        self.grid.get(position)
    }

    pub fn is_solid(&self, position: Point3<i32>) -> bool {
        self.grid.is_solid(position)
    }

    /// Writes a block directly, bypassing the occupancy rules of `add_block`.
    ///
    /// # Errors
    /// Returns `WorldError::OutOfBounds` if `position` lies outside the world.
    pub fn set(&mut self, position: Point3<i32>, block_type: BlockType) -> Result<(), WorldError> {
        self.grid.set(position, block_type)?;
        self.revision += 1;

        if self.edit_log.len() == EDIT_LOG_CAPACITY {
            self.edit_log.clear();
            self.edit_log_floor = self.revision - 1;
        }
        self.edit_log.push((self.revision, position));
        Ok(())
    }

    /// Positions written after `revision`, oldest first.
    ///
    /// # Returns
    /// `None` if the log no longer reaches back to `revision`, in which case the
    /// caller must treat the whole world as changed.
    pub fn edits_since(&self, revision: u64) -> Option<Vec<Point3<i32>>> {
        if revision < self.edit_log_floor {
            return None;
        }

        let start = self.edit_log.partition_point(|(edited, _)| *edited <= revision);
        Some(self.edit_log[start..].iter().map(|(_, position)| *position).collect())
    }

    /// Returns `true` if the point lies inside a solid cell.
    ///
    /// This is the only collision test the world offers.
    pub fn is_position_blocked(&self, point: Point3<f32>) -> bool {
        self.is_solid(Self::cell_containing(point))
    }

    /// The block position whose unit cell contains `point`.
    pub fn cell_containing(point: Point3<f32>) -> Point3<i32> {
        Point3::new(
            point.x.floor() as i32,
            point.y.floor() as i32,
            point.z.floor() as i32,
        )
    }

    /// Finds the first solid block along a ray.
    pub fn raycast(
        &self,
        origin: Point3<f32>,
        direction: Vector3<f32>,
        max_distance: f32,
    ) -> Option<RayHit> {
        cast_ray(&self.grid, origin, direction, max_distance)
    }

    /// Finds the block the camera is looking at.
    pub fn block_at_cursor(&self, camera: &Camera, reach: f32) -> Option<RayHit> {
        self.raycast(camera.position, camera.get_view_vec(), reach)
    }

    /// Removes the block at `position`.
    ///
    /// Air and out-of-bounds positions are left alone.
    ///
    /// # Returns
    /// `true` if a block was removed.
    pub fn remove_block(&mut self, position: Point3<i32>) -> bool {
        let previous = self.get(position);
        if !previous.is_solid() {
            return false;
        }

        if self.set(position, BlockType::AIR).is_err() {
            return false;
        }
        debug!("Removed {:?} at {:?}", previous, position);
        true
    }

    /// Places a block at `position` if that cell is inside the world and empty.
    ///
    /// Occupied cells are never overwritten and placing `AIR` does nothing.
    ///
    /// # Returns
    /// `true` if the block was placed.
    pub fn add_block(&mut self, block_type: BlockType, position: Point3<i32>) -> bool {
        if !block_type.is_solid() || self.is_solid(position) {
            return false;
        }

        if self.set(position, block_type).is_err() {
            return false;
        }
        debug!("Placed {:?} at {:?}", block_type, position);
        true
    }

    /// The cell where a block placed against the hit face would go.
    pub fn placement_position(hit: &RayHit) -> Point3<i32> {
        hit.target + hit.face.normal()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine_state::voxels::block::block_side::BlockSide;

    fn world() -> World {
        World::new(8, 6, 8).unwrap()
    }

    #[test]
    fn rejects_invalid_dimensions() {
        assert!(matches!(
            World::new(8, 0, 8),
            Err(WorldError::InvalidConfiguration(_))
        ));
    }

    #[test]
    fn remove_always_leaves_air() {
        let mut world = world();
        let position = Point3::new(1, 1, 1);
        world.set(position, BlockType::DIRT).unwrap();

        assert!(world.remove_block(position));
        assert_eq!(world.get(position), BlockType::AIR);
        assert!(!world.remove_block(position));
        assert_eq!(world.get(position), BlockType::AIR);
    }

    #[test]
    fn add_never_overwrites() {
        let mut world = world();
        let position = Point3::new(0, 0, 0);
        world.set(position, BlockType::LOG).unwrap();
        let revision = world.revision();

        assert!(!world.add_block(BlockType::GRASS, position));
        assert_eq!(world.get(position), BlockType::LOG);
        assert_eq!(world.revision(), revision);
    }

    #[test]
    fn out_of_bounds_mutations_are_silent_no_ops() {
        let mut world = world();
        let outside = Point3::new(4, 0, 0);

        assert!(!world.add_block(BlockType::DIRT, outside));
        assert!(!world.remove_block(outside));
        assert!(world.grid().is_empty());
        assert_eq!(world.revision(), 0);
    }

    #[test]
    fn adding_air_is_a_no_op() {
        let mut world = world();
        assert!(!world.add_block(BlockType::AIR, Point3::new(0, 0, 0)));
        assert_eq!(world.revision(), 0);
    }

    #[test]
    fn placement_steps_out_of_the_hit_face() {
        let hit = RayHit {
            target: Point3::new(2, 3, 4),
            block_type: BlockType::DIRT,
            face: BlockSide::FRONT,
            distance: 1.0,
        };
        assert_eq!(World::placement_position(&hit), Point3::new(2, 3, 5));

        let hit = RayHit {
            face: BlockSide::BOTTOM,
            ..hit
        };
        assert_eq!(World::placement_position(&hit), Point3::new(2, 2, 4));
    }

    #[test]
    fn point_collision_uses_containing_cell() {
        let mut world = world();
        world.set(Point3::new(-1, 0, 0), BlockType::DIRT).unwrap();

        assert!(world.is_position_blocked(Point3::new(-0.5, 0.9, 0.1)));
        assert!(!world.is_position_blocked(Point3::new(0.5, 0.9, 0.1)));
    }

    #[test]
    fn generated_world_counts_a_revision() {
        let (world, report) = World::generate(8, 4, 8, TerrainSettings::default()).unwrap();
        assert_eq!(report.columns, 64);
        assert!(world.revision() > 0);
    }

    #[test]
    fn edit_log_lists_positions_after_a_revision() {
        let mut world = world();
        world.add_block(BlockType::DIRT, Point3::new(0, 0, 0));
        let seen = world.revision();
        world.add_block(BlockType::LOG, Point3::new(1, 0, 0));
        world.remove_block(Point3::new(0, 0, 0));

        assert_eq!(
            world.edits_since(seen),
            Some(vec![Point3::new(1, 0, 0), Point3::new(0, 0, 0)])
        );
        assert_eq!(world.edits_since(world.revision()), Some(Vec::new()));
    }

    #[test]
    fn edit_log_forgets_revisions_it_cannot_cover() {
        let mut world = world();
        let before = world.revision();
        for _ in 0..=EDIT_LOG_CAPACITY / 2 {
            world.add_block(BlockType::DIRT, Point3::new(0, 0, 0));
            world.remove_block(Point3::new(0, 0, 0));
        }

        assert_eq!(world.edits_since(before), None);
        let recent = world.revision() - 1;
        assert_eq!(world.edits_since(recent), Some(vec![Point3::new(0, 0, 0)]));

        world.generate_terrain(&TerrainGenerator::new(TerrainSettings::default()));
        assert_eq!(world.edits_since(recent), None);
        assert_eq!(world.edits_since(world.revision()), Some(Vec::new()));
    }
}
