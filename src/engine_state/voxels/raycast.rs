//! # Raycast Module
//!
//! Finds the first solid block along a ray and the face the ray entered it through.
//!
//! ## Algorithm
//!
//! The ray is walked with an exact voxel traversal: at every step it advances into
//! the neighboring cell across whichever cell boundary is nearest along the ray, so
//! no cell the ray passes through is ever skipped. When two or three boundaries are
//! equally near, the x axis steps first, then y, then z.
//!
//! The cell containing the ray origin is never reported; targeting starts at the
//! first boundary the ray crosses.
//!
//! The walk is clipped to the part of the ray inside the world box, so a miss is
//! found in time proportional to the world size whatever the reach.

use cgmath::{InnerSpace, Point3, Vector3};

use super::{
    block::{block_side::BlockSide, block_type::BlockType},
    block_grid::BlockGrid,
};

/// A solid block found by a raycast.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct RayHit {
    /// Position of the block that was hit
    pub target: Point3<i32>,
    /// Type of the block that was hit
    pub block_type: BlockType,
    /// The face of `target` the ray crossed to enter it
    pub face: BlockSide,
    /// Distance along the normalized ray to the entry point
    pub distance: f32,
}

/// Marches a ray through the grid and returns the first solid block within
/// `max_distance`.
///
/// # Arguments
/// * `grid` - The blocks to test against
/// * `origin` - Ray start, usually the camera position
/// * `direction` - Ray direction; it is normalized before use
/// * `max_distance` - Maximum distance along the ray to search
///
/// # Returns
/// `None` when nothing solid lies within reach, when `direction` has no length,
/// when `origin` is not finite or when `max_distance` is not a positive finite number.
pub fn cast_ray(
    grid: &BlockGrid,
    origin: Point3<f32>,
    direction: Vector3<f32>,
    max_distance: f32,
) -> Option<RayHit> {
    if !(max_distance.is_finite() && max_distance > 0.0) {
        return None;
    }
    if !(origin.x.is_finite() && origin.y.is_finite() && origin.z.is_finite()) {
        return None;
    }
    let length = direction.magnitude();
    if !(length.is_finite() && length > 0.0) {
        return None;
    }
    let direction = direction / length;

    let origin = [origin.x, origin.y, origin.z];
    let direction = [direction.x, direction.y, direction.z];

    // Span of the ray inside the world box, capped by the reach
    let dimensions = grid.dimensions();
    let (lower, upper) = (dimensions.min(), dimensions.max_exclusive());
    let lower = [lower.x as f32, lower.y as f32, lower.z as f32];
    let upper = [upper.x as f32, upper.y as f32, upper.z as f32];
    let mut t_enter = 0.0f32;
    let mut t_exit = max_distance;
    for axis in 0..3 {
        if direction[axis] == 0.0 {
            if origin[axis] < lower[axis] || origin[axis] > upper[axis] {
                return None;
            }
            continue;
        }
        let t_lower = (lower[axis] - origin[axis]) / direction[axis];
        let t_upper = (upper[axis] - origin[axis]) / direction[axis];
        t_enter = t_enter.max(t_lower.min(t_upper));
        t_exit = t_exit.min(t_lower.max(t_upper));
    }
    if t_enter > t_exit {
        return None;
    }

    // Rays starting outside the world are advanced to one block short of it.
    // The skipped cells are all outside and therefore air.
    let skipped = (t_enter - 1.0).max(0.0);
    let start = [0, 1, 2].map(|axis| origin[axis] + direction[axis] * skipped);
    let limit = t_exit - skipped;

    let mut cell = [0i32; 3];
    let mut step = [0i32; 3];
    // Ray distance at which the next boundary on each axis is crossed
    let mut t_max = [f32::INFINITY; 3];
    // Ray distance between two boundaries on each axis
    let mut t_delta = [f32::INFINITY; 3];

    for axis in 0..3 {
        cell[axis] = start[axis].floor() as i32;
        if direction[axis] > 0.0 {
            step[axis] = 1;
            t_delta[axis] = 1.0 / direction[axis];
            t_max[axis] = (cell[axis] as f32 + 1.0 - start[axis]) * t_delta[axis];
        } else if direction[axis] < 0.0 {
            step[axis] = -1;
            t_delta[axis] = -1.0 / direction[axis];
            t_max[axis] = (start[axis] - cell[axis] as f32) * t_delta[axis];
        }
    }

    loop {
        let axis = if t_max[0] <= t_max[1] && t_max[0] <= t_max[2] {
            0
        } else if t_max[1] <= t_max[2] {
            1
        } else {
            2
        };

        let distance = t_max[axis];
        if distance > limit {
            return None;
        }

        cell[axis] += step[axis];
        t_max[axis] += t_delta[axis];

        let target = Point3::new(cell[0], cell[1], cell[2]);
        let block_type = grid.get(target);
        if block_type.is_solid() {
            return Some(RayHit {
                target,
                block_type,
                face: BlockSide::entered_through(axis, step[axis]),
                distance: distance + skipped,
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine_state::voxels::block_grid::WorldDimensions;

    fn grid_with(blocks: &[(i32, i32, i32)]) -> BlockGrid {
        let mut grid = BlockGrid::new(WorldDimensions::new(32, 16, 32).unwrap());
        for &(x, y, z) in blocks {
            grid.set(Point3::new(x, y, z), BlockType::DIRT).unwrap();
        }
        grid
    }

    #[test]
    fn hits_block_in_front_through_near_face() {
        let grid = grid_with(&[(0, 0, 0)]);

        let hit = cast_ray(
            &grid,
            Point3::new(0.0, 0.0, 5.0),
            Vector3::new(0.0, 0.0, -1.0),
            10.0,
        )
        .expect("block should be hit");

        assert_eq!(hit.target, Point3::new(0, 0, 0));
        assert_eq!(hit.face, BlockSide::FRONT);
        assert_eq!(hit.block_type, BlockType::DIRT);
        assert!((hit.distance - 4.0).abs() < 1e-5);
    }

    #[test]
    fn empty_world_never_hits() {
        let grid = grid_with(&[]);
        for direction in [
            Vector3::new(1.0, 0.0, 0.0),
            Vector3::new(-0.3, -0.9, 0.2),
            Vector3::new(0.0, 1.0, 0.0),
        ] {
            assert!(cast_ray(&grid, Point3::new(0.5, 2.5, 0.5), direction, 1000.0).is_none());
        }
    }

    #[test]
    fn stops_at_max_distance() {
        let grid = grid_with(&[(0, 0, 0)]);
        let origin = Point3::new(0.5, 0.5, 8.5);
        let direction = Vector3::new(0.0, 0.0, -1.0);

        assert!(cast_ray(&grid, origin, direction, 7.0).is_none());
        assert!(cast_ray(&grid, origin, direction, 7.5).is_some());
    }

    #[test]
    fn looking_down_hits_top_face() {
        let grid = grid_with(&[(2, 0, 3)]);

        let hit = cast_ray(
            &grid,
            Point3::new(2.5, 4.2, 3.5),
            Vector3::new(0.0, -1.0, 0.0),
            10.0,
        )
        .unwrap();

        assert_eq!(hit.target, Point3::new(2, 0, 3));
        assert_eq!(hit.face, BlockSide::TOP);
    }

    #[test]
    fn diagonal_tie_steps_x_before_y() {
        // The ray passes exactly through the corner shared by (1,0,0) and (0,1,0).
        let grid = grid_with(&[(1, 0, 0), (0, 1, 0)]);

        let hit = cast_ray(
            &grid,
            Point3::new(0.5, 0.5, 0.5),
            Vector3::new(1.0, 1.0, 0.0),
            5.0,
        )
        .unwrap();

        assert_eq!(hit.target, Point3::new(1, 0, 0));
        assert_eq!(hit.face, BlockSide::LEFT);
    }

    #[test]
    fn ignores_the_origin_cell() {
        let grid = grid_with(&[(0, 0, 0), (0, 0, -3)]);

        let hit = cast_ray(
            &grid,
            Point3::new(0.5, 0.5, 0.5),
            Vector3::new(0.0, 0.0, -1.0),
            10.0,
        )
        .unwrap();

        assert_eq!(hit.target, Point3::new(0, 0, -3));
    }

    #[test]
    fn degenerate_input_is_a_miss() {
        let grid = grid_with(&[(0, 0, 0)]);
        let origin = Point3::new(0.5, 0.5, 3.5);
        assert!(cast_ray(&grid, origin, Vector3::new(0.0, 0.0, 0.0), 10.0).is_none());
        assert!(cast_ray(&grid, origin, Vector3::new(0.0, 0.0, -1.0), 0.0).is_none());
        assert!(cast_ray(&grid, origin, Vector3::new(0.0, 0.0, -1.0), f32::NAN).is_none());
    }

    #[test]
    fn vertical_tie_steps_y_before_z() {
        let grid = grid_with(&[(0, 1, 0), (0, 0, 1)]);

        let hit = cast_ray(
            &grid,
            Point3::new(0.5, 0.5, 0.5),
            Vector3::new(0.0, 1.0, 1.0),
            5.0,
        )
        .unwrap();

        assert_eq!(hit.target, Point3::new(0, 1, 0));
        assert_eq!(hit.face, BlockSide::BOTTOM);
    }

    #[test]
    fn three_way_tie_steps_x_first() {
        let grid = grid_with(&[(1, 0, 0), (0, 1, 0), (0, 0, 1)]);

        let hit = cast_ray(
            &grid,
            Point3::new(0.5, 0.5, 0.5),
            Vector3::new(1.0, 1.0, 1.0),
            5.0,
        )
        .unwrap();

        assert_eq!(hit.target, Point3::new(1, 0, 0));
        assert_eq!(hit.face, BlockSide::LEFT);
    }

    #[test]
    fn huge_reach_in_empty_world_misses() {
        let grid = grid_with(&[]);
        for direction in [
            Vector3::new(1.0, 0.0, 0.0),
            Vector3::new(0.0, -1.0, 0.0),
            Vector3::new(0.3, 0.2, -0.9),
        ] {
            assert!(cast_ray(&grid, Point3::new(0.5, 2.5, 0.5), direction, 1e9).is_none());
            assert!(cast_ray(&grid, Point3::new(0.5, 2.5, 0.5), direction, f32::MAX).is_none());
        }
    }

    #[test]
    fn ray_from_outside_enters_the_world() {
        let grid = grid_with(&[(-16, 0, 0)]);

        let hit = cast_ray(
            &grid,
            Point3::new(-40.5, 0.5, 0.5),
            Vector3::new(1.0, 0.0, 0.0),
            100.0,
        )
        .unwrap();

        assert_eq!(hit.target, Point3::new(-16, 0, 0));
        assert_eq!(hit.face, BlockSide::LEFT);
        assert!((hit.distance - 24.5).abs() < 1e-4);
        assert!(cast_ray(
            &grid,
            Point3::new(-40.5, 0.5, 0.5),
            Vector3::new(1.0, 0.0, 0.0),
            20.0
        )
        .is_none());
    }

    #[test]
    fn ray_outside_the_world_never_enters() {
        let grid = grid_with(&[(0, 0, 0)]);

        // Parallel to the world, above it
        assert!(cast_ray(
            &grid,
            Point3::new(0.5, 40.5, 0.5),
            Vector3::new(1.0, 0.0, 0.0),
            1e9
        )
        .is_none());
        // Far away and pointing away
        assert!(cast_ray(
            &grid,
            Point3::new(3.0e9, 0.5, 0.5),
            Vector3::new(1.0, 0.0, 0.0),
            1e9
        )
        .is_none());
    }
}
