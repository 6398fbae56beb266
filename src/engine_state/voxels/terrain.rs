//! # Terrain Generation Module
//!
//! Populates a freshly created world with ground layers and trees.
//!
//! ## Ground
//!
//! Every column receives a height `h` from 2D Perlin noise. Cells `0..h-1` are
//! dirt and cell `h-1` is the single grass block capping the column. Heights are
//! a pure function of the column position and the noise seed.
//!
//! ## Trees
//!
//! Trunk positions are sampled in an annulus around the world center with a seeded
//! random generator. A sample is rejected when it falls outside the world or closer
//! than the minimum spacing to a tree that was already accepted. Sampling is capped
//! at a fixed number of attempts per requested tree, so a crowded annulus yields
//! fewer trees instead of spinning forever.

use cgmath::{Point2, Point3};
use log::{debug, warn};
use noise::{NoiseFn, Perlin};
use serde::{Deserialize, Serialize};

use super::{block::block_type::BlockType, block_grid::BlockGrid};

/// Scaling factor applied to column coordinates when sampling Perlin noise.
pub const PERLIN_SCALE_FACTOR: f64 = 0.05;
/// Tallest ground column the generator produces, grass included.
pub const MAX_GROUND_HEIGHT: i32 = 4;
/// Number of log blocks stacked for every trunk.
pub const TRUNK_HEIGHT: i32 = 4;
/// Half-width of the cube of leaves placed on top of a trunk.
pub const LEAVES_RADIUS: i32 = 1;
/// Sampling attempts allowed per requested tree.
pub const MAX_ATTEMPTS_PER_TREE: u32 = 32;

/// Tunable inputs of terrain generation.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TerrainSettings {
    /// Seed for both the height noise and tree sampling
    pub seed: u32,
    /// Number of trees requested
    pub tree_count: u32,
    /// Inner radius of the tree annulus, in blocks from the world center
    pub tree_min_radius: f32,
    /// Outer radius of the tree annulus
    pub tree_max_radius: f32,
    /// Minimum planar distance between two trunks
    pub tree_min_spacing: f32,
}

impl Default for TerrainSettings {
    fn default() -> Self {
        TerrainSettings {
            seed: 0,
            tree_count: 4,
            tree_min_radius: 5.0,
            tree_max_radius: 20.0,
            tree_min_spacing: 4.0,
        }
    }
}

/// Summary of one generation pass.
#[derive(Clone, Debug, Default)]
pub struct TerrainReport {
    /// Number of columns filled
    pub columns: u64,
    /// Trunk positions that passed the spacing test, in acceptance order
    pub tree_positions: Vec<Point2<i32>>,
}

/// Deterministic terrain generator for a single world.
pub struct TerrainGenerator {
    settings: TerrainSettings,
    perlin: Perlin,
}

impl TerrainGenerator {
    pub fn new(settings: TerrainSettings) -> Self {
        let perlin = Perlin::new(settings.seed);
        TerrainGenerator { settings, perlin }
    }

    /// Fills `grid` with terrain columns and trees.
    ///
    /// Generation cannot fail: cells that would fall outside the world are skipped
    /// and unsatisfiable tree spacing results in fewer trees.
    pub fn generate(&self, grid: &mut BlockGrid) -> TerrainReport {
        let columns = self.fill_ground(grid);
        let tree_positions = self.place_tree_positions(grid);

        for position in &tree_positions {
            self.grow_tree(grid, *position);
        }

        debug!(
            "Generated {} columns and {} trees ({} blocks)",
            columns,
            tree_positions.len(),
            grid.len()
        );

        TerrainReport {
            columns,
            tree_positions,
        }
    }

    /// Height of the solid stack in column `(x, z)`, grass included.
    ///
    /// # Returns
    /// A value in `[1, min(size_y - 1, MAX_GROUND_HEIGHT)]`, or 1 for worlds one block tall.
    pub fn column_height(&self, x: i32, z: i32, size_y: i32) -> i32 {
        let max_height = (size_y - 1).clamp(1, MAX_GROUND_HEIGHT);
        let sample = self
            .perlin
            .get([x as f64 * PERLIN_SCALE_FACTOR, z as f64 * PERLIN_SCALE_FACTOR])
            .clamp(-1.0, 1.0);
        let normalized = (sample + 1.0) / 2.0;
        let height = 1 + (normalized * (max_height - 1) as f64).round() as i32;
        height.clamp(1, max_height)
    }

    fn fill_ground(&self, grid: &mut BlockGrid) -> u64 {
        let dimensions = *grid.dimensions();
        let min = dimensions.min();
        let max = dimensions.max_exclusive();

        let mut columns = 0;
        for x in min.x..max.x {
            for z in min.z..max.z {
                let height = self.column_height(x, z, dimensions.size_y);
                for y in 0..height - 1 {
                    place(grid, Point3::new(x, y, z), BlockType::DIRT);
                }
                place(grid, Point3::new(x, height - 1, z), BlockType::GRASS);
                columns += 1;
            }
        }
        columns
    }

    /// Samples trunk positions until the requested count is reached or the
    /// attempt budget runs out.
    fn place_tree_positions(&self, grid: &BlockGrid) -> Vec<Point2<i32>> {
        let settings = &self.settings;
        let dimensions = grid.dimensions();
        let mut rng = fastrand::Rng::with_seed(settings.seed as u64);
        let mut accepted: Vec<Point2<i32>> = Vec::new();

        let radial_span = (settings.tree_max_radius - settings.tree_min_radius).max(0.0);
        let max_attempts = settings.tree_count.saturating_mul(MAX_ATTEMPTS_PER_TREE);
        let mut attempts = 0;

        while accepted.len() < settings.tree_count as usize && attempts < max_attempts {
            attempts += 1;

            let distance = settings.tree_min_radius + rng.f32() * radial_span;
            let angle = rng.f32() * std::f32::consts::TAU;
            let candidate = Point2::new(
                (angle.cos() * distance).floor() as i32,
                (angle.sin() * distance).floor() as i32,
            );

            if !dimensions.contains(Point3::new(candidate.x, 0, candidate.y)) {
                continue;
            }

            let too_close = accepted.iter().any(|other| {
                planar_distance(*other, candidate) < settings.tree_min_spacing
            });
            if too_close {
                continue;
            }

            accepted.push(candidate);
        }

        if accepted.len() < settings.tree_count as usize {
            warn!(
                "Placed {} of {} trees after {} attempts",
                accepted.len(),
                settings.tree_count,
                attempts
            );
        }

        accepted
    }

    fn grow_tree(&self, grid: &mut BlockGrid, position: Point2<i32>) {
        let ground = self.column_height(position.x, position.y, grid.dimensions().size_y);

        for y in ground..ground + TRUNK_HEIGHT {
            place_if_empty(grid, Point3::new(position.x, y, position.y), BlockType::LOG);
        }

        let center = Point3::new(position.x, ground + TRUNK_HEIGHT, position.y);
        for dx in -LEAVES_RADIUS..=LEAVES_RADIUS {
            for dy in -LEAVES_RADIUS..=LEAVES_RADIUS {
                for dz in -LEAVES_RADIUS..=LEAVES_RADIUS {
                    let cell = Point3::new(center.x + dx, center.y + dy, center.z + dz);
                    place_if_empty(grid, cell, BlockType::LEAVES);
                }
            }
        }
    }
}

/// Distance between two trunk positions in the horizontal plane.
pub fn planar_distance(a: Point2<i32>, b: Point2<i32>) -> f32 {
    let dx = (a.x - b.x) as f32;
    let dz = (a.y - b.y) as f32;
    (dx * dx + dz * dz).sqrt()
}

// Cells outside the world are dropped.
fn place(grid: &mut BlockGrid, position: Point3<i32>, block_type: BlockType) {
    let _ = grid.set(position, block_type);
}

fn place_if_empty(grid: &mut BlockGrid, position: Point3<i32>, block_type: BlockType) {
    if grid.contains(position) && !grid.is_solid(position) {
        place(grid, position, block_type);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine_state::voxels::block_grid::WorldDimensions;

    fn generate(size: (i32, i32, i32), settings: TerrainSettings) -> (BlockGrid, TerrainReport) {
        let dimensions = WorldDimensions::new(size.0, size.1, size.2).unwrap();
        let mut grid = BlockGrid::new(dimensions);
        let report = TerrainGenerator::new(settings).generate(&mut grid);
        (grid, report)
    }

    fn no_trees() -> TerrainSettings {
        TerrainSettings {
            tree_count: 0,
            ..TerrainSettings::default()
        }
    }

    #[test]
    fn every_column_is_dirt_capped_by_one_grass() {
        let (grid, report) = generate((24, 10, 20), no_trees());
        let dimensions = *grid.dimensions();
        let min = dimensions.min();
        let max = dimensions.max_exclusive();

        assert_eq!(report.columns, dimensions.column_count());
        for x in min.x..max.x {
            for z in min.z..max.z {
                let column: Vec<BlockType> = (0..dimensions.size_y)
                    .map(|y| grid.get(Point3::new(x, y, z)))
                    .collect();
                let top = column.iter().rposition(|b| b.is_solid()).unwrap();

                assert_eq!(column[top], BlockType::GRASS);
                assert_eq!(column.iter().filter(|b| **b == BlockType::GRASS).count(), 1);
                assert!(column[..top].iter().all(|b| *b == BlockType::DIRT));
                assert!((top as i32) < MAX_GROUND_HEIGHT);
            }
        }
    }

    #[test]
    fn one_block_tall_world_is_a_grass_plane() {
        let (grid, _) = generate((6, 1, 6), no_trees());
        assert_eq!(grid.len(), 36);
        assert!(grid.iter().all(|(_, b)| b == BlockType::GRASS));
    }

    #[test]
    fn heights_depend_only_on_position_and_seed() {
        let (first, _) = generate((16, 8, 16), no_trees());
        let (second, _) = generate((16, 8, 16), no_trees());
        assert_eq!(first.len(), second.len());
        for (position, block_type) in first.iter() {
            assert_eq!(second.get(position), block_type);
        }
    }

    #[test]
    fn trees_respect_minimum_spacing() {
        let settings = TerrainSettings {
            seed: 7,
            tree_count: 30,
            tree_min_radius: 2.0,
            tree_max_radius: 14.0,
            tree_min_spacing: 3.5,
        };
        let (_, report) = generate((32, 16, 32), settings.clone());

        assert!(!report.tree_positions.is_empty());
        for (i, a) in report.tree_positions.iter().enumerate() {
            for b in &report.tree_positions[i + 1..] {
                assert!(planar_distance(*a, *b) >= settings.tree_min_spacing);
            }
        }
    }

    #[test]
    fn unsatisfiable_spacing_yields_fewer_trees() {
        let settings = TerrainSettings {
            seed: 3,
            tree_count: 50,
            tree_min_radius: 5.0,
            tree_max_radius: 6.0,
            tree_min_spacing: 20.0,
        };
        let (_, report) = generate((64, 16, 64), settings);
        assert!(report.tree_positions.len() < 50);
        assert!(!report.tree_positions.is_empty());
    }

    #[test]
    fn annulus_outside_the_world_places_no_trees() {
        let settings = TerrainSettings {
            tree_min_radius: 50.0,
            tree_max_radius: 60.0,
            ..TerrainSettings::default()
        };
        let (_, report) = generate((8, 8, 8), settings);
        assert!(report.tree_positions.is_empty());
    }

    #[test]
    fn trunks_sit_on_grass_and_carry_leaves() {
        let settings = TerrainSettings {
            seed: 11,
            tree_count: 1,
            ..TerrainSettings::default()
        };
        let (grid, report) = generate((64, 16, 64), settings.clone());
        let generator = TerrainGenerator::new(settings);
        let trunk = report.tree_positions[0];
        let ground = generator.column_height(trunk.x, trunk.y, 16);

        assert_eq!(grid.get(Point3::new(trunk.x, ground - 1, trunk.y)), BlockType::GRASS);
        for y in ground..ground + TRUNK_HEIGHT {
            assert_eq!(grid.get(Point3::new(trunk.x, y, trunk.y)), BlockType::LOG);
        }
        assert_eq!(
            grid.get(Point3::new(trunk.x, ground + TRUNK_HEIGHT, trunk.y)),
            BlockType::LEAVES
        );
    }
}
