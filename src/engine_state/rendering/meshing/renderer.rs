//! World renderer: culls the world into per-material mesh batches and submits them
//! through the graphics boundary once per frame.
//!
//! Culling is repeated only when the world revision changes; frames without block
//! edits resubmit the cached batches. When the world's edit log covers every change
//! since the last frame, only the edited cells and their six neighbors are
//! re-culled. Otherwise the whole grid is.

use std::collections::BTreeMap;

use cgmath::{Matrix4, Point3, SquareMatrix};
use log::debug;

use crate::engine_state::{
    rendering::{material::MaterialTable, GraphicsBoundary},
    voxels::{block::block_side::BlockSide, block_grid::BlockGrid, world::World},
};

use super::{
    batch_faces, cell_faces,
    mesh::{face::Face, mesh::MeshBatch},
};

/// Counters describing one rendered frame.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct FrameStats {
    /// Number of `submit` calls issued
    pub submissions: usize,
    /// Number of faces across all submissions
    pub faces: usize,
    /// Whether the world was re-culled for this frame
    pub remeshed: bool,
    /// Number of cells whose faces were recomputed for this frame
    pub culled_cells: usize,
}

/// Owns the material table and the cached geometry of the world.
pub struct WorldRenderer {
    materials: MaterialTable,
    /// Exposed faces of every visible cell, keyed by `(x, y, z)`
    surface: BTreeMap<(i32, i32, i32), Vec<Face>>,
    batches: Vec<MeshBatch>,
    meshed_revision: Option<u64>,
}

impl WorldRenderer {
    /// Sets up the renderer, resolving every material handle once.
    pub fn new(graphics: &mut dyn GraphicsBoundary) -> Self {
        WorldRenderer {
            materials: MaterialTable::resolve(graphics),
            surface: BTreeMap::new(),
            batches: Vec::new(),
            meshed_revision: None,
        }
    }

    pub fn materials(&self) -> &MaterialTable {
        &self.materials
    }

    /// The batches submitted by the most recent frame.
    pub fn batches(&self) -> &[MeshBatch] {
        &self.batches
    }

    /// Rebuilds the cached batches if the world changed since the last frame.
    ///
    /// # Returns
    /// The number of cells re-culled, or `None` if the cache was still current.
    pub fn update_meshes(&mut self, world: &World) -> Option<usize> {
        if self.meshed_revision == Some(world.revision()) {
            return None;
        }

        let grid = world.grid();
        let edits = self
            .meshed_revision
            .and_then(|revision| world.edits_since(revision));
        let culled_cells = match edits {
            Some(edits) => self.recull_around(grid, &edits),
            None => self.recull_all(grid),
        };

        self.batches = batch_faces(self.surface.values().flatten().copied())
            .iter()
            .map(|batch| MeshBatch::from_faces(batch.material, &batch.faces))
            .collect();
        self.meshed_revision = Some(world.revision());

        debug!(
            "Meshed world revision {}: {} cells re-culled, {} faces in {} batches",
            world.revision(),
            culled_cells,
            self.batches.iter().map(MeshBatch::face_count).sum::<usize>(),
            self.batches.len()
        );
        Some(culled_cells)
    }

    fn recull_all(&mut self, grid: &BlockGrid) -> usize {
        self.surface.clear();
        let mut culled_cells = 0;
        for (position, _) in grid.iter() {
            self.recull_cell(grid, position);
            culled_cells += 1;
        }
        culled_cells
    }

    /// Re-culls each edited cell and its six neighbors, whose exposure may have changed.
    fn recull_around(&mut self, grid: &BlockGrid, edits: &[Point3<i32>]) -> usize {
        let mut culled_cells = 0;
        for &position in edits {
            self.recull_cell(grid, position);
            for side in BlockSide::all() {
                self.recull_cell(grid, position + side.normal());
            }
            culled_cells += 7;
        }
        culled_cells
    }

    fn recull_cell(&mut self, grid: &BlockGrid, position: Point3<i32>) {
        let key = (position.x, position.y, position.z);
        let faces = cell_faces(grid, position);
        if faces.is_empty() {
            self.surface.remove(&key);
        } else {
            self.surface.insert(key, faces);
        }
    }

    /// Submits the world geometry for one frame.
    ///
    /// Opaque batches go first. When `transparency_enabled` is set, translucent
    /// batches follow with blending switched on for their duration; otherwise they
    /// are drawn like any other batch.
    pub fn render(
        &mut self,
        world: &World,
        graphics: &mut dyn GraphicsBoundary,
        transparency_enabled: bool,
    ) -> FrameStats {
        let culled_cells = self.update_meshes(world);
        let model_transform = Matrix4::identity();
        let mut stats = FrameStats {
            remeshed: culled_cells.is_some(),
            culled_cells: culled_cells.unwrap_or(0),
            ..FrameStats::default()
        };

        let (translucent, opaque): (Vec<&MeshBatch>, Vec<&MeshBatch>) = self
            .batches
            .iter()
            .partition(|batch| transparency_enabled && batch.material.is_translucent());

        for batch in opaque {
            self.submit(batch, graphics, &model_transform, &mut stats);
        }

        if !translucent.is_empty() {
            graphics.set_blending(true);
            for batch in translucent {
                self.submit(batch, graphics, &model_transform, &mut stats);
            }
            graphics.set_blending(false);
        }

        stats
    }

    fn submit(
        &self,
        batch: &MeshBatch,
        graphics: &mut dyn GraphicsBoundary,
        model_transform: &Matrix4<f32>,
        stats: &mut FrameStats,
    ) {
        graphics.submit(
            batch.flat_positions(),
            batch.flat_uvs(),
            self.materials.handle(batch.material),
            model_transform,
        );
        stats.submissions += 1;
        stats.faces += batch.face_count();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine_state::{
        rendering::{headless::HeadlessGraphics, material::MaterialId, meshing::cull_faces},
        voxels::{block::block_type::BlockType, terrain::TerrainSettings},
    };
    use cgmath::Point3;

    #[test]
    fn resubmits_cached_batches_until_the_world_changes() {
        let mut graphics = HeadlessGraphics::default();
        let mut renderer = WorldRenderer::new(&mut graphics);
        let mut world = World::new(8, 8, 8).unwrap();
        world.add_block(BlockType::DIRT, Point3::new(0, 0, 0));

        let first = renderer.render(&world, &mut graphics, false);
        let second = renderer.render(&world, &mut graphics, false);
        world.add_block(BlockType::DIRT, Point3::new(0, 1, 0));
        let third = renderer.render(&world, &mut graphics, false);

        assert!(first.remeshed);
        assert!(!second.remeshed);
        assert_eq!(first.faces, 6);
        assert_eq!(second.faces, 6);
        assert!(third.remeshed);
        assert_eq!(third.faces, 10);
    }

    #[test]
    fn one_submission_per_material_with_resolved_handles() {
        let mut graphics = HeadlessGraphics::default();
        let mut renderer = WorldRenderer::new(&mut graphics);
        let mut world = World::new(8, 8, 8).unwrap();
        world.add_block(BlockType::GRASS, Point3::new(0, 0, 0));
        world.add_block(BlockType::GRASS, Point3::new(2, 0, 0));
        world.add_block(BlockType::LOG, Point3::new(-2, 0, 0));

        let stats = renderer.render(&world, &mut graphics, false);

        assert_eq!(stats.submissions, 2);
        let handles: Vec<_> = graphics.submissions.iter().map(|s| s.material).collect();
        assert_eq!(
            handles,
            vec![
                renderer.materials().handle(MaterialId::GRASS),
                renderer.materials().handle(MaterialId::LOG)
            ]
        );
        assert_eq!(graphics.submissions[0].faces, 12);
    }

    #[test]
    fn translucent_leaves_are_blended_last() {
        let mut graphics = HeadlessGraphics::default();
        let mut renderer = WorldRenderer::new(&mut graphics);
        let mut world = World::new(8, 8, 8).unwrap();
        world.add_block(BlockType::LEAVES, Point3::new(0, 0, 0));
        world.add_block(BlockType::DIRT, Point3::new(2, 0, 0));

        renderer.render(&world, &mut graphics, true);

        let leaves = renderer.materials().handle(MaterialId::LEAVES);
        let last = graphics.submissions.last().unwrap();
        assert_eq!(last.material, leaves);
        assert!(last.blended);
        assert!(!graphics.submissions[0].blended);
        assert!(!graphics.blending);
    }

    fn assert_matches_full_cull(renderer: &WorldRenderer, world: &World) {
        let expected: Vec<MeshBatch> = cull_faces(world.grid())
            .iter()
            .map(|batch| MeshBatch::from_faces(batch.material, &batch.faces))
            .collect();
        assert_eq!(renderer.batches().len(), expected.len());
        for (cached, fresh) in renderer.batches().iter().zip(expected.iter()) {
            assert_eq!(cached.material, fresh.material);
            assert_eq!(cached.positions, fresh.positions);
        }
    }

    #[test]
    fn block_edits_reculls_only_their_neighborhood() {
        let mut graphics = HeadlessGraphics::default();
        let mut renderer = WorldRenderer::new(&mut graphics);
        let (mut world, _) = World::generate(16, 8, 16, TerrainSettings::default()).unwrap();

        let first = renderer.render(&world, &mut graphics, false);
        assert_eq!(first.culled_cells, world.grid().len());

        let column_top = (0..8)
            .rev()
            .map(|y| Point3::new(0, y, 0))
            .find(|position| world.is_solid(*position))
            .unwrap();
        assert!(world.remove_block(column_top));
        assert!(world.add_block(BlockType::LOG, Point3::new(0, 7, 0)));

        let second = renderer.render(&world, &mut graphics, false);

        assert!(second.remeshed);
        assert_eq!(second.culled_cells, 14);
        assert_matches_full_cull(&renderer, &world);
    }

    #[test]
    fn regenerated_terrain_falls_back_to_a_full_recull() {
        let mut graphics = HeadlessGraphics::default();
        let mut renderer = WorldRenderer::new(&mut graphics);
        let mut world = World::new(16, 8, 16).unwrap();
        world.add_block(BlockType::DIRT, Point3::new(0, 7, 0));
        renderer.render(&world, &mut graphics, false);

        world.generate_terrain(&crate::engine_state::voxels::terrain::TerrainGenerator::new(
            TerrainSettings::default(),
        ));
        let stats = renderer.render(&world, &mut graphics, false);

        assert_eq!(stats.culled_cells, world.grid().len());
        assert_matches_full_cull(&renderer, &world);
    }
}
