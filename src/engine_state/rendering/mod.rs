//! # Rendering
//!
//! The boundary between the voxel world and the graphics backend.
//!
//! The world is never drawn directly. Exposed faces are culled into per-material
//! batches of flat vertex arrays and handed to a [`GraphicsBoundary`], which owns
//! shaders, textures and draw calls.
//!
//! ## Key Components
//! - `material`: material tags and the handle table resolved at setup
//! - `meshing`: face culling, mesh batches and the world renderer
//! - `headless`: a boundary that records submissions instead of drawing

use cgmath::Matrix4;

use material::MaterialId;

pub mod headless;
pub mod material;
pub mod meshing;

/// Opaque handle to a texture/sampler pair owned by the graphics backend.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct TextureHandle(pub u32);

/// The operations the renderer needs from a graphics backend.
pub trait GraphicsBoundary {
    /// Returns the texture handle used to draw `material`.
    ///
    /// Called once per material when the renderer is created.
    fn resolve_material(&mut self, material: MaterialId) -> TextureHandle;

    /// Draws a triangle list.
    ///
    /// # Arguments
    /// * `vertex_positions` - Flat `x, y, z` triples, three vertices per triangle
    /// * `uv_coords` - Flat `u, v` pairs, one per vertex
    /// * `material` - Texture handle resolved for the batch's material
    /// * `model_transform` - Transform applied to every vertex
    fn submit(
        &mut self,
        vertex_positions: &[f32],
        uv_coords: &[f32],
        material: TextureHandle,
        model_transform: &Matrix4<f32>,
    );

    /// Switches alpha blending on or off for subsequent submissions.
    fn set_blending(&mut self, _enabled: bool) {}
}
