//! A graphics boundary without a GPU.
//!
//! `HeadlessGraphics` records every submission it receives. It backs the headless
//! frame loop and the renderer tests.

use cgmath::Matrix4;
use log::trace;

use super::{material::MaterialId, GraphicsBoundary, TextureHandle};

/// What a single `submit` call carried.
#[derive(Clone, Debug, PartialEq)]
pub struct Submission {
    pub material: TextureHandle,
    pub vertices: usize,
    pub faces: usize,
    pub blended: bool,
}

/// Records submissions in arrival order.
#[derive(Debug, Default)]
pub struct HeadlessGraphics {
    pub submissions: Vec<Submission>,
    pub blending: bool,
}

impl HeadlessGraphics {
    /// Forgets the submissions of previous frames.
    pub fn clear(&mut self) {
        self.submissions.clear();
    }
}

impl GraphicsBoundary for HeadlessGraphics {
    fn resolve_material(&mut self, material: MaterialId) -> TextureHandle {
        TextureHandle(material as u32)
    }

    fn submit(
        &mut self,
        vertex_positions: &[f32],
        uv_coords: &[f32],
        material: TextureHandle,
        _model_transform: &Matrix4<f32>,
    ) {
        let vertices = vertex_positions.len() / 3;
        debug_assert_eq!(uv_coords.len() / 2, vertices);
        trace!("Submitted {} vertices with {:?}", vertices, material);

        self.submissions.push(Submission {
            material,
            vertices,
            faces: vertices / 6,
            blended: self.blending,
        });
    }

    fn set_blending(&mut self, enabled: bool) {
        self.blending = enabled;
    }
}
