//! # Materials
//!
//! Every block type is drawn with one material. Materials are resolved to the
//! texture handles of the graphics backend once, when the renderer is set up, and
//! travel through culling and batching as plain tags.

use super::{GraphicsBoundary, TextureHandle};

/// Tag identifying how a face is textured.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum MaterialId {
    GRASS = 0,
    DIRT = 1,
    LOG = 2,
    LEAVES = 3,
}

impl MaterialId {
    /// Number of materials.
    pub const COUNT: usize = 4;

    /// All materials in batch submission order.
    pub fn all() -> [MaterialId; MaterialId::COUNT] {
        [
            MaterialId::GRASS,
            MaterialId::DIRT,
            MaterialId::LOG,
            MaterialId::LEAVES,
        ]
    }

    /// Whether this material has see-through texels that need blending when
    /// transparency is enabled.
    pub fn is_translucent(self) -> bool {
        self == MaterialId::LEAVES
    }
}

/// Texture handles for every material, resolved once from the graphics backend.
#[derive(Clone, Debug)]
pub struct MaterialTable {
    handles: [TextureHandle; MaterialId::COUNT],
}

impl MaterialTable {
    /// Asks the graphics boundary for the handle of every material.
    pub fn resolve(graphics: &mut dyn GraphicsBoundary) -> Self {
        MaterialTable {
            handles: MaterialId::all().map(|material| graphics.resolve_material(material)),
        }
    }

    pub fn handle(&self, material: MaterialId) -> TextureHandle {
        self.handles[material as usize]
    }
}
