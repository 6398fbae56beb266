//! # Block Type Module
//!
//! This module defines the different types of blocks in the voxel world.
//! It provides functionality for block type identification, material lookup and
//! conversion from hotbar slots.

use num_derive::FromPrimitive;
use num_traits::FromPrimitive;

use crate::engine_state::rendering::material::MaterialId;

use super::BlockTypeSize;

/// Enumerates all possible block types in the voxel world.
///
/// `AIR` marks the absence of a block and is never stored in the grid. The
/// discriminants of the solid types double as hotbar slots (1..=4).
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, FromPrimitive)]
pub enum BlockType {
    /// An empty cell. Every coordinate not present in the grid is air.
    AIR = 0,

    /// The top layer of every terrain column.
    GRASS = 1,

    /// Fills a terrain column below its grass block.
    DIRT = 2,

    /// Tree trunk.
    LOG = 3,

    /// Tree canopy. Rendered with blending when leaf transparency is enabled.
    LEAVES = 4,
}

impl BlockType {
    /// All block types that can occupy a cell.
    pub const SOLID_TYPES: [BlockType; 4] = [
        BlockType::GRASS,
        BlockType::DIRT,
        BlockType::LOG,
        BlockType::LEAVES,
    ];

    /// Returns `true` for every type except `AIR`.
    pub fn is_solid(self) -> bool {
        self != BlockType::AIR
    }

    /// Converts a hotbar slot into the block type placed from it.
    ///
    /// # Returns
    /// `None` for slot 0 (air) and for any slot without a block type.
    pub fn from_hotbar_slot(slot: BlockTypeSize) -> Option<Self> {
        BlockType::from_u8(slot).filter(|block_type| block_type.is_solid())
    }

    /// The rendering material used for every face of this block type.
    ///
    /// # Returns
    /// `None` for `AIR`, which has no geometry.
    pub fn material(self) -> Option<MaterialId> {
        match self {
            BlockType::AIR => None,
            BlockType::GRASS => Some(MaterialId::GRASS),
            BlockType::DIRT => Some(MaterialId::DIRT),
            BlockType::LOG => Some(MaterialId::LOG),
            BlockType::LEAVES => Some(MaterialId::LEAVES),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hotbar_slots_map_to_solid_types() {
        assert_eq!(BlockType::from_hotbar_slot(1), Some(BlockType::GRASS));
        assert_eq!(BlockType::from_hotbar_slot(4), Some(BlockType::LEAVES));
        assert_eq!(BlockType::from_hotbar_slot(0), None);
        assert_eq!(BlockType::from_hotbar_slot(9), None);
    }

    #[test]
    fn only_air_has_no_material() {
        assert_eq!(BlockType::AIR.material(), None);
        for block_type in BlockType::SOLID_TYPES {
            assert!(block_type.is_solid());
            assert!(block_type.material().is_some());
        }
    }
}
