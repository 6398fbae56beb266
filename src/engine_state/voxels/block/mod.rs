//! # Block Module
//!
//! This module provides the block-related definitions of the voxel world: the
//! block type tag stored per cell and the six block faces.

pub mod block_side;
pub mod block_type;

/// The underlying integer type used to represent block types and hotbar slots.
pub type BlockTypeSize = u8;
