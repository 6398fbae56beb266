//! # Voxel World Core
//!
//! This module contains the voxel world: block storage, terrain generation,
//! camera-ray targeting and block mutation.
//!
//! ## Architecture
//!
//! * **Block**: Block type tags and the six block faces
//! * **BlockGrid**: Sparse storage of occupied cells with bounds checking
//! * **Terrain**: Deterministic ground and tree generation
//! * **Raycast**: Exact voxel traversal from the camera to the targeted block
//! * **World**: Owner of the grid and entry point for add/remove requests
//!
//! ## Data Flow
//!
//! 1. Input is translated into block actions
//! 2. The world raycasts from the camera to find the targeted block and face
//! 3. The grid is mutated and the world revision bumped
//! 4. The next render pass re-culls faces for the new revision

pub mod block;
pub mod block_grid;
pub mod error;
pub mod raycast;
pub mod terrain;
pub mod world;
