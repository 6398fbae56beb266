//! Errors raised by the voxel world.

use thiserror::Error;

/// Failures of world construction and direct grid writes.
///
/// Misses and no-op mutations are not errors; only these two conditions are.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WorldError {
    /// The coordinate lies outside the configured world dimensions.
    #[error("block position ({x}, {y}, {z}) is outside the world")]
    OutOfBounds { x: i32, y: i32, z: i32 },

    /// The world cannot be built from the supplied configuration.
    #[error("invalid world configuration: {0}")]
    InvalidConfiguration(String),
}
